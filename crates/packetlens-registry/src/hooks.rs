//! Observational callbacks.
//!
//! Hooks never influence classification. They exist so collaborators can
//! count drift and unknown packets or log them their own way.

use std::fmt;
use std::sync::Arc;

use packetlens_protocol::{PacketId, PacketType};

/// A class matched a known type, but the id seen at runtime differs from
/// the declared one. Usually means the protocol was renumbered.
#[derive(Debug, Clone, Copy)]
pub struct IdMismatch<'a> {
    /// The type the class resolved to.
    pub packet: &'a PacketType,
    /// The class name that was classified.
    pub class_name: &'a str,
    /// The id observed at runtime.
    pub observed: PacketId,
}

impl IdMismatch<'_> {
    /// The id the type was declared with.
    pub fn expected(&self) -> PacketId {
        self.packet.id()
    }
}

type IdMismatchHook = Arc<dyn Fn(&IdMismatch<'_>) + Send + Sync>;
type DynamicCreateHook = Arc<dyn Fn(&PacketType) + Send + Sync>;

/// The callbacks a registry notifies.
#[derive(Clone, Default)]
pub struct RegistryHooks {
    id_mismatch: Option<IdMismatchHook>,
    dynamic_create: Option<DynamicCreateHook>,
}

impl RegistryHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once per classification that hit id drift.
    pub fn on_id_mismatch<F>(mut self, hook: F) -> Self
    where
        F: Fn(&IdMismatch<'_>) + Send + Sync + 'static,
    {
        self.id_mismatch = Some(Arc::new(hook));
        self
    }

    /// Called whenever classification synthesizes a dynamic type, before
    /// its registration is scheduled.
    pub fn on_dynamic_create<F>(mut self, hook: F) -> Self
    where
        F: Fn(&PacketType) + Send + Sync + 'static,
    {
        self.dynamic_create = Some(Arc::new(hook));
        self
    }

    pub(crate) fn id_mismatch(&self, event: &IdMismatch<'_>) {
        if let Some(hook) = &self.id_mismatch {
            hook(event);
        }
    }

    pub(crate) fn dynamic_created(&self, packet: &PacketType) {
        if let Some(hook) = &self.dynamic_create {
            hook(packet);
        }
    }
}

impl fmt::Debug for RegistryHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryHooks")
            .field("id_mismatch", &self.id_mismatch.is_some())
            .field("dynamic_create", &self.dynamic_create.is_some())
            .finish()
    }
}
