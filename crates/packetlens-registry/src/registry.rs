//! The resolution API.
//!
//! A [`Registry`] publishes its state as one immutable snapshot behind an
//! [`ArcSwap`]. Readers load the current snapshot without locking;
//! the only writer is dynamic registration, which builds a new snapshot
//! and swaps it in.
//!
//! ```text
//!   classify ──► load snapshot ──► class index hit? ──► Arc<PacketType>
//!                                        │ miss
//!                                        ▼
//!                           PacketType::dynamic ──► returned at once
//!                                        │
//!                                        ▼
//!                       MainContext::submit(register) ──► new snapshot
//! ```

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use packetlens_protocol::{
    Direction, PacketId, PacketKey, PacketType, ProtocolPhase, candidate_names,
};
use packetlens_tick::{MainContext, Task};
use rand::Rng;
use tracing::{debug, warn};

use crate::builtin::BUILTIN_TABLES;
use crate::config::RegistryConfig;
use crate::declare::DeclarationTable;
use crate::error::{DeclarationError, RegistryError};
use crate::group::TypeGroup;
use crate::hooks::{IdMismatch, RegistryHooks};
use crate::snapshot::{Landing, Snapshot, TypeSnapshot};

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

struct Shared {
    snapshot: ArcSwap<Snapshot>,
    hooks: RegistryHooks,
    config: RegistryConfig,
    context: Option<Arc<dyn MainContext>>,
}

/// The packet type registry.
///
/// Cheap to clone; every clone shares the same state. All lookups are
/// safe to call from any number of threads and never block.
#[derive(Clone)]
pub struct Registry {
    shared: Arc<Shared>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// A registry with the builtin tables and no main context.
    pub fn with_builtins() -> Result<Self, RegistryError> {
        Self::builder().build()
    }

    /// Resolves a runtime class to its packet type.
    ///
    /// Never fails. Lookup order:
    ///
    /// 1. the authoritative class name of each type;
    /// 2. every candidate name, then the unqualified name;
    /// 3. a new dynamic type, returned at once while its registration is
    ///    handed to the main context.
    ///
    /// When a known type matches but `id` disagrees with its declared id
    /// (both known), the id-mismatch hook fires.
    pub fn classify(
        &self,
        phase: ProtocolPhase,
        direction: Direction,
        class_name: &str,
        id: PacketId,
    ) -> Arc<PacketType> {
        let found = {
            let snapshot = self.shared.snapshot.load();
            let lookup = snapshot.index.classes(phase, direction);
            lookup
                .exact(class_name)
                .or_else(|| lookup.fallback(class_name))
                .cloned()
        };

        match found {
            Some(packet) => {
                self.check_id(&packet, class_name, id);
                packet
            }
            None => self.create_dynamic(phase, direction, id, class_name),
        }
    }

    /// Id-first classification for hosts that only expose packet ids.
    ///
    /// Falls back to a dynamic type named after `class_name` when the id
    /// is not registered.
    pub fn classify_by_id(
        &self,
        phase: ProtocolPhase,
        direction: Direction,
        id: PacketId,
        class_name: &str,
    ) -> Arc<PacketType> {
        match self.find_by_id(phase, direction, id) {
            Some(packet) => packet,
            None => self.create_dynamic(phase, direction, id, class_name),
        }
    }

    /// The live type registered for `(phase, direction, id)`.
    pub fn find_by_id(
        &self,
        phase: ProtocolPhase,
        direction: Direction,
        id: PacketId,
    ) -> Option<Arc<PacketType>> {
        self.get(PacketKey::new(phase, direction, id))
    }

    /// The live type registered for `key`.
    pub fn get(&self, key: PacketKey) -> Option<Arc<PacketType>> {
        self.shared.snapshot.load().index.by_id(&key).cloned()
    }

    /// Like [`Registry::find_by_id`], but absence is an error.
    pub fn find_current(
        &self,
        phase: ProtocolPhase,
        direction: Direction,
        id: PacketId,
    ) -> Result<Arc<PacketType>, RegistryError> {
        self.find_by_id(phase, direction, id)
            .ok_or(RegistryError::NotFound {
                phase,
                direction,
                id,
            })
    }

    pub fn has_current(&self, phase: ProtocolPhase, direction: Direction, id: PacketId) -> bool {
        self.find_by_id(phase, direction, id).is_some()
    }

    /// Looks up a type by class token, without creating dynamic types.
    ///
    /// `token` is qualified the same way declarations are (`SetSlot`
    /// becomes the Spigot class name) and must match a known class name
    /// exactly.
    pub fn find_current_by_name(
        &self,
        phase: ProtocolPhase,
        direction: Direction,
        token: &str,
    ) -> Result<Arc<PacketType>, RegistryError> {
        let class_name = candidate_names(phase, direction, token)
            .into_iter()
            .next()
            .unwrap_or_else(|| token.to_string());

        let snapshot = self.shared.snapshot.load();
        let lookup = snapshot.index.classes(phase, direction);
        lookup
            .exact(&class_name)
            .or_else(|| lookup.alias(&class_name))
            .cloned()
            .ok_or(RegistryError::ClassNotFound {
                phase,
                direction,
                class_name,
            })
    }

    /// Every type declared or registered under `name`, deprecated ones
    /// included. Empty when the name is unknown.
    pub fn find_by_name(&self, name: &str) -> Vec<Arc<PacketType>> {
        self.shared.snapshot.load().index.by_name(name).to_vec()
    }

    /// Lookup by the numeric ids of very old protocol versions.
    ///
    /// Those tables are no longer shipped, so this always returns `None`.
    #[deprecated(note = "legacy packet ids are no longer tracked; this always returns None")]
    pub fn find_legacy(&self, _id: PacketId) -> Option<Arc<PacketType>> {
        None
    }

    /// A stable view of every live type.
    pub fn all(&self) -> TypeSnapshot {
        TypeSnapshot::new(self.shared.snapshot.load_full())
    }

    /// A copy of the group for `(phase, direction)`.
    pub fn group(&self, phase: ProtocolPhase, direction: Direction) -> TypeGroup {
        self.shared.snapshot.load().group(phase, direction).clone()
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.shared.config
    }

    fn check_id(&self, packet: &PacketType, class_name: &str, observed: PacketId) {
        let expected = packet.id();
        if !observed.is_known() || !expected.is_known() || observed == expected {
            return;
        }

        if self.shared.config.warn_on_id_mismatch {
            warn!(
                class = class_name,
                %expected,
                %observed,
                "packet id mismatch, the protocol may have been renumbered"
            );
        } else {
            debug!(class = class_name, %expected, %observed, "packet id mismatch");
        }
        self.shared.hooks.id_mismatch(&IdMismatch {
            packet,
            class_name,
            observed,
        });
    }

    fn create_dynamic(
        &self,
        phase: ProtocolPhase,
        direction: Direction,
        id: PacketId,
        class_name: &str,
    ) -> Arc<PacketType> {
        let packet = Arc::new(PacketType::dynamic(phase, direction, id, class_name));
        self.shared.hooks.dynamic_created(&packet);
        self.schedule_register(Arc::clone(&packet));
        packet
    }

    /// Hands the registration of `packet` to the main context.
    ///
    /// Runs it right here when there is no context, when we already are
    /// on it, or when it refuses the task.
    fn schedule_register(&self, packet: Arc<PacketType>) {
        let shared = Arc::downgrade(&self.shared);
        let task: Task = Box::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.register_dynamic(&packet);
            }
        });

        match &self.shared.context {
            Some(context) if !context.is_main() => {
                if let Err(task) = context.submit(task) {
                    debug!("main context unavailable, registering on the caller");
                    task();
                }
            }
            _ => task(),
        }
    }
}

impl Shared {
    /// Publishes a dynamic type, unless its class already resolves.
    ///
    /// A class whose key is already live becomes another name of the live
    /// member. Returns `true` only when `packet` itself joined the
    /// registry; it is named right after that.
    fn register_dynamic(&self, packet: &Arc<PacketType>) -> bool {
        let name = format!(
            "{}{:08x}",
            self.config.dynamic_name_prefix,
            rand::rng().random::<u32>()
        );
        loop {
            let current = self.snapshot.load_full();
            if current.knows_class(packet) {
                return false;
            }
            let mut next = Snapshot::clone(&current);
            let landing = next.register_dynamic(packet, &name);

            let previous = self.snapshot.compare_and_swap(&current, Arc::new(next));
            if !Arc::ptr_eq(&previous, &current) {
                continue;
            }
            return match landing {
                Landing::Inserted => {
                    packet.assign_name(name);
                    debug!(
                        name = packet.name(),
                        key = %packet.key(),
                        class = packet.class_name(),
                        "registered dynamic packet type"
                    );
                    true
                }
                Landing::Aliased(retained) => {
                    debug!(
                        class = packet.class_name(),
                        live = retained.name(),
                        key = %retained.key(),
                        "class resolves to an already live packet type"
                    );
                    false
                }
                Landing::Present => false,
            };
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.shared.snapshot.load().len())
            .field("config", &self.shared.config)
            .field("hooks", &self.shared.hooks)
            .field("context", &self.shared.context.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// RegistryBuilder
// ---------------------------------------------------------------------------

/// Builds a [`Registry`].
///
/// Tables are bootstrapped in order: builtins first (unless disabled),
/// then every table passed to [`RegistryBuilder::declare`]. The registry
/// only becomes visible once every group and index is complete.
#[derive(Default)]
pub struct RegistryBuilder {
    config: RegistryConfig,
    tables: Vec<&'static DeclarationTable>,
    hooks: RegistryHooks,
    context: Option<Arc<dyn MainContext>>,
}

impl RegistryBuilder {
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from an empty registry instead of the builtin tables.
    pub fn without_builtins(mut self) -> Self {
        self.config.include_builtins = false;
        self
    }

    /// Adds a declaration table after the builtins.
    pub fn declare(mut self, table: &'static DeclarationTable) -> Self {
        self.tables.push(table);
        self
    }

    pub fn hooks(mut self, hooks: RegistryHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn on_id_mismatch<F>(mut self, hook: F) -> Self
    where
        F: Fn(&IdMismatch<'_>) + Send + Sync + 'static,
    {
        self.hooks = self.hooks.on_id_mismatch(hook);
        self
    }

    pub fn on_dynamic_create<F>(mut self, hook: F) -> Self
    where
        F: Fn(&PacketType) + Send + Sync + 'static,
    {
        self.hooks = self.hooks.on_dynamic_create(hook);
        self
    }

    /// The context dynamic registrations are deferred to.
    pub fn context(mut self, context: impl MainContext + 'static) -> Self {
        self.context = Some(Arc::new(context));
        self
    }

    /// Same as [`RegistryBuilder::context`] for an already shared context.
    pub fn shared_context(mut self, context: Arc<dyn MainContext>) -> Self {
        self.context = Some(context);
        self
    }

    /// Bootstraps every table and builds the indices.
    ///
    /// Any malformed table aborts the build.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let config = self.config.validated();
        let builtins: &[&'static DeclarationTable] = if config.include_builtins {
            &BUILTIN_TABLES
        } else {
            &[]
        };

        let mut snapshot = Snapshot::empty();
        let mut tables = 0usize;
        for table in builtins.iter().chain(&self.tables) {
            let phase = table
                .phase
                .ok_or(DeclarationError::MissingPhase { table: table.label })?;
            let direction = table
                .direction
                .ok_or(DeclarationError::MissingDirection { table: table.label })?;
            snapshot.group_mut(phase, direction).extend(table)?;
            tables += 1;
        }
        snapshot.reindex();

        debug!(
            tables,
            types = snapshot.len(),
            classes = snapshot.index.class_count(),
            context = self.context.is_some(),
            "packet registry bootstrapped"
        );

        Ok(Registry {
            shared: Arc::new(Shared {
                snapshot: ArcSwap::from_pointee(snapshot),
                hooks: self.hooks,
                config,
                context: self.context,
            }),
        })
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("config", &self.config)
            .field("tables", &self.tables.len())
            .field("hooks", &self.hooks)
            .field("context", &self.context.is_some())
            .finish()
    }
}
