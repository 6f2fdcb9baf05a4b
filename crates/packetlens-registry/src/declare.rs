//! Declaration tables.
//!
//! Packet types are declared as plain `const` data, one table per
//! (phase, direction) group. Tables are usually written with
//! [`packet_group!`](crate::packet_group), which also emits a typed
//! [`PacketKey`](packetlens_protocol::PacketKey) constant per entry.

use packetlens_protocol::{Direction, PacketId, ProtocolPhase};

/// Where the class names of a declaration come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredNames {
    /// Short tokens, expanded through every naming scheme.
    Tokens(&'static [&'static str]),
    /// Reuse the class names of an earlier declaration in the same table.
    AliasOf(&'static str),
}

/// One entry of a declaration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration {
    name: &'static str,
    id: PacketId,
    names: DeclaredNames,
    deprecated: bool,
    force_async: bool,
}

impl Declaration {
    pub const fn new(name: &'static str, id: PacketId, tokens: &'static [&'static str]) -> Self {
        Self {
            name,
            id,
            names: DeclaredNames::Tokens(tokens),
            deprecated: false,
            force_async: false,
        }
    }

    /// A second name for the member declared as `target`, which shares its
    /// id and class names.
    pub const fn alias(name: &'static str, id: PacketId, target: &'static str) -> Self {
        Self {
            name,
            id,
            names: DeclaredNames::AliasOf(target),
            deprecated: false,
            force_async: false,
        }
    }

    pub const fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub const fn force_async(mut self) -> Self {
        self.force_async = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn id(&self) -> PacketId {
        self.id
    }

    pub fn names(&self) -> DeclaredNames {
        self.names
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    pub fn is_async_forced(&self) -> bool {
        self.force_async
    }
}

/// The declarations of one (phase, direction) group.
///
/// `phase` and `direction` are optional only so that a table built by hand
/// can be rejected with a clear error instead of landing in the wrong
/// group.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationTable {
    pub label: &'static str,
    pub phase: Option<ProtocolPhase>,
    pub direction: Option<Direction>,
    pub entries: &'static [Declaration],
}

impl DeclarationTable {
    pub const fn new(
        label: &'static str,
        phase: ProtocolPhase,
        direction: Direction,
        entries: &'static [Declaration],
    ) -> Self {
        Self {
            label,
            phase: Some(phase),
            direction: Some(direction),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
