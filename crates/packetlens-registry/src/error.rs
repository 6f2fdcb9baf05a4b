//! Error types for the registry layer.

use packetlens_protocol::{Direction, PacketId, ProtocolError, ProtocolPhase};

/// A malformed declaration table.
///
/// These are programmer errors: the registry refuses to start rather than
/// run with a group that is missing members.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
    /// The table does not say which phase it belongs to.
    #[error("declaration table `{table}` has no protocol phase")]
    MissingPhase { table: &'static str },

    /// The table does not say which direction it belongs to.
    #[error("declaration table `{table}` has no direction")]
    MissingDirection { table: &'static str },

    /// A declaration without a single class-name token.
    #[error("`{table}::{name}` declares no class names")]
    EmptyNames {
        table: &'static str,
        name: &'static str,
    },

    /// An alias whose target was not declared before it.
    #[error("`{table}::{name}` aliases `{target}`, which is not declared earlier")]
    DanglingAlias {
        table: &'static str,
        name: &'static str,
        target: &'static str,
    },

    /// Two non-deprecated declarations share a logical name.
    #[error("`{table}` declares `{name}` twice")]
    DuplicateName {
        table: &'static str,
        name: &'static str,
    },

    /// The table was added to the group of another phase or direction.
    #[error("declaration table `{table}` does not belong to group {phase} {direction}")]
    GroupMismatch {
        table: &'static str,
        phase: ProtocolPhase,
        direction: Direction,
    },
}

/// Errors returned by the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Startup failed because a declaration table is malformed.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    /// A must-exist lookup by id found nothing.
    #[error("no packet type registered for {phase} {direction} {id}")]
    NotFound {
        phase: ProtocolPhase,
        direction: Direction,
        id: PacketId,
    },

    /// A must-exist lookup by class name found nothing.
    #[error("no packet type registered for class {class_name} ({phase} {direction})")]
    ClassNotFound {
        phase: ProtocolPhase,
        direction: Direction,
        class_name: String,
    },
}

/// Errors raised while parsing a [`TypeFilter`](crate::TypeFilter).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("filter does not name a protocol phase")]
    MissingPhase,

    #[error("filter does not name a side (client or server)")]
    MissingSide,

    #[error("unknown side: {0}")]
    UnknownSide(String),

    /// Bad phase name or malformed number.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("packet id {0} is outside 0..=255")]
    OutOfRange(i32),

    #[error("invalid id range {start}-{end}")]
    InvalidRange { start: i32, end: i32 },
}
