//! Unified error type for Packetlens.

use packetlens_protocol::ProtocolError;
use packetlens_registry::{DeclarationError, FilterError, RegistryError};
use tokio::task::JoinError;

/// Top-level error that wraps every crate-specific error.
///
/// The `#[from]` attributes let `?` convert sub-crate errors directly.
#[derive(Debug, thiserror::Error)]
pub enum PacketLensError {
    /// Parsing a phase, direction or packet id failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A declaration table is malformed.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    /// A lookup or registry build failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A packet filter could not be parsed.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// The mutation executor task did not stop cleanly.
    #[error("executor task failed: {0}")]
    Executor(#[from] JoinError),
}
