//! Error types for the protocol layer.
//!
//! Each crate in Packetlens defines its own error enum. A `ProtocolError`
//! always means some text could not be turned into a protocol value; lookup
//! failures live in the registry crate.

/// Errors that can occur while parsing protocol values from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The text does not name a known connection phase.
    #[error("unknown protocol phase: {0}")]
    UnknownPhase(String),

    /// The text does not name a known direction or side.
    #[error("unknown direction: {0}")]
    UnknownDirection(String),

    /// The text is neither a decimal nor a `0x` hexadecimal packet id.
    #[error("invalid packet id: {0}")]
    InvalidPacketId(String),
}
