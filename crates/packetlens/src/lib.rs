//! # Packetlens
//!
//! Stable logical identities for protocol packets.
//!
//! A proxy or plugin sees packets as concrete class names plus numeric ids
//! that drift between protocol versions. Packetlens maps each of them to a
//! shared [`PacketType`](packetlens_protocol::PacketType) that stays the
//! same across versions and naming schemes, and registers unknown packets
//! on the fly.
//!
//! This crate bundles the registry with the executor that applies its
//! dynamic registrations:
//!
//! - `packetlens-protocol`: phases, directions, ids and `PacketType`.
//! - `packetlens-registry`: declaration tables, lookups, filters.
//! - `packetlens-tick`: the single-writer tick executor.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use packetlens::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), PacketLensError> {
//!     packetlens::init_logging();
//!
//!     let lens = PacketLens::start()?;
//!     let packet = lens.registry().classify(
//!         ProtocolPhase::Play,
//!         Direction::Outbound,
//!         "PacketPlayOutSetSlot",
//!         PacketId(0x15),
//!     );
//!     println!("{packet}");
//!
//!     lens.shutdown().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod logging;
mod runtime;

pub use config::PacketLensConfig;
pub use error::PacketLensError;
pub use logging::{DEFAULT_LOG_FILTER, init_logging};
pub use runtime::{PacketLens, PacketLensBuilder};

pub use packetlens_protocol as protocol;
pub use packetlens_registry as registry;
pub use packetlens_tick as tick;

/// Common imports for hosts.
pub mod prelude {
    pub use crate::{PacketLens, PacketLensBuilder, PacketLensConfig, PacketLensError};
    pub use packetlens_protocol::{
        Direction, NamingScheme, PacketId, PacketKey, PacketType, ProtocolPhase,
    };
    pub use packetlens_registry::{
        DeclarationTable, IdMismatch, Registry, RegistryConfig, RegistryHooks, TypeFilter,
        builtin, packet_group,
    };
    pub use packetlens_tick::{MainContext, TickConfig};
}
