//! Packet type registry for Packetlens.
//!
//! Gives every protocol message a stable logical identity and resolves it
//! in both directions on the packet hot path.
//!
//! # Key types
//!
//! - [`Registry`]: classification and lookups. Built with
//!   [`Registry::builder`].
//! - [`TypeGroup`]: the members of one (phase, direction).
//! - [`DeclarationTable`] / [`packet_group!`]: how packet types are
//!   declared. The [`builtin`] module holds the shipped tables.
//! - [`RegistryHooks`]: id-drift and dynamic-type notifications.
//! - [`TypeFilter`]: textual whitelists such as `play server 0x10-0x20`.
//!
//! # Example
//!
//! ```
//! use packetlens_protocol::{Direction, PacketId, ProtocolPhase};
//! use packetlens_registry::{Registry, builtin};
//!
//! let registry = Registry::with_builtins().unwrap();
//! let set_slot = registry.classify(
//!     ProtocolPhase::Play,
//!     Direction::Outbound,
//!     "net.minecraft.network.protocol.game.ClientboundSetSlotPacket",
//!     PacketId(0x15),
//! );
//! assert_eq!(set_slot.name(), Some("SET_SLOT"));
//! assert_eq!(*set_slot, builtin::play::server::SET_SLOT);
//!
//! let unknown = registry.classify(
//!     ProtocolPhase::Play,
//!     Direction::Outbound,
//!     "TotallyNewPacket",
//!     PacketId(0x99),
//! );
//! assert!(unknown.is_dynamic());
//! ```

mod config;
mod declare;
mod error;
mod filter;
mod group;
mod hooks;
mod index;
mod macros;
mod registry;
mod snapshot;

pub mod builtin;

pub use config::RegistryConfig;
pub use declare::{Declaration, DeclarationTable, DeclaredNames};
pub use error::{DeclarationError, FilterError, RegistryError};
pub use filter::TypeFilter;
pub use group::TypeGroup;
pub use hooks::{IdMismatch, RegistryHooks};
pub use registry::{Registry, RegistryBuilder};
pub use snapshot::{Iter, TypeSnapshot};

/// Paths used by [`packet_group!`]. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use packetlens_protocol::{Direction, PacketId, PacketKey, ProtocolPhase};
}
