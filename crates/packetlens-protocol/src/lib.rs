//! Protocol vocabulary for Packetlens.
//!
//! This crate defines the values every other layer talks in:
//!
//! - **Types** ([`ProtocolPhase`], [`Direction`], [`PacketId`],
//!   [`PacketKey`]): the pieces of a packet's identity.
//! - **Packet types** ([`PacketType`]): the stable logical identity of one
//!   message, together with every class name it is known under.
//! - **Naming** ([`NamingScheme`], [`candidate_names`]): how short tokens
//!   expand into concrete class names under each mapping convention.
//! - **Errors** ([`ProtocolError`]): what can go wrong when parsing these
//!   values from text.
//!
//! # Architecture
//!
//! The protocol layer knows nothing about lookups or scheduling. The
//! registry crate builds on it:
//!
//! ```text
//! Protocol (PacketType) → Registry (indices, classify) → Facade (PacketLens)
//! ```

mod error;
pub mod naming;
mod packet;
mod types;

pub use error::ProtocolError;
pub use naming::{NamingScheme, candidate_names, simple_name};
pub use packet::PacketType;
pub use types::{Direction, PacketId, PacketKey, ProtocolPhase};
