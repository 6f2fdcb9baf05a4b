//! Identity building blocks for protocol messages.
//!
//! A packet is identified by three things: the connection phase it travels
//! in, the side that sends it, and the numeric id the protocol assigned to
//! it. Everything in this module is `Copy` and cheap to compare so it can be
//! passed around freely on the interception hot path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Direction: who sends the message?
// ---------------------------------------------------------------------------

/// Which endpoint originates a message.
///
/// `Inbound` packets are written by the client and read by the server
/// ("serverbound"), `Outbound` packets are written by the server
/// ("clientbound"). The declaration order matters: it defines the
/// ordering of packet identities (`Inbound < Outbound`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Client → server.
    Inbound,
    /// Server → client.
    Outbound,
}

impl Direction {
    /// Both directions, in declaration order.
    pub const ALL: [Direction; 2] = [Direction::Inbound, Direction::Outbound];

    /// Position of this direction in [`Direction::ALL`].
    pub const fn ordinal(self) -> usize {
        match self {
            Direction::Inbound => 0,
            Direction::Outbound => 1,
        }
    }

    /// Segment used by Spigot-style class names (`PacketPlayIn…`).
    pub const fn packet_name(self) -> &'static str {
        match self {
            Direction::Inbound => "In",
            Direction::Outbound => "Out",
        }
    }

    /// Prefix used by Mojang-mapped class names (`Serverbound…Packet`).
    pub const fn mojang_name(self) -> &'static str {
        match self {
            Direction::Inbound => "Serverbound",
            Direction::Outbound => "Clientbound",
        }
    }

    /// Package segment used by MCP-mapped class names.
    pub const fn mcp_name(self) -> &'static str {
        match self {
            Direction::Inbound => "client",
            Direction::Outbound => "server",
        }
    }

    /// `true` if the client sends packets in this direction.
    pub const fn is_client(self) -> bool {
        matches!(self, Direction::Inbound)
    }

    /// `true` if the server sends packets in this direction.
    pub const fn is_server(self) -> bool {
        matches!(self, Direction::Outbound)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Inbound => f.write_str("Inbound"),
            Direction::Outbound => f.write_str("Outbound"),
        }
    }
}

impl FromStr for Direction {
    type Err = ProtocolError;

    /// Accepts the names used across conventions, case-insensitively:
    /// `inbound`/`in`/`client`/`serverbound` and
    /// `outbound`/`out`/`server`/`clientbound`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inbound" | "in" | "client" | "serverbound" => Ok(Direction::Inbound),
            "outbound" | "out" | "server" | "clientbound" => Ok(Direction::Outbound),
            _ => Err(ProtocolError::UnknownDirection(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ProtocolPhase: where in the connection are we?
// ---------------------------------------------------------------------------

/// The negotiation stage of a connection.
///
/// Numeric packet ids are only unique within one phase and direction, so
/// the phase is part of every packet identity. `Unknown` covers packets
/// observed before the phase could be determined.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolPhase {
    Handshake,
    Status,
    Login,
    Configuration,
    Play,
    Unknown,
}

impl ProtocolPhase {
    /// Every phase, in declaration order.
    pub const ALL: [ProtocolPhase; 6] = [
        ProtocolPhase::Handshake,
        ProtocolPhase::Status,
        ProtocolPhase::Login,
        ProtocolPhase::Configuration,
        ProtocolPhase::Play,
        ProtocolPhase::Unknown,
    ];

    /// Position of this phase in [`ProtocolPhase::ALL`].
    pub const fn ordinal(self) -> usize {
        match self {
            ProtocolPhase::Handshake => 0,
            ProtocolPhase::Status => 1,
            ProtocolPhase::Login => 2,
            ProtocolPhase::Configuration => 3,
            ProtocolPhase::Play => 4,
            ProtocolPhase::Unknown => 5,
        }
    }

    /// Segment used by Spigot-style class names (`PacketPlay…`).
    pub const fn packet_name(self) -> &'static str {
        match self {
            ProtocolPhase::Handshake => "Handshaking",
            ProtocolPhase::Status => "Status",
            ProtocolPhase::Login => "Login",
            ProtocolPhase::Configuration => "Configuration",
            ProtocolPhase::Play => "Play",
            ProtocolPhase::Unknown => "",
        }
    }

    /// Package segment used by Mojang-mapped class names.
    pub const fn mojang_name(self) -> &'static str {
        match self {
            ProtocolPhase::Handshake => "handshake",
            ProtocolPhase::Status => "status",
            ProtocolPhase::Login => "login",
            ProtocolPhase::Configuration => "configuration",
            ProtocolPhase::Play => "game",
            ProtocolPhase::Unknown => "",
        }
    }

    /// Package segment used by MCP-mapped class names.
    pub const fn mcp_name(self) -> &'static str {
        match self {
            ProtocolPhase::Handshake => "handshaking",
            ProtocolPhase::Status => "status",
            ProtocolPhase::Login => "login",
            ProtocolPhase::Configuration => "configuration",
            ProtocolPhase::Play => "play",
            ProtocolPhase::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProtocolPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProtocolPhase::Handshake => "Handshake",
            ProtocolPhase::Status => "Status",
            ProtocolPhase::Login => "Login",
            ProtocolPhase::Configuration => "Configuration",
            ProtocolPhase::Play => "Play",
            ProtocolPhase::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

impl FromStr for ProtocolPhase {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "handshake" | "handshaking" => Ok(ProtocolPhase::Handshake),
            "status" => Ok(ProtocolPhase::Status),
            "login" => Ok(ProtocolPhase::Login),
            "configuration" | "config" => Ok(ProtocolPhase::Configuration),
            "play" | "game" => Ok(ProtocolPhase::Play),
            _ => Err(ProtocolError::UnknownPhase(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PacketId: the numeric opcode
// ---------------------------------------------------------------------------

/// A numeric packet id, valid only within one protocol snapshot.
///
/// Ids get reshuffled with almost every host release, so they are a weak
/// identity. [`PacketId::UNKNOWN`] marks packets whose id is not known.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PacketId(pub i32);

impl PacketId {
    /// Sentinel for "no id known".
    pub const UNKNOWN: PacketId = PacketId(-1);

    /// `false` for [`PacketId::UNKNOWN`].
    pub const fn is_known(self) -> bool {
        self.0 != Self::UNKNOWN.0
    }
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "0x{:02X}", self.0)
        } else {
            f.write_str("UNKNOWN")
        }
    }
}

impl FromStr for PacketId {
    type Err = ProtocolError;

    /// Parses decimal (`30`) or hexadecimal (`0x1E`) ids.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => i32::from_str_radix(hex, 16),
            None => trimmed.parse::<i32>(),
        };
        parsed
            .map(PacketId)
            .map_err(|_| ProtocolError::InvalidPacketId(s.to_string()))
    }
}

impl From<i32> for PacketId {
    fn from(id: i32) -> Self {
        PacketId(id)
    }
}

// ---------------------------------------------------------------------------
// PacketKey: the identity triple
// ---------------------------------------------------------------------------

/// The identity of a packet type: `(phase, direction, id)`.
///
/// Field order is significant: the derived `Ord` compares phase first,
/// then direction, then id. Declaration tables expose one `PacketKey`
/// constant per declared packet, which makes a convenient typed handle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PacketKey {
    pub phase: ProtocolPhase,
    pub direction: Direction,
    pub id: PacketId,
}

impl PacketKey {
    pub const fn new(phase: ProtocolPhase, direction: Direction, id: PacketId) -> Self {
        Self {
            phase,
            direction,
            id,
        }
    }
}

impl fmt::Display for PacketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.phase, self.direction, self.id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse_aliases() {
        assert_eq!("client".parse::<Direction>().unwrap(), Direction::Inbound);
        assert_eq!("Serverbound".parse::<Direction>().unwrap(), Direction::Inbound);
        assert_eq!("OUT".parse::<Direction>().unwrap(), Direction::Outbound);
        assert_eq!("clientbound".parse::<Direction>().unwrap(), Direction::Outbound);
        assert!(matches!(
            "sideways".parse::<Direction>(),
            Err(ProtocolError::UnknownDirection(_))
        ));
    }

    #[test]
    fn test_phase_parse_aliases() {
        assert_eq!("game".parse::<ProtocolPhase>().unwrap(), ProtocolPhase::Play);
        assert_eq!(
            "Handshaking".parse::<ProtocolPhase>().unwrap(),
            ProtocolPhase::Handshake
        );
        assert!("lobby".parse::<ProtocolPhase>().is_err());
    }

    #[test]
    fn test_ordinals_match_all_arrays() {
        for (i, phase) in ProtocolPhase::ALL.iter().enumerate() {
            assert_eq!(phase.ordinal(), i);
        }
        for (i, direction) in Direction::ALL.iter().enumerate() {
            assert_eq!(direction.ordinal(), i);
        }
    }

    #[test]
    fn test_packet_id_parse_and_display() {
        assert_eq!("0x1E".parse::<PacketId>().unwrap(), PacketId(0x1E));
        assert_eq!("30".parse::<PacketId>().unwrap(), PacketId(30));
        assert!("0xZZ".parse::<PacketId>().is_err());
        assert_eq!(PacketId(0x1E).to_string(), "0x1E");
        assert_eq!(PacketId::UNKNOWN.to_string(), "UNKNOWN");
        assert!(!PacketId::UNKNOWN.is_known());
    }

    #[test]
    fn test_key_ordering_is_phase_then_direction_then_id() {
        let a = PacketKey::new(ProtocolPhase::Status, Direction::Outbound, PacketId(9));
        let b = PacketKey::new(ProtocolPhase::Play, Direction::Inbound, PacketId(0));
        let c = PacketKey::new(ProtocolPhase::Play, Direction::Outbound, PacketId(0));
        let d = PacketKey::new(ProtocolPhase::Play, Direction::Outbound, PacketId(1));
        assert!(a < b && b < c && c < d);
    }

    #[test]
    fn test_key_json_format() {
        let key = PacketKey::new(ProtocolPhase::Play, Direction::Outbound, PacketId(0x15));
        let json: serde_json::Value = serde_json::to_value(key).unwrap();
        assert_eq!(json["phase"], "play");
        assert_eq!(json["direction"], "outbound");
        assert_eq!(json["id"], 0x15);
    }
}
