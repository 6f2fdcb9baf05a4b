//! Class-name conventions.
//!
//! The host names its packet classes differently depending on which
//! mapping it was built with. A single logical packet such as `SetSlot`
//! in the play phase, sent by the server, can show up as:
//!
//! ```text
//! Spigot        net.minecraft.network.protocol.game.PacketPlayOutSetSlot
//! Mojang        net.minecraft.network.protocol.game.ClientboundSetSlotPacket
//! LegacySpigot  net.minecraft.server.PacketPlayOutSetSlot
//! Mcp           net.minecraft.network.play.server.SPacketSetSlot
//! ```
//!
//! [`candidate_names`] expands a short token into every form at once so a
//! runtime class can be matched against all conventions simultaneously.
//! Everything here is pure: the same input always yields the same output.

use crate::{Direction, ProtocolPhase};

/// Root package of Spigot and Mojang mapped packet classes.
pub const PROTOCOL_PACKAGE: &str = "net.minecraft.network.protocol";

/// Package of unversioned pre-1.17 Spigot packet classes.
pub const LEGACY_PACKAGE: &str = "net.minecraft.server";

/// Root package of MCP mapped packet classes.
pub const MCP_PACKAGE: &str = "net.minecraft.network";

/// Token prefixes that identify MCP-mapped names.
const MCP_PREFIXES: [&str; 3] = ["C00", "CPacket", "SPacket"];

/// One of the naming conventions a host may use for its packet classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingScheme {
    /// Spigot names in the 1.17+ package layout. Authoritative.
    Spigot,
    /// Official Mojang mappings.
    Mojang,
    /// Spigot names in the flat pre-1.17 package.
    LegacySpigot,
    /// Third-party MCP mappings (`CPacket…`/`SPacket…` tokens).
    Mcp,
}

impl NamingScheme {
    /// Every scheme, authoritative first.
    pub const ALL: [NamingScheme; 4] = [
        NamingScheme::Spigot,
        NamingScheme::Mojang,
        NamingScheme::LegacySpigot,
        NamingScheme::Mcp,
    ];

    /// Fully qualified class name of `token` under this scheme.
    pub fn qualify(self, phase: ProtocolPhase, direction: Direction, token: &str) -> String {
        match self {
            NamingScheme::Spigot => join(&[
                PROTOCOL_PACKAGE,
                phase.mojang_name(),
                &spigot_simple_name(phase, direction, token),
            ]),
            NamingScheme::Mojang => join(&[
                PROTOCOL_PACKAGE,
                phase.mojang_name(),
                &mojang_simple_name(direction, token),
            ]),
            NamingScheme::LegacySpigot => {
                join(&[LEGACY_PACKAGE, &spigot_simple_name(phase, direction, token)])
            }
            NamingScheme::Mcp => join(&[
                MCP_PACKAGE,
                phase.mcp_name(),
                direction.mcp_name(),
                token,
            ]),
        }
    }
}

/// `true` if `token` follows the MCP naming convention.
pub fn is_mcp_token(token: &str) -> bool {
    MCP_PREFIXES.iter().any(|prefix| token.starts_with(prefix))
}

/// The unqualified part of a class name (everything after the last `.`).
///
/// Borrows from the input, so it is safe to call on the hot path.
pub fn simple_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) => &name[dot + 1..],
        None => name,
    }
}

/// Every class name `token` may have for `(phase, direction)`.
///
/// - already qualified tokens (containing `.`) are returned as they are;
/// - MCP tokens expand to their MCP class name plus the token;
/// - anything else expands to the Spigot, Mojang and legacy Spigot class
///   names, the simple Spigot and Mojang names, and the raw token.
///
/// The Spigot name comes first when present. Duplicates are removed and
/// the order is otherwise stable.
pub fn candidate_names(phase: ProtocolPhase, direction: Direction, token: &str) -> Vec<String> {
    if token.contains('.') {
        return vec![token.to_string()];
    }

    let mut names = Vec::with_capacity(6);
    if is_mcp_token(token) {
        push_unique(&mut names, NamingScheme::Mcp.qualify(phase, direction, token));
    } else {
        let spigot = NamingScheme::Spigot.qualify(phase, direction, token);
        let mojang = NamingScheme::Mojang.qualify(phase, direction, token);
        let spigot_simple = simple_name(&spigot).to_string();
        let mojang_simple = simple_name(&mojang).to_string();

        push_unique(&mut names, spigot);
        push_unique(&mut names, mojang);
        push_unique(
            &mut names,
            NamingScheme::LegacySpigot.qualify(phase, direction, token),
        );
        push_unique(&mut names, spigot_simple);
        push_unique(&mut names, mojang_simple);
    }
    push_unique(&mut names, token.to_string());
    names
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `PacketPlayOutSetSlot`, or for nested classes
/// `PacketPlayOutEntity$PacketPlayOutRelEntityMove`.
fn spigot_simple_name(phase: ProtocolPhase, direction: Direction, token: &str) -> String {
    let prefix = format!("Packet{}{}", phase.packet_name(), direction.packet_name());
    match token.split_once('$') {
        Some((parent, child)) => format!(
            "{prefix}{}${prefix}{}",
            capitalize(parent),
            capitalize(child)
        ),
        None => format!("{prefix}{}", capitalize(token)),
    }
}

/// `ClientboundSetSlotPacket`. Tokens that already carry the direction
/// prefix or the `Packet` suffix are not decorated twice.
fn mojang_simple_name(direction: Direction, token: &str) -> String {
    let mut name = String::with_capacity(token.len() + 17);
    if !token.starts_with(direction.mojang_name()) {
        name.push_str(direction.mojang_name());
    }
    name.push_str(token);
    if !token.ends_with("Packet") {
        name.push_str("Packet");
    }
    name
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Joins the non-empty segments with `.` (the unknown phase has no package).
fn join(segments: &[&str]) -> String {
    segments
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(".")
}

fn push_unique(names: &mut Vec<String>, name: String) {
    if !names.contains(&name) {
        names.push(name);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const PLAY: ProtocolPhase = ProtocolPhase::Play;
    const OUT: Direction = Direction::Outbound;
    const IN: Direction = Direction::Inbound;

    #[test]
    fn test_qualify_each_scheme() {
        assert_eq!(
            NamingScheme::Spigot.qualify(PLAY, OUT, "SetSlot"),
            "net.minecraft.network.protocol.game.PacketPlayOutSetSlot"
        );
        assert_eq!(
            NamingScheme::Mojang.qualify(PLAY, OUT, "SetSlot"),
            "net.minecraft.network.protocol.game.ClientboundSetSlotPacket"
        );
        assert_eq!(
            NamingScheme::LegacySpigot.qualify(PLAY, OUT, "SetSlot"),
            "net.minecraft.server.PacketPlayOutSetSlot"
        );
        assert_eq!(
            NamingScheme::Mcp.qualify(PLAY, OUT, "SPacketSetSlot"),
            "net.minecraft.network.play.server.SPacketSetSlot"
        );
    }

    #[test]
    fn test_qualify_inbound_login() {
        assert_eq!(
            NamingScheme::Spigot.qualify(ProtocolPhase::Login, IN, "Start"),
            "net.minecraft.network.protocol.login.PacketLoginInStart"
        );
        assert_eq!(
            NamingScheme::Mojang.qualify(ProtocolPhase::Login, IN, "Start"),
            "net.minecraft.network.protocol.login.ServerboundStartPacket"
        );
    }

    #[test]
    fn test_nested_token_qualifies_both_halves() {
        assert_eq!(
            NamingScheme::Spigot.qualify(PLAY, OUT, "Entity$RelEntityMove"),
            "net.minecraft.network.protocol.game.PacketPlayOutEntity$PacketPlayOutRelEntityMove"
        );
    }

    #[test]
    fn test_mojang_does_not_double_decorate() {
        assert_eq!(
            NamingScheme::Mojang.qualify(PLAY, OUT, "ClientboundChunksBiomesPacket"),
            "net.minecraft.network.protocol.game.ClientboundChunksBiomesPacket"
        );
    }

    #[test]
    fn test_candidate_names_default_convention() {
        let names = candidate_names(PLAY, OUT, "SetSlot");
        assert_eq!(
            names,
            vec![
                "net.minecraft.network.protocol.game.PacketPlayOutSetSlot",
                "net.minecraft.network.protocol.game.ClientboundSetSlotPacket",
                "net.minecraft.server.PacketPlayOutSetSlot",
                "PacketPlayOutSetSlot",
                "ClientboundSetSlotPacket",
                "SetSlot",
            ]
        );
    }

    #[test]
    fn test_candidate_names_mcp_convention() {
        let names = candidate_names(PLAY, IN, "CPacketChatMessage");
        assert_eq!(
            names,
            vec![
                "net.minecraft.network.play.client.CPacketChatMessage",
                "CPacketChatMessage",
            ]
        );
    }

    #[test]
    fn test_candidate_names_qualified_passthrough() {
        let names = candidate_names(PLAY, OUT, "com.example.CustomPacket");
        assert_eq!(names, vec!["com.example.CustomPacket"]);
    }

    #[test]
    fn test_candidate_names_are_deterministic() {
        assert_eq!(
            candidate_names(ProtocolPhase::Status, OUT, "ServerInfo"),
            candidate_names(ProtocolPhase::Status, OUT, "ServerInfo")
        );
    }

    #[test]
    fn test_unknown_phase_skips_empty_segments() {
        assert_eq!(
            NamingScheme::Mojang.qualify(ProtocolPhase::Unknown, OUT, "Thing"),
            "net.minecraft.network.protocol.ClientboundThingPacket"
        );
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("a.b.C"), "C");
        assert_eq!(simple_name("C"), "C");
        assert_eq!(simple_name("a.b.Outer$Inner"), "Outer$Inner");
    }
}
