//! Type groups: the members of one (phase, direction).

use std::collections::HashMap;
use std::slice;
use std::sync::Arc;

use packetlens_protocol::{Direction, PacketKey, PacketType, ProtocolPhase};

use crate::declare::{DeclaredNames, DeclarationTable};
use crate::error::DeclarationError;

/// The packet types of one (phase, direction).
///
/// A group keeps two views:
///
/// - **declared**: every instance ever declared or registered, in order,
///   including deprecated ones and aliases. Logical-name lookups use this
///   view so old names keep resolving.
/// - **live**: at most one instance per [`PacketKey`], in first-insertion
///   order. When a new declaration has the same key as a live member and
///   is not deprecated, it takes over that member's slot. Classification
///   and enumeration use this view.
#[derive(Debug, Clone)]
pub struct TypeGroup {
    phase: ProtocolPhase,
    direction: Direction,
    declared: Vec<Arc<PacketType>>,
    live: Vec<Arc<PacketType>>,
    /// Position of each key in `live`.
    positions: HashMap<PacketKey, usize>,
}

impl TypeGroup {
    /// Creates an empty group.
    pub fn new(phase: ProtocolPhase, direction: Direction) -> Self {
        Self {
            phase,
            direction,
            declared: Vec::new(),
            live: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Builds a group from a declaration table.
    pub fn bootstrap(table: &DeclarationTable) -> Result<Self, DeclarationError> {
        let phase = table.phase.ok_or(DeclarationError::MissingPhase {
            table: table.label,
        })?;
        let direction = table.direction.ok_or(DeclarationError::MissingDirection {
            table: table.label,
        })?;
        let mut group = Self::new(phase, direction);
        group.extend(table)?;
        Ok(group)
    }

    /// Adds the declarations of `table`, in order.
    ///
    /// Fails without touching the group if the table is malformed or
    /// belongs to another group.
    pub fn extend(&mut self, table: &DeclarationTable) -> Result<(), DeclarationError> {
        let label = table.label;
        let phase = table.phase.ok_or(DeclarationError::MissingPhase { table: label })?;
        let direction = table
            .direction
            .ok_or(DeclarationError::MissingDirection { table: label })?;
        if phase != self.phase || direction != self.direction {
            return Err(DeclarationError::GroupMismatch {
                table: label,
                phase: self.phase,
                direction: self.direction,
            });
        }

        let mut staged = self.clone();
        for declaration in table.entries {
            let name = declaration.name();
            let class_names = match declaration.names() {
                DeclaredNames::Tokens([]) => {
                    return Err(DeclarationError::EmptyNames { table: label, name });
                }
                DeclaredNames::Tokens(tokens) => {
                    PacketType::new(phase, direction, declaration.id(), tokens)
                        .class_names()
                        .to_vec()
                }
                DeclaredNames::AliasOf(target) => staged
                    .declared
                    .iter()
                    .find(|member| member.name() == Some(target))
                    .map(|member| member.class_names().to_vec())
                    .ok_or(DeclarationError::DanglingAlias {
                        table: label,
                        name,
                        target,
                    })?,
            };

            if !declaration.is_deprecated()
                && staged
                    .declared
                    .iter()
                    .any(|member| !member.is_deprecated() && member.name() == Some(name))
            {
                return Err(DeclarationError::DuplicateName { table: label, name });
            }

            let packet = PacketType::with_class_names(
                PacketKey::new(phase, direction, declaration.id()),
                class_names,
            )
            .with_deprecated(declaration.is_deprecated())
            .with_force_async(declaration.is_async_forced());
            packet.assign_name(name);
            staged.declare(Arc::new(packet));
        }

        *self = staged;
        Ok(())
    }

    /// Registers a member created at runtime.
    ///
    /// Returns `false`, leaving the group untouched, when a member with the
    /// same key is already live.
    pub fn register_member(&mut self, packet: Arc<PacketType>) -> bool {
        if self.positions.contains_key(&packet.key()) {
            return false;
        }
        self.positions.insert(packet.key(), self.live.len());
        self.declared.push(Arc::clone(&packet));
        self.live.push(packet);
        true
    }

    /// `true` if a member with the same key as `packet` is live.
    pub fn has_member(&self, packet: &PacketType) -> bool {
        self.positions.contains_key(&packet.key())
    }

    /// The live member for `key`.
    pub fn get(&self, key: &PacketKey) -> Option<&Arc<PacketType>> {
        self.positions.get(key).map(|&position| &self.live[position])
    }

    /// Live members, in first-insertion order.
    pub fn values(&self) -> slice::Iter<'_, Arc<PacketType>> {
        self.live.iter()
    }

    /// Every declared or registered instance, deprecated ones included.
    pub fn declared(&self) -> &[Arc<PacketType>] {
        &self.declared
    }

    pub fn phase(&self) -> ProtocolPhase {
        self.phase
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of live members.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    fn declare(&mut self, packet: Arc<PacketType>) {
        self.declared.push(Arc::clone(&packet));
        match self.positions.get(&packet.key()) {
            Some(&position) => {
                if !packet.is_deprecated() {
                    self.live[position] = packet;
                }
            }
            None => {
                self.positions.insert(packet.key(), self.live.len());
                self.live.push(packet);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use packetlens_protocol::PacketId;

    use super::*;
    use crate::declare::Declaration;

    const EXPLOSIONS: DeclarationTable = DeclarationTable::new(
        "explosions",
        ProtocolPhase::Play,
        Direction::Outbound,
        &[
            Declaration::new("OLD_EXPLOSION", PacketId(5), &["OldExplosion"]).deprecated(),
            Declaration::new("EXPLOSION", PacketId(5), &["Explosion"]),
            Declaration::new("LOGIN", PacketId(0x30), &["Login"]),
            Declaration::alias("JOIN_GAME", PacketId(0x30), "LOGIN").deprecated(),
        ],
    );

    fn explosions() -> TypeGroup {
        TypeGroup::bootstrap(&EXPLOSIONS).unwrap()
    }

    #[test]
    fn test_non_deprecated_replaces_live_member() {
        let group = explosions();
        assert_eq!(group.len(), 2);
        assert_eq!(group.declared().len(), 4);

        let key = PacketKey::new(ProtocolPhase::Play, Direction::Outbound, PacketId(5));
        let live = group.get(&key).unwrap();
        assert_eq!(live.name(), Some("EXPLOSION"));
        assert!(!live.is_deprecated());
    }

    #[test]
    fn test_deprecated_alias_does_not_replace() {
        let group = explosions();
        let key = PacketKey::new(ProtocolPhase::Play, Direction::Outbound, PacketId(0x30));
        assert_eq!(group.get(&key).unwrap().name(), Some("LOGIN"));

        let alias = group
            .declared()
            .iter()
            .find(|p| p.name() == Some("JOIN_GAME"))
            .unwrap();
        assert_eq!(alias.class_names(), group.get(&key).unwrap().class_names());
    }

    #[test]
    fn test_live_order_is_first_insertion() {
        let group = explosions();
        let ids: Vec<_> = group.values().map(|p| p.id()).collect();
        assert_eq!(ids, vec![PacketId(5), PacketId(0x30)]);
    }

    #[test]
    fn test_register_member_is_idempotent() {
        let mut group = explosions();
        let dynamic = Arc::new(PacketType::dynamic(
            ProtocolPhase::Play,
            Direction::Outbound,
            PacketId(0x99),
            "TotallyNewPacket",
        ));
        assert!(group.register_member(Arc::clone(&dynamic)));
        assert!(!group.register_member(dynamic));
        assert_eq!(group.len(), 3);

        let clash = Arc::new(PacketType::dynamic(
            ProtocolPhase::Play,
            Direction::Outbound,
            PacketId(5),
            "SomethingElse",
        ));
        assert!(group.has_member(&clash));
        assert!(!group.register_member(clash));
    }

    #[test]
    fn test_missing_phase_is_fatal() {
        const TABLE: DeclarationTable = DeclarationTable {
            label: "broken",
            phase: None,
            direction: Some(Direction::Inbound),
            entries: &[],
        };
        assert_eq!(
            TypeGroup::bootstrap(&TABLE).unwrap_err(),
            DeclarationError::MissingPhase { table: "broken" }
        );
    }

    #[test]
    fn test_missing_direction_is_fatal() {
        const TABLE: DeclarationTable = DeclarationTable {
            label: "broken",
            phase: Some(ProtocolPhase::Play),
            direction: None,
            entries: &[],
        };
        assert_eq!(
            TypeGroup::bootstrap(&TABLE).unwrap_err(),
            DeclarationError::MissingDirection { table: "broken" }
        );
    }

    #[test]
    fn test_empty_names_is_fatal() {
        const TABLE: DeclarationTable = DeclarationTable::new(
            "broken",
            ProtocolPhase::Play,
            Direction::Inbound,
            &[Declaration::new("NOTHING", PacketId(1), &[])],
        );
        assert_eq!(
            TypeGroup::bootstrap(&TABLE).unwrap_err(),
            DeclarationError::EmptyNames {
                table: "broken",
                name: "NOTHING"
            }
        );
    }

    #[test]
    fn test_dangling_alias_is_fatal() {
        const TABLE: DeclarationTable = DeclarationTable::new(
            "broken",
            ProtocolPhase::Play,
            Direction::Inbound,
            &[Declaration::alias("LATER", PacketId(1), "MISSING")],
        );
        assert!(matches!(
            TypeGroup::bootstrap(&TABLE),
            Err(DeclarationError::DanglingAlias { target: "MISSING", .. })
        ));
    }

    #[test]
    fn test_duplicate_live_name_is_fatal() {
        const TABLE: DeclarationTable = DeclarationTable::new(
            "broken",
            ProtocolPhase::Play,
            Direction::Inbound,
            &[
                Declaration::new("CHAT", PacketId(1), &["Chat"]),
                Declaration::new("CHAT", PacketId(2), &["ChatMessage"]),
            ],
        );
        assert!(matches!(
            TypeGroup::bootstrap(&TABLE),
            Err(DeclarationError::DuplicateName { name: "CHAT", .. })
        ));
    }

    #[test]
    fn test_failed_extend_leaves_group_untouched() {
        const BAD: DeclarationTable = DeclarationTable::new(
            "bad",
            ProtocolPhase::Play,
            Direction::Outbound,
            &[
                Declaration::new("FINE", PacketId(9), &["Fine"]),
                Declaration::new("EMPTY", PacketId(10), &[]),
            ],
        );
        let mut group = explosions();
        assert!(group.extend(&BAD).is_err());
        assert_eq!(group.len(), 2);
        assert_eq!(group.declared().len(), 4);
    }

    #[test]
    fn test_extend_rejects_other_group() {
        const OTHER: DeclarationTable = DeclarationTable::new(
            "other",
            ProtocolPhase::Login,
            Direction::Outbound,
            &[],
        );
        let mut group = explosions();
        assert!(matches!(
            group.extend(&OTHER),
            Err(DeclarationError::GroupMismatch { .. })
        ));
    }
}
