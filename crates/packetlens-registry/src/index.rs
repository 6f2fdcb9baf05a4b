//! Lookup indices derived from the type groups.
//!
//! Everything here is rebuilt or extended on the writer side and then
//! published as part of an immutable snapshot, so the maps never need
//! interior locking.

use std::collections::HashMap;
use std::sync::Arc;

use packetlens_protocol::{Direction, PacketKey, PacketType, ProtocolPhase, simple_name};

use crate::group::TypeGroup;

/// Number of (phase, direction) slots.
pub(crate) const SLOTS: usize = ProtocolPhase::ALL.len() * Direction::ALL.len();

/// Dense slot number of a (phase, direction) pair.
pub(crate) const fn slot(phase: ProtocolPhase, direction: Direction) -> usize {
    phase.ordinal() * Direction::ALL.len() + direction.ordinal()
}

// ---------------------------------------------------------------------------
// ClassLookup
// ---------------------------------------------------------------------------

/// Class-name tables of one (phase, direction).
///
/// First insertion wins in all three maps, so members inserted earlier
/// in live order take precedence.
#[derive(Debug, Clone, Default)]
pub(crate) struct ClassLookup {
    /// Authoritative class name → type.
    by_class: HashMap<String, Arc<PacketType>>,
    /// Any candidate class name → type.
    by_alias: HashMap<String, Arc<PacketType>>,
    /// Unqualified candidate name → type.
    by_simple: HashMap<String, Arc<PacketType>>,
}

impl ClassLookup {
    fn insert(&mut self, packet: &Arc<PacketType>) {
        if let Some(class_name) = packet.class_names().first() {
            self.by_class
                .entry(class_name.clone())
                .or_insert_with(|| Arc::clone(packet));
        }
        for candidate in packet.class_names() {
            self.by_alias
                .entry(candidate.clone())
                .or_insert_with(|| Arc::clone(packet));
            self.by_simple
                .entry(simple_name(candidate).to_string())
                .or_insert_with(|| Arc::clone(packet));
        }
    }

    /// Exact lookup of an authoritative class name.
    pub(crate) fn exact(&self, class_name: &str) -> Option<&Arc<PacketType>> {
        self.by_class.get(class_name)
    }

    /// Lookup of any candidate class name.
    pub(crate) fn alias(&self, class_name: &str) -> Option<&Arc<PacketType>> {
        self.by_alias.get(class_name)
    }

    /// Any candidate name, then the unqualified name.
    pub(crate) fn fallback(&self, class_name: &str) -> Option<&Arc<PacketType>> {
        self.alias(class_name)
            .or_else(|| self.by_simple.get(simple_name(class_name)))
    }

    pub(crate) fn len(&self) -> usize {
        self.by_class.len()
    }
}

// ---------------------------------------------------------------------------
// RegistryIndex
// ---------------------------------------------------------------------------

/// The three registry indices.
#[derive(Debug, Clone, Default)]
pub(crate) struct RegistryIndex {
    /// Live members with a known id.
    by_id: HashMap<PacketKey, Arc<PacketType>>,
    /// Class-name tables, one per slot.
    classes: [ClassLookup; SLOTS],
    /// Logical name → every instance declared or registered under it.
    by_name: HashMap<String, Vec<Arc<PacketType>>>,
}

impl RegistryIndex {
    /// Builds the indices over `groups`.
    pub(crate) fn build<'a>(groups: impl IntoIterator<Item = &'a TypeGroup>) -> Self {
        let mut index = Self::default();
        for group in groups {
            let lookup = &mut index.classes[slot(group.phase(), group.direction())];
            for packet in group.values() {
                lookup.insert(packet);
                if packet.id().is_known() {
                    index
                        .by_id
                        .entry(packet.key())
                        .or_insert_with(|| Arc::clone(packet));
                }
            }
            for packet in group.declared() {
                index.add_name(packet);
            }
        }
        index
    }

    /// Adds a dynamic type that just became live under `name`.
    pub(crate) fn insert_dynamic(&mut self, packet: &Arc<PacketType>, name: &str) {
        self.classes[slot(packet.phase(), packet.direction())].insert(packet);
        if packet.id().is_known() {
            self.by_id
                .entry(packet.key())
                .or_insert_with(|| Arc::clone(packet));
        }
        self.by_name
            .entry(name.to_string())
            .or_default()
            .push(Arc::clone(packet));
    }

    /// Points `class_name` at an already live type.
    pub(crate) fn alias_class(&mut self, class_name: &str, retained: &Arc<PacketType>) {
        self.classes[slot(retained.phase(), retained.direction())]
            .by_class
            .entry(class_name.to_string())
            .or_insert_with(|| Arc::clone(retained));
    }

    pub(crate) fn classes(&self, phase: ProtocolPhase, direction: Direction) -> &ClassLookup {
        &self.classes[slot(phase, direction)]
    }

    pub(crate) fn by_id(&self, key: &PacketKey) -> Option<&Arc<PacketType>> {
        self.by_id.get(key)
    }

    pub(crate) fn by_name(&self, name: &str) -> &[Arc<PacketType>] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of indexed class names across every slot.
    pub(crate) fn class_count(&self) -> usize {
        self.classes.iter().map(ClassLookup::len).sum()
    }

    fn add_name(&mut self, packet: &Arc<PacketType>) {
        if let Some(name) = packet.name() {
            self.by_name
                .entry(name.to_string())
                .or_default()
                .push(Arc::clone(packet));
        }
    }
}

#[cfg(test)]
mod tests {
    use packetlens_protocol::PacketId;

    use super::*;

    fn group_with(packets: Vec<PacketType>) -> TypeGroup {
        let mut group = TypeGroup::new(ProtocolPhase::Play, Direction::Outbound);
        for packet in packets {
            group.register_member(Arc::new(packet));
        }
        group
    }

    fn play_out(id: i32, token: &str) -> PacketType {
        PacketType::new(ProtocolPhase::Play, Direction::Outbound, PacketId(id), &[token])
    }

    #[test]
    fn test_slots_are_dense_and_unique() {
        let mut seen = [false; SLOTS];
        for phase in ProtocolPhase::ALL {
            for direction in Direction::ALL {
                let s = slot(phase, direction);
                assert!(!seen[s]);
                seen[s] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_exact_uses_authoritative_name_only() {
        let group = group_with(vec![play_out(0x15, "SetSlot")]);
        let index = RegistryIndex::build([&group]);
        let lookup = index.classes(ProtocolPhase::Play, Direction::Outbound);

        assert!(lookup
            .exact("net.minecraft.network.protocol.game.PacketPlayOutSetSlot")
            .is_some());
        assert!(lookup.exact("ClientboundSetSlotPacket").is_none());
        assert!(lookup.fallback("ClientboundSetSlotPacket").is_some());
    }

    #[test]
    fn test_fallback_matches_simple_name() {
        let group = group_with(vec![play_out(0x15, "SetSlot")]);
        let index = RegistryIndex::build([&group]);
        let lookup = index.classes(ProtocolPhase::Play, Direction::Outbound);

        let found = lookup.fallback("org.example.shaded.PacketPlayOutSetSlot").unwrap();
        assert_eq!(found.id(), PacketId(0x15));
        assert!(lookup.fallback("PacketPlayOutNothing").is_none());
    }

    #[test]
    fn test_other_slot_is_empty() {
        let group = group_with(vec![play_out(0x15, "SetSlot")]);
        let index = RegistryIndex::build([&group]);
        let lookup = index.classes(ProtocolPhase::Play, Direction::Inbound);
        assert!(lookup.fallback("SetSlot").is_none());
    }

    #[test]
    fn test_alias_class_resolves_to_retained_type() {
        let group = group_with(vec![play_out(0x15, "SetSlot")]);
        let mut index = RegistryIndex::build([&group]);
        let retained = Arc::clone(group.values().next().unwrap());

        index.alias_class("com.example.RenamedSetSlot", &retained);
        let lookup = index.classes(ProtocolPhase::Play, Direction::Outbound);
        let found = lookup.exact("com.example.RenamedSetSlot").unwrap();
        assert!(Arc::ptr_eq(found, &retained));
        assert_eq!(index.class_count(), 2);
    }

    #[test]
    fn test_insert_dynamic_indexes_by_given_name() {
        let mut index = RegistryIndex::default();
        let packet = Arc::new(PacketType::dynamic(
            ProtocolPhase::Play,
            Direction::Outbound,
            PacketId(0xC0),
            "com.example.ManaPacket",
        ));

        index.insert_dynamic(&packet, "Dynamic-0000002a");
        assert_eq!(index.by_name("Dynamic-0000002a").len(), 1);
        assert!(index.by_id(&packet.key()).is_some());
        assert!(index
            .classes(ProtocolPhase::Play, Direction::Outbound)
            .exact("com.example.ManaPacket")
            .is_some());
    }

    #[test]
    fn test_unknown_ids_stay_out_of_id_index() {
        let group = group_with(vec![play_out(-1, "Mystery")]);
        let index = RegistryIndex::build([&group]);
        let key = PacketKey::new(ProtocolPhase::Play, Direction::Outbound, PacketId::UNKNOWN);
        assert!(index.by_id(&key).is_none());
        assert_eq!(index.class_count(), 1);
    }
}
