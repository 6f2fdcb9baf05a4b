//! Immutable registry state and the public enumeration view.

use std::iter::FlatMap;
use std::slice;
use std::sync::Arc;

use packetlens_protocol::{Direction, PacketType, ProtocolPhase};

use crate::group::TypeGroup;
use crate::index::{RegistryIndex, SLOTS, slot};

/// Everything a reader needs, published as one unit.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    /// One group per slot, empty when nothing was declared for it.
    pub(crate) groups: Vec<TypeGroup>,
    pub(crate) index: RegistryIndex,
}

impl Snapshot {
    /// A snapshot with an empty group in every slot.
    pub(crate) fn empty() -> Self {
        let mut groups = Vec::with_capacity(SLOTS);
        for phase in ProtocolPhase::ALL {
            for direction in Direction::ALL {
                groups.push(TypeGroup::new(phase, direction));
            }
        }
        Self {
            groups,
            index: RegistryIndex::default(),
        }
    }

    pub(crate) fn group(&self, phase: ProtocolPhase, direction: Direction) -> &TypeGroup {
        &self.groups[slot(phase, direction)]
    }

    pub(crate) fn group_mut(&mut self, phase: ProtocolPhase, direction: Direction) -> &mut TypeGroup {
        &mut self.groups[slot(phase, direction)]
    }

    /// Number of live types across every group.
    pub(crate) fn len(&self) -> usize {
        self.groups.iter().map(TypeGroup::len).sum()
    }

    /// Recomputes the indices from the groups.
    pub(crate) fn reindex(&mut self) {
        self.index = RegistryIndex::build(&self.groups);
    }

    /// `true` when `packet`'s class name already resolves exactly.
    pub(crate) fn knows_class(&self, packet: &PacketType) -> bool {
        self.index
            .classes(packet.phase(), packet.direction())
            .exact(packet.class_name())
            .is_some()
    }

    /// Applies the registration of a dynamic type.
    ///
    /// When its key is already live, the new class name is pointed at the
    /// live member and `packet` itself is left out.
    pub(crate) fn register_dynamic(&mut self, packet: &Arc<PacketType>, name: &str) -> Landing {
        if self.knows_class(packet) {
            return Landing::Present;
        }
        let group = self.group_mut(packet.phase(), packet.direction());
        if let Some(retained) = group.get(&packet.key()).cloned() {
            self.index.alias_class(packet.class_name(), &retained);
            return Landing::Aliased(retained);
        }
        group.register_member(Arc::clone(packet));
        self.index.insert_dynamic(packet, name);
        Landing::Inserted
    }
}

/// Outcome of [`Snapshot::register_dynamic`].
#[derive(Debug)]
pub(crate) enum Landing {
    /// The class already resolved. Nothing changed.
    Present,
    /// The class now resolves to this live member.
    Aliased(Arc<PacketType>),
    /// The type joined its group.
    Inserted,
}

// ---------------------------------------------------------------------------
// TypeSnapshot
// ---------------------------------------------------------------------------

type GroupValues<'a> = slice::Iter<'a, Arc<PacketType>>;

/// A stable view of every live packet type.
///
/// Holds the registry state as it was when [`Registry::all`] was called:
/// types registered afterwards do not show up. Iterating is restartable,
/// call [`TypeSnapshot::iter`] as often as needed.
///
/// [`Registry::all`]: crate::Registry::all
#[derive(Debug, Clone)]
pub struct TypeSnapshot {
    inner: Arc<Snapshot>,
}

impl TypeSnapshot {
    pub(crate) fn new(inner: Arc<Snapshot>) -> Self {
        Self { inner }
    }

    /// Live types, group by group in (phase, direction) order.
    pub fn iter<'a>(&'a self) -> Iter<'a> {
        Iter {
            inner: self
                .inner
                .groups
                .iter()
                .flat_map(TypeGroup::values as fn(&'a TypeGroup) -> GroupValues<'a>),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The group for (phase, direction) as of this snapshot.
    pub fn group(&self, phase: ProtocolPhase, direction: Direction) -> &TypeGroup {
        self.inner.group(phase, direction)
    }

    /// `true` if a type with the same key as `packet` is live.
    pub fn contains(&self, packet: &PacketType) -> bool {
        self.group(packet.phase(), packet.direction()).has_member(packet)
    }
}

impl<'a> IntoIterator for &'a TypeSnapshot {
    type Item = &'a Arc<PacketType>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`TypeSnapshot::iter`].
pub struct Iter<'a> {
    inner: FlatMap<
        slice::Iter<'a, TypeGroup>,
        GroupValues<'a>,
        fn(&'a TypeGroup) -> GroupValues<'a>,
    >,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Arc<PacketType>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
