//! The logical identity of one protocol message.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::OnceLock;

use crate::naming::candidate_names;
use crate::{Direction, PacketId, PacketKey, ProtocolPhase};

/// A packet type: one distinguishable protocol message.
///
/// A `PacketType` pairs the identity triple ([`PacketKey`]) with every
/// class name the message is known under, a version-independent logical
/// name and some metadata.
///
/// # Equality
///
/// Equality, hashing and ordering only look at the key. Two instances
/// built from different names but with the same phase, direction and id
/// are equal. A renamed declaration is interchangeable with the one it
/// replaces, and two threads that both synthesized a type for the same
/// unknown class agree on its identity.
pub struct PacketType {
    key: PacketKey,
    /// Every known class name, authoritative first.
    class_names: Vec<String>,
    /// Logical name, assigned once when the type is registered.
    name: OnceLock<String>,
    deprecated: bool,
    force_async: bool,
    /// Synthesized at runtime rather than declared.
    dynamic: bool,
    /// Hash of `key`, computed once.
    hash: u64,
}

impl PacketType {
    /// Creates a packet type from one or more short name tokens.
    ///
    /// Each token is expanded with [`candidate_names`]; the class names of
    /// the type are the union, in token order.
    pub fn new<S: AsRef<str>>(
        phase: ProtocolPhase,
        direction: Direction,
        id: PacketId,
        tokens: &[S],
    ) -> Self {
        let mut class_names: Vec<String> = Vec::new();
        for token in tokens {
            for name in candidate_names(phase, direction, token.as_ref()) {
                if !class_names.contains(&name) {
                    class_names.push(name);
                }
            }
        }
        Self::with_class_names(PacketKey::new(phase, direction, id), class_names)
    }

    /// Creates a packet type from an already expanded list of class names.
    pub fn with_class_names(key: PacketKey, class_names: Vec<String>) -> Self {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        Self {
            key,
            class_names,
            name: OnceLock::new(),
            deprecated: false,
            force_async: false,
            dynamic: false,
            hash: hasher.finish(),
        }
    }

    /// Creates a dynamic packet type for a class no declaration matched.
    ///
    /// The observed class name is the only candidate.
    pub fn dynamic(
        phase: ProtocolPhase,
        direction: Direction,
        id: PacketId,
        class_name: impl Into<String>,
    ) -> Self {
        let mut packet = Self::with_class_names(
            PacketKey::new(phase, direction, id),
            vec![class_name.into()],
        );
        packet.dynamic = true;
        packet
    }

    /// Marks the type as deprecated (renamed, replaced or removed).
    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Marks the type as one that must be processed off the main context.
    pub fn with_force_async(mut self, force_async: bool) -> Self {
        self.force_async = force_async;
        self
    }

    /// Assigns the logical name.
    ///
    /// Returns `false` if a name was already assigned; the first name wins.
    pub fn assign_name(&self, name: impl Into<String>) -> bool {
        self.name.set(name.into()).is_ok()
    }

    pub fn key(&self) -> PacketKey {
        self.key
    }

    pub fn phase(&self) -> ProtocolPhase {
        self.key.phase
    }

    pub fn direction(&self) -> Direction {
        self.key.direction
    }

    /// The legacy numeric id. Only meaningful within one protocol snapshot.
    pub fn id(&self) -> PacketId {
        self.key.id
    }

    /// Every known class name; the first one is authoritative.
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    /// The authoritative class name.
    pub fn class_name(&self) -> &str {
        self.class_names.first().map(String::as_str).unwrap_or_default()
    }

    /// The logical name, or `None` before registration.
    pub fn name(&self) -> Option<&str> {
        self.name.get().map(String::as_str)
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    pub fn is_async_forced(&self) -> bool {
        self.force_async
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// `true` if packets of this type are sent by the client.
    pub fn is_client(&self) -> bool {
        self.key.direction.is_client()
    }

    /// `true` if packets of this type are sent by the server.
    pub fn is_server(&self) -> bool {
        self.key.direction.is_server()
    }
}

impl PartialEq for PacketType {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PacketType {}

impl PartialEq<PacketKey> for PacketType {
    fn eq(&self, other: &PacketKey) -> bool {
        self.key == *other
    }
}

impl PartialEq<PacketType> for PacketKey {
    fn eq(&self, other: &PacketType) -> bool {
        *self == other.key
    }
}

impl Hash for PacketType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl PartialOrd for PacketType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PacketType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Debug for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PacketType")
            .field("name", &self.name())
            .field("key", &self.key)
            .field("class_names", &self.class_names)
            .field("deprecated", &self.deprecated)
            .field("force_async", &self.force_async)
            .field("dynamic", &self.dynamic)
            .finish()
    }
}

/// `SET_SLOT[Play, Outbound, 0x15, classNames: [...]]`
impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}, {}, {}, classNames: {:?}]",
            self.name().unwrap_or("UNREGISTERED"),
            self.key.phase,
            self.key.direction,
            self.key.id,
            self.class_names
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
