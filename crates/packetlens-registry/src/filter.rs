//! Textual packet type filters.
//!
//! Dispatch layers use filters to build listener whitelists from config
//! files or commands:
//!
//! ```text
//! play server 0x10-0x20 SET_SLOT
//! login client
//! status s 0 - 1
//! ```
//!
//! A filter names a phase, then a side (any prefix of `client` or
//! `server`), then any mix of ids, id ranges and logical names. With no
//! ids and no names it covers every id from 0 to 255.

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;

use packetlens_protocol::{Direction, PacketId, PacketType, ProtocolPhase};

use crate::error::FilterError;
use crate::registry::Registry;

/// A parsed filter. Resolve it against a registry with
/// [`TypeFilter::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFilter {
    phase: ProtocolPhase,
    direction: Direction,
    ids: BTreeSet<i32>,
    names: Vec<String>,
}

impl TypeFilter {
    /// Highest id a filter may name.
    pub const MAX_ID: i32 = 255;

    pub fn parse(text: &str) -> Result<Self, FilterError> {
        let tokens = join_ranges(text);
        let mut tokens = tokens.iter().map(String::as_str);

        let phase: ProtocolPhase = tokens.next().ok_or(FilterError::MissingPhase)?.parse()?;
        let direction = parse_side(tokens.next().ok_or(FilterError::MissingSide)?)?;

        let mut ids = BTreeSet::new();
        let mut names = Vec::new();
        for token in tokens {
            if is_id(token) {
                let (start, end) = match split_range(token) {
                    Some((start, end)) => (parse_id(start)?, parse_id(end)?),
                    None => {
                        let id = parse_id(token)?;
                        (id, id)
                    }
                };
                if start > end {
                    return Err(FilterError::InvalidRange { start, end });
                }
                ids.extend(start..=end);
            } else {
                names.push(token.to_string());
            }
        }

        if ids.is_empty() && names.is_empty() {
            ids.extend(0..=Self::MAX_ID);
        }

        Ok(Self {
            phase,
            direction,
            ids,
            names,
        })
    }

    pub fn phase(&self) -> ProtocolPhase {
        self.phase
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Ids named by the filter, ascending.
    pub fn ids(&self) -> impl Iterator<Item = PacketId> + '_ {
        self.ids.iter().copied().map(PacketId)
    }

    /// Logical names named by the filter, as written.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The live types the filter selects, sorted.
    ///
    /// Ids without a registered type are skipped. Names match logical
    /// names case-insensitively, deprecated ones included; a deprecated
    /// name resolves to the live type that shares its key.
    pub fn resolve(&self, registry: &Registry) -> BTreeSet<Arc<PacketType>> {
        let snapshot = registry.all();
        let group = snapshot.group(self.phase, self.direction);

        let mut types: BTreeSet<Arc<PacketType>> = group
            .values()
            .filter(|packet| self.ids.contains(&packet.id().0))
            .cloned()
            .collect();

        for name in &self.names {
            for packet in group.declared() {
                if packet
                    .name()
                    .is_some_and(|declared| declared.eq_ignore_ascii_case(name))
                {
                    let live = group.get(&packet.key()).unwrap_or(packet);
                    types.insert(Arc::clone(live));
                }
            }
        }
        types
    }
}

impl FromStr for TypeFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Splits on whitespace, gluing `a - b`, `a- b` and `a -b` into `a-b`.
///
/// Only a token following an id is glued, so `server -1` stays two tokens.
fn join_ranges(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in text.split_whitespace() {
        match tokens.last_mut() {
            Some(last) if is_id(last) && (last.ends_with('-') || token.starts_with('-')) => {
                last.push_str(token)
            }
            _ => tokens.push(token.to_string()),
        }
    }
    tokens
}

/// `true` for tokens that name an id or a range, negative ones included.
fn is_id(token: &str) -> bool {
    token
        .strip_prefix('-')
        .unwrap_or(token)
        .starts_with(|c: char| c.is_ascii_digit())
}

/// Splits `a-b` on the dash after the first character, so a leading
/// minus sign stays with the start.
fn split_range(token: &str) -> Option<(&str, &str)> {
    let dash = token.get(1..)?.find('-')? + 1;
    Some((&token[..dash], &token[dash + 1..]))
}

fn parse_side(token: &str) -> Result<Direction, FilterError> {
    let lower = token.to_ascii_lowercase();
    if "client".starts_with(&lower) {
        Ok(Direction::Inbound)
    } else if "server".starts_with(&lower) {
        Ok(Direction::Outbound)
    } else {
        lower
            .parse()
            .map_err(|_| FilterError::UnknownSide(token.to_string()))
    }
}

fn parse_id(text: &str) -> Result<i32, FilterError> {
    let id: PacketId = text.parse()?;
    if !(0..=TypeFilter::MAX_ID).contains(&id.0) {
        return Err(FilterError::OutOfRange(id.0));
    }
    Ok(id.0)
}

#[cfg(test)]
mod tests {
    use packetlens_protocol::ProtocolError;

    use super::*;

    #[test]
    fn test_parse_phase_side_ids_and_names() {
        let filter: TypeFilter = "play server 0x10-0x12 SET_SLOT 5".parse().unwrap();
        assert_eq!(filter.phase(), ProtocolPhase::Play);
        assert_eq!(filter.direction(), Direction::Outbound);
        assert_eq!(
            filter.ids().collect::<Vec<_>>(),
            vec![PacketId(5), PacketId(0x10), PacketId(0x11), PacketId(0x12)]
        );
        assert_eq!(filter.names(), ["SET_SLOT".to_string()]);
    }

    #[test]
    fn test_spaced_ranges_are_joined() {
        for text in ["login c 1 - 3", "login c 1- 3", "login c 1 -3"] {
            let filter = TypeFilter::parse(text).unwrap();
            assert_eq!(filter.ids().count(), 3, "{text}");
        }
    }

    #[test]
    fn test_side_is_never_glued_to_an_id() {
        let err = TypeFilter::parse("login s -1 SUCCESS").unwrap_err();
        assert_eq!(err, FilterError::OutOfRange(-1));

        let filter = TypeFilter::parse("login s 1 SUCCESS").unwrap();
        assert_eq!(filter.direction(), Direction::Outbound);
        assert_eq!(filter.ids().collect::<Vec<_>>(), vec![PacketId(1)]);
    }

    #[test]
    fn test_side_prefixes() {
        assert_eq!(
            TypeFilter::parse("status c").unwrap().direction(),
            Direction::Inbound
        );
        assert_eq!(
            TypeFilter::parse("status SERV").unwrap().direction(),
            Direction::Outbound
        );
        assert_eq!(
            TypeFilter::parse("status clientbound").unwrap().direction(),
            Direction::Outbound
        );
    }

    #[test]
    fn test_default_range_is_every_id() {
        let filter = TypeFilter::parse("play client").unwrap();
        assert_eq!(filter.ids().count(), 256);
        assert!(filter.names().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(TypeFilter::parse("  "), Err(FilterError::MissingPhase));
        assert_eq!(TypeFilter::parse("play"), Err(FilterError::MissingSide));
        assert_eq!(
            TypeFilter::parse("play sideways"),
            Err(FilterError::UnknownSide("sideways".into()))
        );
        assert!(matches!(
            TypeFilter::parse("lobby server"),
            Err(FilterError::Protocol(ProtocolError::UnknownPhase(_)))
        ));
        assert_eq!(
            TypeFilter::parse("play server 300"),
            Err(FilterError::OutOfRange(300))
        );
        assert_eq!(
            TypeFilter::parse("play server -1"),
            Err(FilterError::OutOfRange(-1))
        );
        assert_eq!(
            TypeFilter::parse("play server 2 - -1"),
            Err(FilterError::OutOfRange(-1))
        );
        assert_eq!(
            TypeFilter::parse("play server 9-3"),
            Err(FilterError::InvalidRange { start: 9, end: 3 })
        );
        assert!(matches!(
            TypeFilter::parse("play server 12zz"),
            Err(FilterError::Protocol(ProtocolError::InvalidPacketId(_)))
        ));
    }
}
