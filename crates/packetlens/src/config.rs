//! Combined configuration for a [`PacketLens`](crate::PacketLens).

use packetlens_registry::RegistryConfig;
use packetlens_tick::TickConfig;
use serde::{Deserialize, Serialize};

/// Everything a host needs to configure, in one serde-friendly struct.
///
/// ```
/// use packetlens::PacketLensConfig;
///
/// let config: PacketLensConfig = serde_json::from_str(
///     r#"{ "tick": { "tick_rate_hz": 20 } }"#,
/// ).unwrap();
/// assert_eq!(config.tick.tick_rate_hz, 20);
/// assert!(config.registry.include_builtins);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacketLensConfig {
    pub registry: RegistryConfig,
    /// Cadence of the executor that applies dynamic registrations.
    pub tick: TickConfig,
}

impl PacketLensConfig {
    pub fn validated(self) -> Self {
        Self {
            registry: self.registry.validated(),
            tick: self.tick.validated(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_event_driven_with_builtins() {
        let config = PacketLensConfig::default();
        assert!(config.registry.include_builtins);
        assert_eq!(config.tick.tick_rate_hz, 0);
    }

    #[test]
    fn test_validated_normalises_both_halves() {
        let mut config = PacketLensConfig::default();
        config.registry.dynamic_name_prefix = String::new();
        config.tick.tick_rate_hz = 10_000;

        let config = config.validated();
        assert_eq!(config.registry.dynamic_name_prefix, "Dynamic-");
        assert_eq!(config.tick.tick_rate_hz, TickConfig::MAX_TICK_RATE_HZ);
    }
}
