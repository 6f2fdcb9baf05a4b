//! Registry configuration.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RegistryConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`Registry`](crate::Registry).
///
/// Hosts usually embed this in their own config file, so every field has
/// a serde default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Load the builtin declaration tables. Turn this off to start from an
    /// empty registry and declare everything yourself.
    pub include_builtins: bool,

    /// Prefix of the logical names given to dynamically registered types.
    pub dynamic_name_prefix: String,

    /// Report id drift at `warn` level. When `false` it is logged at
    /// `debug` and only the hook sees it.
    pub warn_on_id_mismatch: bool,
}

impl RegistryConfig {
    pub const DEFAULT_DYNAMIC_PREFIX: &'static str = "Dynamic-";

    /// Replaces unusable values with their defaults.
    pub fn validated(mut self) -> Self {
        if self.dynamic_name_prefix.trim().is_empty() {
            self.dynamic_name_prefix = Self::DEFAULT_DYNAMIC_PREFIX.to_string();
        }
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            include_builtins: true,
            dynamic_name_prefix: Self::DEFAULT_DYNAMIC_PREFIX.to_string(),
            warn_on_id_mismatch: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_config_default() {
        let config = RegistryConfig::default();
        assert!(config.include_builtins);
        assert_eq!(config.dynamic_name_prefix, "Dynamic-");
        assert!(config.warn_on_id_mismatch);
    }

    #[test]
    fn test_validated_restores_empty_prefix() {
        let config = RegistryConfig {
            dynamic_name_prefix: "  ".into(),
            ..Default::default()
        }
        .validated();
        assert_eq!(config.dynamic_name_prefix, "Dynamic-");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: RegistryConfig =
            serde_json::from_str(r#"{"include_builtins": false}"#).unwrap();
        assert!(!config.include_builtins);
        assert_eq!(config.dynamic_name_prefix, "Dynamic-");
    }
}
