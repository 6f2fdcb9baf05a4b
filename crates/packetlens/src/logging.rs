//! Logging setup for binaries embedding Packetlens.
//!
//! Libraries only emit `tracing` events. Installing a subscriber is the
//! host's call; this is the default one.

use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Installs a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already set, in which case
/// nothing changes. Safe to call more than once.
pub fn init_logging() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_a_no_op() {
        init_logging();
        assert!(!init_logging());
    }
}
