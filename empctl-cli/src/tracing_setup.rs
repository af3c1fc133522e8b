//! Tracing setup for empctl CLI
//!
//! Usage:
//!   empctl --debug ...              # Debug logging to stderr
//!   RUST_LOG=empctl_core=trace empctl  # Fine-grained log control
//!
//! Logs always go to stderr so they never interleave with the menu and
//! tables written to stdout.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Level used when neither RUST_LOG, --debug, nor the config file set one.
pub const DEFAULT_LEVEL: &str = "warn";

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets debug level unless RUST_LOG is set)
    pub debug: bool,
    /// `[logging] level` from the config file
    pub level: Option<String>,
}

impl TracingConfig {
    fn fallback_level(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            self.level.as_deref().unwrap_or(DEFAULT_LEVEL)
        }
    }
}

/// Initialize console tracing on stderr
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.fallback_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_wins_over_config_level() {
        let config = TracingConfig {
            debug: true,
            level: Some("error".to_string()),
        };
        assert_eq!(config.fallback_level(), "debug");
    }

    #[test]
    fn config_level_then_default() {
        let config = TracingConfig {
            debug: false,
            level: Some("info".to_string()),
        };
        assert_eq!(config.fallback_level(), "info");
        assert_eq!(TracingConfig::default().fallback_level(), DEFAULT_LEVEL);
    }
}
