//! Logging setup
//!
//! Library logs go to stderr so that command output on stdout (bindings JSON,
//! the catalog table) stays machine-readable.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Logging options from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Output format
    pub format: LogFormat,
    /// Lower the default level to `debug`
    pub verbose: bool,
}

impl ObservabilityConfig {
    /// Filter used when `RUST_LOG` is not set
    #[must_use]
    pub const fn default_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn,crudgen=info"
        }
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `-v`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(config: ObservabilityConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));

    let registry = tracing_subscriber::registry().with(env_filter);
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match config.format {
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
    }
    .context("Failed to initialize logging")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.default_filter(), "warn,crudgen=info");
    }

    #[test]
    fn test_verbose_filter() {
        let config = ObservabilityConfig {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.default_filter(), "debug");
    }
}
