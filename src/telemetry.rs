//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the configured directive. Returns false if a
/// subscriber was already installed, which is harmless (tests, embedding
/// hosts with their own subscriber).
pub fn init_tracing(config: &TelemetryConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::debug!(json = config.json, "Tracing initialised");
    }
    installed
}
