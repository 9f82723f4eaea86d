//! Logging setup.
//!
//! `RUST_LOG` takes precedence over the configured level.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Installs the global `tracing` subscriber.
pub fn init_logging(config: &LogConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| TelemetryError::Filter(e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    if config.json {
        builder
            .json()
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))
    } else {
        builder
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))
    }
}
