//! Server configuration with validation.
//!
//! Defaults are overlaid with `AUTORES_*` environment variables by [`ServerConfig::from_env`].

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;

pub const ENV_HOST: &str = "AUTORES_HOST";
pub const ENV_PORT: &str = "AUTORES_PORT";
pub const ENV_LOG: &str = "AUTORES_LOG";
pub const ENV_LOG_JSON: &str = "AUTORES_LOG_JSON";
pub const ENV_SEED: &str = "AUTORES_SEED";

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP listener configuration
    pub http: HttpConfig,
    /// Logging configuration
    pub log: LogConfig,
    /// Whether the collection starts with the seed authors
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            log: LogConfig::default(),
            seed: true,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Bind port
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info` or `autores_core=debug`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ServerConfig {
    /// Builds a configuration from defaults and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from defaults and the given variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup(ENV_HOST) {
            config.http.host = parse(ENV_HOST, &host)?;
        }
        if let Some(port) = lookup(ENV_PORT) {
            config.http.port = parse(ENV_PORT, &port)?;
        }
        if let Some(level) = lookup(ENV_LOG) {
            config.log.level = level;
        }
        if let Some(json) = lookup(ENV_LOG_JSON) {
            config.log.json = parse_flag(ENV_LOG_JSON, &json)?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            config.seed = parse_flag(ENV_SEED, &seed)?;
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.log.level.trim().is_empty() {
            return Err(ConfigError::EmptyLogLevel);
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("port cannot be 0")]
    InvalidPort,

    #[error("log level cannot be empty")]
    EmptyLogLevel,
}
