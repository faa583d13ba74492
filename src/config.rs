//! Analyzer configuration
//!
//! Every setting has a default; a TOML file given with `--config` overrides
//! the defaults and CLI flags override the file.

use crate::error::ConfigError;
use crate::registry::{DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE, DEFAULT_TIMEOUT, NPM_REGISTRY_URL};
use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

/// Default HTTP listen address
pub const DEFAULT_BIND: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(Ipv4Addr::LOCALHOST),
    3000,
);

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub registry: RegistrySettings,
    pub batch: BatchSettings,
    pub server: ServerSettings,
}

/// Upstream registry settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrySettings {
    /// Registry base URL
    pub url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            url: NPM_REGISTRY_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// Lookup batching settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BatchSettings {
    /// Concurrent lookups per group
    pub size: usize,
    /// Pause between groups in milliseconds
    pub delay_ms: u64,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_BATCH_SIZE,
            delay_ms: DEFAULT_BATCH_DELAY.as_millis() as u64,
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    pub bind: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: DEFAULT_BIND }
    }
}

impl AnalyzerConfig {
    /// Load configuration from an optional file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch.size == 0 {
            return Err(ConfigError::invalid_value(
                "batch.size",
                "must be greater than zero",
            ));
        }
        if self.registry.timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "registry.timeout_secs",
                "must be greater than zero",
            ));
        }
        if !(self.registry.url.starts_with("http://") || self.registry.url.starts_with("https://"))
        {
            return Err(ConfigError::invalid_value(
                "registry.url",
                format!("'{}' is not an http(s) URL", self.registry.url),
            ));
        }
        Ok(())
    }

    /// Per-request registry timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.registry.timeout_secs)
    }

    /// Pause between lookup groups
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch.delay_ms)
    }
}
