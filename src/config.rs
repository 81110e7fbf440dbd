//! Server configuration
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! or missing file yields a working configuration. Command-line flags are
//! applied on top by `main`.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SYNC_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_SYNC_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SERVER_CATEGORY: &str = "Server";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
}

/// Remote quote source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Run the periodic sync task
    pub enabled: bool,
    /// Seconds between sync cycles
    pub interval_secs: u64,
    /// URL answering GET with a list of posts and accepting POSTed quotes
    pub endpoint: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Category assigned to every quote fetched from the endpoint
    pub category: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
            endpoint: DEFAULT_SYNC_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_SYNC_TIMEOUT_SECS,
            category: DEFAULT_SERVER_CATEGORY.to_string(),
        }
    }
}

impl SyncConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `QUOTEBOOK_LOG` is unset (e.g., "info", "quotebook_mcp=debug")
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot work
    pub fn validate(&self) -> Result<()> {
        if self.sync.interval_secs == 0 {
            bail!("sync.interval_secs must be greater than zero");
        }
        if self.sync.timeout_secs == 0 {
            bail!("sync.timeout_secs must be greater than zero");
        }
        if self.sync.enabled && self.sync.endpoint.trim().is_empty() {
            bail!("sync.endpoint must be set when sync is enabled");
        }
        if self.sync.category.trim().is_empty() {
            bail!("sync.category must not be empty");
        }
        Ok(())
    }
}
