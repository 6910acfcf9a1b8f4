//! Configuration management.
//!
//! Stores configuration in JSON format at `~/.hostscope/config.json`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Runtime settings for queries and kills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Deadline in seconds for every external command.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,

    /// Process kills refuse PIDs at or below this value.
    #[serde(default = "default_protected_pid_threshold")]
    pub protected_pid_threshold: i64,

    /// Look up names for netstat rows (Windows).
    #[serde(default = "default_true")]
    pub resolve_process_names: bool,

    /// Reuse a name lookup for repeated PIDs within one listing.
    #[serde(default)]
    pub cache_process_lookups: bool,
}

fn default_command_timeout() -> u64 {
    30
}

fn default_protected_pid_threshold() -> i64 {
    10
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command_timeout_secs: default_command_timeout(),
            protected_pid_threshold: default_protected_pid_threshold(),
            resolve_process_names: true,
            cache_process_lookups: false,
        }
    }
}

impl Config {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

/// Reads and writes [`Config`] on disk.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a store at the default path, `~/.hostscope/config.json`.
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        Ok(Self {
            config_path: home.join(".hostscope").join("config.json"),
        })
    }

    /// Create a store with a custom path (for testing).
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration, or defaults when the file doesn't exist.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration, creating the directory if needed.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(dir) = self.config_path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(config)?;

        // Write to a temp file then rename over the target
        let temp_path = self.config_path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path)
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;
        file.write_all(content.as_bytes())
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;
        file.sync_all()
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        debug!(path = %self.config_path.display(), "Saved config");
        Ok(())
    }
}
