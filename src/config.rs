//! Configuration module for hearth-pin.

use serde::Deserialize;
use std::path::Path;

use crate::auth::LockoutPolicy;
use crate::{HearthPinError, Result};

/// PIN lockout policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PinPolicyConfig {
    /// Failed attempts that trigger a lockout.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Lockout duration in seconds.
    #[serde(default = "default_lockout_duration")]
    pub lockout_duration_secs: i64,
}

fn default_max_attempts() -> u32 {
    5
}

fn default_lockout_duration() -> i64 {
    15 * 60
}

impl Default for PinPolicyConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            lockout_duration_secs: default_lockout_duration(),
        }
    }
}

impl PinPolicyConfig {
    /// Build the lockout policy this configuration describes.
    pub fn lockout_policy(&self) -> LockoutPolicy {
        LockoutPolicy::with_config(self.max_attempts, self.lockout_duration_secs)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace / debug / info / warn / error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/hearth-pin.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// PIN lockout policy settings.
    #[serde(default)]
    pub pin: PinPolicyConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| HearthPinError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
