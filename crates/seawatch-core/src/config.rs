//! Configuration loading and typed config structures for Seawatch.
//!
//! The canonical configuration lives in `seawatch-config.yaml` at the
//! project root. Every section and field is optional; missing values fall
//! back to the defaults documented on each field.

use std::path::Path;

use chrono::Duration;
use seawatch_types::EventId;
use serde::Deserialize;

/// Longest zero-padding accepted for generated ids.
const MAX_ID_WIDTH: usize = 12;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is outside its allowed range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level tracker configuration.
///
/// Mirrors the structure of `seawatch-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TrackerConfig {
    /// Event id generation.
    #[serde(default)]
    pub store: StoreConfig,

    /// Threat score alerting.
    #[serde(default)]
    pub threat: ThreatConfig,

    /// Logging output.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Simulated sighting feed used by the demo binary.
    #[serde(default)]
    pub sightings: SightingConfig,
}

impl TrackerConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `SEAWATCH_LOG_LEVEL` overrides `logging.level` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.logging.apply_env_overrides();
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field and range constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.id_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "store.id_prefix",
                reason: String::from("must not be empty"),
            });
        }
        if self.store.id_width == 0 || self.store.id_width > MAX_ID_WIDTH {
            return Err(ConfigError::Invalid {
                field: "store.id_width",
                reason: format!("must be between 1 and {MAX_ID_WIDTH}"),
            });
        }
        let threshold = self.threat.alert_threshold;
        if threshold > 100 {
            return Err(ConfigError::Invalid {
                field: "threat.alert_threshold",
                reason: format!("{threshold} exceeds the maximum score of 100"),
            });
        }
        Ok(())
    }
}

/// Event id generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Prefix of generated ids (default `EVT`).
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Minimum digits of the zero-padded sequence number (default 3).
    #[serde(default = "default_id_width")]
    pub id_width: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            id_width: default_id_width(),
        }
    }
}

/// Threat score alerting settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThreatConfig {
    /// Scores at or above this value raise an alert (default 70).
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: u8,

    /// Minutes after event creation at which the alert is stamped
    /// (default 5).
    #[serde(default = "default_alert_delay_minutes")]
    pub alert_delay_minutes: u32,
}

impl ThreatConfig {
    /// The alert delay as a [`Duration`].
    pub fn alert_delay(&self) -> Duration {
        Duration::minutes(i64::from(self.alert_delay_minutes))
    }
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self {
            alert_threshold: default_alert_threshold(),
            alert_delay_minutes: default_alert_delay_minutes(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (default `info`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Apply `SEAWATCH_LOG_LEVEL` if it is set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SEAWATCH_LOG_LEVEL") {
            self.level = val;
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Simulated sighting feed settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SightingConfig {
    /// Seed for the sighting generator (default 42).
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of sightings to replay (default 10).
    #[serde(default = "default_sighting_count")]
    pub count: u32,
}

impl Default for SightingConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            count: default_sighting_count(),
        }
    }
}

fn default_id_prefix() -> String {
    String::from(EventId::DEFAULT_PREFIX)
}

const fn default_id_width() -> usize {
    EventId::DEFAULT_WIDTH
}

const fn default_alert_threshold() -> u8 {
    70
}

const fn default_alert_delay_minutes() -> u32 {
    5
}

fn default_log_level() -> String {
    String::from("info")
}

const fn default_seed() -> u64 {
    42
}

const fn default_sighting_count() -> u32 {
    10
}
