//! Configuration management for groundcontrol.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::matching::TagMatch;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "groundcontrol";

/// Default workbook directory name under the data directory.
const WORKBOOK_DIR_NAME: &str = "board";

/// Default secrets file name under the config directory.
const SECRETS_FILE_NAME: &str = "secrets.toml";

/// Default log directory name under the data directory.
const LOG_DIR_NAME: &str = "logs";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `GROUNDCONTROL_`, `__` nesting)
/// 2. TOML config file at `~/.config/groundcontrol/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Row store configuration.
    pub store: StoreConfig,
    /// Matching and scoring configuration.
    pub matching: MatchingConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Row-store-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the workbook directory holding the tab files.
    /// Defaults to `~/.local/share/groundcontrol/board`.
    pub workbook_dir: Option<PathBuf>,
    /// Tab name for the pilot roster.
    pub pilots_tab: String,
    /// Tab name for the drone fleet.
    pub drones_tab: String,
    /// Tab name for the mission list.
    pub missions_tab: String,
    /// Path to the TOML secrets file holding the service-account payload.
    /// Defaults to `~/.config/groundcontrol/secrets.toml`.
    pub secrets_path: Option<PathBuf>,
}

/// Matching and scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// How requested tags are matched against roster tag fields.
    pub tag_match: TagMatch,
    /// Shortlist size for urgent reassignment suggestions.
    pub urgent_candidates: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether to keep a rolling log file in addition to console output.
    pub file_enabled: bool,
    /// Directory for rolling log files.
    /// Defaults to `~/.local/share/groundcontrol/logs`.
    pub dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            workbook_dir: None, // Will be resolved to default at runtime
            pilots_tab: "pilot_roster".to_string(),
            drones_tab: "drone_fleet".to_string(),
            missions_tab: "missions".to_string(),
            secrets_path: None,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            tag_match: TagMatch::Substring,
            urgent_candidates: 3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_enabled: true,
            dir: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `GROUNDCONTROL_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("GROUNDCONTROL_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.matching.urgent_candidates == 0 {
            return Err(Error::ConfigValidation {
                message: "urgent_candidates must be greater than 0".to_string(),
            });
        }

        for (field, tab) in [
            ("pilots_tab", &self.store.pilots_tab),
            ("drones_tab", &self.store.drones_tab),
            ("missions_tab", &self.store.missions_tab),
        ] {
            if tab.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: format!("{field} must not be empty"),
                });
            }
        }

        Ok(())
    }

    /// Get the workbook directory, resolving defaults if not set.
    #[must_use]
    pub fn workbook_dir(&self) -> PathBuf {
        self.store
            .workbook_dir
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(WORKBOOK_DIR_NAME))
    }

    /// Get the secrets file path, resolving defaults if not set.
    #[must_use]
    pub fn secrets_path(&self) -> PathBuf {
        self.store.secrets_path.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from(".config"))
                .join(DATA_DIR_NAME)
                .join(SECRETS_FILE_NAME)
        })
    }

    /// Get the log directory, or `None` when file logging is disabled.
    #[must_use]
    pub fn log_dir(&self) -> Option<PathBuf> {
        if !self.logging.file_enabled {
            return None;
        }
        Some(
            self.logging
                .dir
                .clone()
                .unwrap_or_else(|| Self::default_data_dir().join(LOG_DIR_NAME)),
        )
    }
}
