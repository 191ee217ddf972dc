//! Configuration management for ledgerweb
//!
//! Loads and validates YAML configuration for the surrounding application.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the ledger directory
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Main ledger file name
    #[serde(default = "default_main_file")]
    pub main_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            main_file: default_main_file(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_main_file() -> String {
    "main.ledger".to_string()
}

/// Display settings for amounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Currency assumed when a posting carries none
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// Number of decimal places shown
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Data directory settings
    #[serde(default)]
    pub data: DataConfig,
    /// Currency display settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }
        let content = std::fs::read_to_string(&path)?;

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::InvalidYaml {
                message: e.to_string(),
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.data.main_file.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data.main_file".to_string(),
                reason: "Main file name must not be empty".to_string(),
            });
        }
        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }
        Ok(())
    }

    /// Get the full path to the main ledger file
    pub fn ledger_path(&self) -> PathBuf {
        self.data.path.join(&self.data.main_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.data.main_file, "main.ledger");
        assert_eq!(config.currency.default_currency, "INR");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());

        // Config::default() matches the serde defaults
        let fallback = Config::default();
        assert_eq!(fallback.data.main_file, config.data.main_file);
        assert_eq!(fallback.logging.level, config.logging.level);
    }

    #[test]
    fn test_partial_overrides() {
        let yaml = "data:\n  path: /tmp/ledgers\n  main_file: household.ledger\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.data.main_file, "household.ledger");
        assert_eq!(
            config.ledger_path(),
            PathBuf::from("/tmp/ledgers/household.ledger")
        );
        // untouched sections keep their defaults
        assert_eq!(config.currency.decimal_places, 2);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let yaml = "currency:\n  decimal_places: 30\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
