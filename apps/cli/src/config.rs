//! # Configuration
//!
//! Settings for the command shell.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKROOM_CURRENCY_SYMBOL=€                                        │
//! │     STOCKROOM_SEED_DEMO=false                                          │
//! │     STOCKROOM_LOW_STOCK_THRESHOLD=3                                    │
//! │     STOCKROOM_LOG=debug                                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/stockroom/stockroom.toml (Linux)                         │
//! │     ~/Library/Application Support/dev.stockroom.stockroom/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logging starts on the default filter before this file is read, so load
//! warnings are visible. `[logging] filter` then replaces it, unless
//! `RUST_LOG` is set; see `init_tracing` in the crate root.
//!
//! ## Configuration File Format
//! ```toml
//! [display]
//! currency_symbol = "$"
//!
//! [inventory]
//! seed_demo_data = true
//! low_stock_threshold = 5
//!
//! [logging]
//! filter = "info,stockroom=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{CliError, CliResult};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "stockroom.toml";

// =============================================================================
// Sections
// =============================================================================

/// How amounts are shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Catalog start-up and reporting behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySettings {
    /// Pre-load the demo products at start-up.
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,

    /// `flagged` lists in-stock items at or below this many units.
    /// Zero turns the low-stock section off.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
}

fn default_true() -> bool {
    true
}

fn default_low_stock_threshold() -> i64 {
    5
}

impl Default for InventorySettings {
    fn default() -> Self {
        InventorySettings {
            seed_demo_data: true,
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

/// Log filter directives in `EnvFilter` syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    crate::DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete shell configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub inventory: InventorySettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform config dir)
    /// 3. Environment variables
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if anything goes wrong.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Reads and parses one TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        debug!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CliError::ConfigLoadFailed(format!("{}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses TOML text. Missing sections and keys fall back to defaults.
    pub fn from_toml_str(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if self.display.currency_symbol.trim().is_empty() {
            return Err(CliError::InvalidConfig(
                "currency_symbol must not be empty".into(),
            ));
        }

        if self.inventory.low_stock_threshold < 0 {
            return Err(CliError::InvalidConfig(
                "low_stock_threshold must not be negative".into(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(CliError::InvalidConfig("logging filter must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `STOCKROOM_*` overrides read through `lookup`.
    ///
    /// `load` passes the process environment; tests pass a map.
    /// Unparseable values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(symbol) = lookup("STOCKROOM_CURRENCY_SYMBOL") {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.display.currency_symbol = symbol;
        }

        if let Some(seed) = lookup("STOCKROOM_SEED_DEMO") {
            match seed.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.inventory.seed_demo_data = true,
                "0" | "false" | "no" | "off" => self.inventory.seed_demo_data = false,
                _ => warn!(value = %seed, "Unknown STOCKROOM_SEED_DEMO value"),
            }
        }

        if let Some(threshold) = lookup("STOCKROOM_LOW_STOCK_THRESHOLD") {
            match threshold.parse::<i64>() {
                Ok(t) => self.inventory.low_stock_threshold = t,
                Err(_) => warn!(value = %threshold, "Unparseable STOCKROOM_LOW_STOCK_THRESHOLD"),
            }
        }

        if let Some(filter) = lookup("STOCKROOM_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "stockroom", "stockroom")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.display.currency_symbol, "$");
        assert!(config.inventory.seed_demo_data);
        assert_eq!(config.inventory.low_stock_threshold, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [inventory]
            low_stock_threshold = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.inventory.low_stock_threshold, 2);
        assert!(config.inventory.seed_demo_data);
        assert_eq!(config.display.currency_symbol, "$");
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_bad_toml_is_error() {
        let err = AppConfig::from_toml_str("[inventory\n").unwrap_err();
        assert!(matches!(err, CliError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.inventory.low_stock_threshold = -1;
        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));

        let mut config = AppConfig::default();
        config.display.currency_symbol = " ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("STOCKROOM_CURRENCY_SYMBOL", "€"),
            ("STOCKROOM_SEED_DEMO", "off"),
            ("STOCKROOM_LOW_STOCK_THRESHOLD", "not-a-number"),
            ("STOCKROOM_LOG", "warn"),
        ]);

        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.display.currency_symbol, "€");
        assert!(!config.inventory.seed_demo_data);
        // Bad value ignored
        assert_eq!(config.inventory.low_stock_threshold, 5);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\ncurrency_symbol = \"£\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.display.currency_symbol, "£");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            AppConfig::from_file(&missing),
            Err(CliError::ConfigLoadFailed(_))
        ));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = AppConfig::default();
        config.inventory.low_stock_threshold = 9;
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
    }
}
