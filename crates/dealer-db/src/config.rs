//! # Settings
//!
//! Where the database lives and how reports are rendered.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults                                                            │
//! │  2. dealer.toml   explicit path, else <platform config dir>/dealer.toml │
//! │  3. Environment   DEALER_DB_PATH, DEALER_CURRENCY_SYMBOL,               │
//! │                   DEALER_REPORT_LAYOUT                                  │
//! │                                                                         │
//! │  database.path unset after all three?                                   │
//! │  └── <platform data dir>/dealer.db, else ./dealer.db                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example `dealer.toml`
//! ```toml
//! [database]
//! path = "/srv/dealer/dealer.db"
//! max_connections = 5
//!
//! [reports]
//! currency_symbol = "Rs."
//! layout = "compact"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::pool::DbConfig;
use dealer_core::report::ReportLayout;
use dealer_core::DEFAULT_CURRENCY_SYMBOL;

/// File name used for both the settings file and the default database.
pub const SETTINGS_FILE_NAME: &str = "dealer.toml";
pub const DATABASE_FILE_NAME: &str = "dealer.db";

pub const ENV_DB_PATH: &str = "DEALER_DB_PATH";
pub const ENV_CURRENCY_SYMBOL: &str = "DEALER_CURRENCY_SYMBOL";
pub const ENV_REPORT_LAYOUT: &str = "DEALER_REPORT_LAYOUT";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),

    #[error("No settings path available")]
    NoPath,
}

pub type SettingsResult<T> = Result<T, SettingsError>;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Database file. Unset means the platform default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    30
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default)]
    pub layout: ReportLayout,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            currency_symbol: default_currency_symbol(),
            layout: ReportLayout::default(),
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub reports: ReportSettings,
}

impl Settings {
    /// Loads settings from `config_path` (or the platform default), then
    /// applies environment overrides and validates.
    ///
    /// A missing file is not an error; defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> SettingsResult<Self> {
        let mut settings = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading settings from file");
                let contents = std::fs::read_to_string(&path)?;
                settings = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Settings file not found, using defaults");
            }
        }

        settings.apply_env_overrides();
        settings.validate()?;

        Ok(settings)
    }

    /// Like [`Settings::load`] but falls back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load settings: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the settings as TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> SettingsResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(SettingsError::NoPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, toml::to_string_pretty(self)?)?;

        info!(?path, "Settings saved");
        Ok(())
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if self.database.max_connections == 0 {
            return Err(SettingsError::Invalid(
                "database.max_connections must be at least 1".into(),
            ));
        }

        if let Some(path) = &self.database.path {
            if path.as_os_str().is_empty() {
                return Err(SettingsError::Invalid("database.path is empty".into()));
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup` (the process environment in
    /// production). Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL) {
            self.reports.currency_symbol = symbol;
        }

        if let Some(layout) = lookup(ENV_REPORT_LAYOUT) {
            match layout.to_lowercase().as_str() {
                "wide" => self.reports.layout = ReportLayout::Wide,
                "compact" => self.reports.layout = ReportLayout::Compact,
                _ => warn!(layout = %layout, "Unknown report layout in environment"),
            }
        }
    }

    /// Default settings file location.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "dealer", "desk")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
    }

    /// Default database location when none is configured.
    pub fn default_database_path() -> PathBuf {
        directories::ProjectDirs::from("com", "dealer", "desk")
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(".").join(DATABASE_FILE_NAME))
    }

    /// Configured database path, or the default.
    pub fn database_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(Self::default_database_path)
    }

    /// Pool configuration for [`crate::Database::new`].
    pub fn to_db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path())
            .max_connections(self.database.max_connections)
            .connect_timeout(Duration::from_secs(self.database.connect_timeout_secs))
    }

    /// Creates the directory that will hold the database file.
    pub fn ensure_database_dir(&self) -> SettingsResult<PathBuf> {
        let path = self.database_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !Path::new(parent).exists() {
                info!(dir = ?parent, "Creating data directory");
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(path)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.database.path, None);
        assert_eq!(settings.database.max_connections, 5);
        assert_eq!(settings.reports.currency_symbol, "Rs.");
        assert_eq!(settings.reports.layout, ReportLayout::Wide);
        assert!(settings.database_path().ends_with(DATABASE_FILE_NAME));
    }

    #[test]
    fn test_parse_partial_file() {
        let settings: Settings = toml::from_str(
            r#"
            [database]
            path = "/var/lib/dealer/stock.db"

            [reports]
            layout = "compact"
            "#,
        )
        .unwrap();

        assert_eq!(settings.database_path(), PathBuf::from("/var/lib/dealer/stock.db"));
        assert_eq!(settings.database.connect_timeout_secs, 30);
        assert_eq!(settings.reports.layout, ReportLayout::Compact);
        assert_eq!(settings.reports.currency_symbol, "Rs.");
    }

    #[test]
    fn test_overrides() {
        let mut settings = Settings::default();
        settings.apply_overrides(env(&[
            (ENV_DB_PATH, "/tmp/override.db"),
            (ENV_CURRENCY_SYMBOL, "PKR "),
            (ENV_REPORT_LAYOUT, "Compact"),
        ]));

        assert_eq!(settings.database.path, Some(PathBuf::from("/tmp/override.db")));
        assert_eq!(settings.reports.currency_symbol, "PKR ");
        assert_eq!(settings.reports.layout, ReportLayout::Compact);
    }

    #[test]
    fn test_blank_and_unknown_overrides_are_ignored() {
        let mut settings = Settings::default();
        settings.apply_overrides(env(&[(ENV_DB_PATH, "  "), (ENV_REPORT_LAYOUT, "landscape")]));

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_validate() {
        let mut settings = Settings::default();
        settings.database.max_connections = 0;
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));

        let mut settings = Settings::default();
        settings.database.path = Some(PathBuf::new());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join(SETTINGS_FILE_NAME);

        let mut settings = Settings::default();
        settings.database.path = Some(dir.path().join("dealer.db"));
        settings.reports.layout = ReportLayout::Compact;
        settings.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded: Settings = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "[database\npath = 3").unwrap();

        let err = Settings::load(Some(path.clone())).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));

        // load_or_default swallows it.
        let settings = Settings::load_or_default(Some(path));
        assert_eq!(settings.database.max_connections, 5);
    }

    #[test]
    fn test_to_db_config() {
        let mut settings = Settings::default();
        settings.database.path = Some(PathBuf::from("/data/dealer.db"));
        settings.database.max_connections = 3;
        settings.database.connect_timeout_secs = 7;

        let config = settings.to_db_config();
        assert_eq!(config.database_path, PathBuf::from("/data/dealer.db"));
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.connect_timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_ensure_database_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.database.path = Some(dir.path().join("a").join("b").join("dealer.db"));

        let path = settings.ensure_database_dir().unwrap();
        assert!(path.parent().unwrap().is_dir());
    }
}
