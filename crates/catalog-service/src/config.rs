//! # Catalog Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CATALOG_DB_PATH=./catalog.db                                       │
//! │     CATALOG_MAINTENANCE_HOUR=3                                         │
//! │     CATALOG_MAINTENANCE_ENABLED=false                                  │
//! │     CATALOG_CACHE_TTL_SECS=30                                          │
//! │     CATALOG_LOG_JSON=true                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/catalog/catalog.toml (Linux)                             │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "./catalog.db"
//! max_connections = 5
//!
//! [rules]
//! max_products_per_category = 15
//! max_categories = 15
//! update_category_threshold = 10
//!
//! [maintenance]
//! enabled = true
//! hour = 22
//!
//! [cache]
//! ttl_secs = 60
//!
//! [logging]
//! filter = "info,catalog=debug,sqlx=warn"
//! json = false
//! ```

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use catalog_core::RuleLimits;
use catalog_db::DbConfig;

use crate::error::{ServiceError, ServiceResult};
use crate::maintenance::DEFAULT_MAINTENANCE_HOUR;

const CONFIG_FILE_NAME: &str = "catalog.toml";
const DB_FILE_NAME: &str = "catalog.db";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "catalog", "catalog")
}

// =============================================================================
// Database Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file, or `:memory:`.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseSettings {
    pub fn to_db_config(&self) -> DbConfig {
        let config = DbConfig::new(&self.path);
        if config.is_in_memory() {
            return DbConfig::in_memory();
        }
        config.max_connections(self.max_connections)
    }
}

// =============================================================================
// Maintenance Settings
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceSettings {
    /// When false, listings are never refused.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Local hour (0-23) during which listings are refused.
    #[serde(default = "default_maintenance_hour")]
    pub hour: u32,
}

fn default_true() -> bool {
    true
}

fn default_maintenance_hour() -> u32 {
    DEFAULT_MAINTENANCE_HOUR
}

impl Default for MaintenanceSettings {
    fn default() -> Self {
        MaintenanceSettings {
            enabled: true,
            hour: DEFAULT_MAINTENANCE_HOUR,
        }
    }
}

// =============================================================================
// Cache Settings
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

fn default_cache_ttl() -> u64 {
    60
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            ttl_secs: default_cache_ttl(),
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Emit one JSON object per event instead of plain text.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "info,catalog=debug,sqlx=warn".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
            json: false,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Business rule thresholds.
    #[serde(default)]
    pub rules: RuleLimits,

    #[serde(default)]
    pub maintenance: MaintenanceSettings,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl CatalogConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform config directory)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ServiceResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading catalog config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> ServiceResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> ServiceResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ServiceResult<()> {
        if self.maintenance.hour > 23 {
            return Err(ServiceError::Config(format!(
                "maintenance.hour must be between 0 and 23, got {}",
                self.maintenance.hour
            )));
        }

        if self.database.max_connections == 0 {
            return Err(ServiceError::Config(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        if self.rules.max_products_per_category == 0 {
            return Err(ServiceError::Config(
                "rules.max_products_per_category must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("CATALOG_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Ok(hour) = std::env::var("CATALOG_MAINTENANCE_HOUR") {
            match hour.parse::<u32>() {
                Ok(h) => self.maintenance.hour = h,
                Err(_) => warn!(hour = %hour, "Ignoring invalid CATALOG_MAINTENANCE_HOUR"),
            }
        }

        if let Ok(enabled) = std::env::var("CATALOG_MAINTENANCE_ENABLED") {
            if let Some(flag) = parse_flag(&enabled) {
                self.maintenance.enabled = flag;
            }
        }

        if let Ok(ttl) = std::env::var("CATALOG_CACHE_TTL_SECS") {
            if let Ok(secs) = ttl.parse::<u64>() {
                self.cache.ttl_secs = secs;
            }
        }

        if let Ok(json) = std::env::var("CATALOG_LOG_JSON") {
            if let Some(flag) = parse_flag(&json) {
                self.logging.json = flag;
            }
        }
    }

    /// `<config dir>/catalog.toml` for this platform.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            warn!(value = other, "Ignoring unrecognized boolean flag");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.rules, RuleLimits::default());
        assert_eq!(config.maintenance.hour, 22);
        assert!(config.maintenance.enabled);
        assert_eq!(config.cache.ttl(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CatalogConfig::from_toml(
            r#"
            [rules]
            max_categories = 20

            [maintenance]
            hour = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.rules.max_categories, 20);
        assert_eq!(config.rules.max_products_per_category, 15);
        assert_eq!(config.rules.update_category_threshold, 10);
        assert_eq!(config.maintenance.hour, 3);
        assert!(config.maintenance.enabled);
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn test_invalid_hour_rejected() {
        let mut config = CatalogConfig::default();
        config.maintenance.hour = 24;
        assert!(matches!(config.validate(), Err(ServiceError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = CatalogConfig::from_toml("[rules\nmax = ").unwrap_err();
        assert!(matches!(err, ServiceError::Config(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CatalogConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("[maintenance]"));
        assert_eq!(CatalogConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_in_memory_database_setting() {
        let settings = DatabaseSettings {
            path: PathBuf::from(":memory:"),
            max_connections: 5,
        };
        let db = settings.to_db_config();
        assert!(db.is_in_memory());
        assert_eq!(db.max_connections, 1);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
