//! Configuration Data Structures for Sabq Core.
//!
//! # Key Structs
//! - [`CoreConfig`]: The root configuration structure.
//! - [`LoggingConfig`]: Log level, optional file and format.
//! - [`StorageConfig`]: Which backend holds persisted settings and where.
//! - [`AppearanceConfig`]: Startup theme mode and default palette.
//!
//! Missing fields take values from [`super::defaults`]; unknown fields are
//! rejected via `#[serde(deny_unknown_fields)]`.

use super::defaults;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration settings for the logging subsystem.
///
/// # Examples
///
/// ```
/// use sabq_core::config::LoggingConfig;
/// use std::path::PathBuf;
///
/// let default_log_config = LoggingConfig::default();
/// assert_eq!(default_log_config.level, "info");
/// assert_eq!(default_log_config.file_path, None);
/// assert_eq!(default_log_config.format, "text");
///
/// let toml_str = r#"
/// level = "debug"
/// file_path = "/var/log/sabq.log"
/// format = "json"
/// "#;
/// let log_config: LoggingConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(log_config.file_path, Some(PathBuf::from("/var/log/sabq.log")));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of "trace", "debug", "info", "warn", "error" (case-insensitive).
    #[serde(default = "defaults::default_log_level_spec")]
    pub level: String,
    /// Optional log file. Relative paths resolve against the application state directory.
    #[serde(default = "defaults::default_log_file_path_spec")]
    pub file_path: Option<PathBuf>,
    /// "text" or "json".
    #[serde(default = "defaults::default_log_format_spec")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_core_logging_config()
    }
}

/// Where persisted settings live.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// "memory" or "filesystem".
    #[serde(default = "defaults::default_storage_backend")]
    pub backend: String,
    /// JSON document used by the filesystem backend. Relative paths resolve
    /// against the application data directory.
    #[serde(default = "defaults::default_storage_file_path")]
    pub file_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        defaults::default_core_storage_config()
    }
}

/// Startup appearance preferences.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppearanceConfig {
    /// "light", "dark" or "system". Only used when no mode has been persisted yet.
    #[serde(default = "defaults::default_theme_mode")]
    pub theme_mode: String,
    /// Preset applied when nothing has been persisted yet.
    #[serde(default = "defaults::default_theme_id")]
    pub default_theme_id: String,
    /// Capacity of the change-event broadcast channels.
    #[serde(default = "defaults::default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        defaults::default_core_appearance_config()
    }
}

/// Root configuration structure for Sabq.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    #[serde(default = "defaults::default_core_logging_config")]
    pub logging: LoggingConfig,
    #[serde(default = "defaults::default_core_storage_config")]
    pub storage: StorageConfig,
    #[serde(default = "defaults::default_core_appearance_config")]
    pub appearance: AppearanceConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            logging: defaults::default_core_logging_config(),
            storage: defaults::default_core_storage_config(),
            appearance: defaults::default_core_appearance_config(),
        }
    }
}
