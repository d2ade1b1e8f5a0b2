//! Default configuration values for Sabq Core.
//!
//! These functions are used by `serde`'s `default` attribute in the configuration
//! structures when a value is missing from `config.toml`.

use crate::config::{AppearanceConfig, LoggingConfig, StorageConfig};
use std::path::PathBuf;

pub(crate) fn default_core_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level_spec(),
        file_path: default_log_file_path_spec(),
        format: default_log_format_spec(),
    }
}

/// `"info"`
pub(crate) fn default_log_level_spec() -> String {
    "info".to_string()
}

/// No log file by default.
pub(crate) fn default_log_file_path_spec() -> Option<PathBuf> {
    None
}

/// `"text"`
pub(crate) fn default_log_format_spec() -> String {
    "text".to_string()
}

pub(crate) fn default_core_storage_config() -> StorageConfig {
    StorageConfig {
        backend: default_storage_backend(),
        file_path: default_storage_file_path(),
    }
}

/// `"filesystem"`: settings survive restarts unless a caller opts out.
pub(crate) fn default_storage_backend() -> String {
    "filesystem".to_string()
}

/// Relative to the application data directory.
pub(crate) fn default_storage_file_path() -> Option<PathBuf> {
    Some(PathBuf::from("settings.json"))
}

pub(crate) fn default_core_appearance_config() -> AppearanceConfig {
    AppearanceConfig {
        theme_mode: default_theme_mode(),
        default_theme_id: default_theme_id(),
        event_capacity: default_event_capacity(),
    }
}

/// `"light"`
pub(crate) fn default_theme_mode() -> String {
    "light".to_string()
}

pub(crate) fn default_theme_id() -> String {
    "sabq-light".to_string()
}

pub(crate) fn default_event_capacity() -> usize {
    64
}
