//! Configuration Loading for Sabq Core.
//!
//! [`ConfigLoader`] locates `config.toml`, deserializes it, applies default
//! values and validates the result.
//!
//! ```rust,ignore
//! use sabq_core::config::ConfigLoader;
//!
//! let config = ConfigLoader::load()?;
//! println!("Logging level: {}", config.logging.level);
//! ```
//!
//! ## Configuration File Location
//!
//! `ConfigLoader::load()` reads `config.toml` from the application config
//! directory ([`get_app_config_dir`]). A missing file yields the defaults.
//! `ConfigLoader::load_from_path()` reads an explicit file instead.
//!
//! ## Validation
//!
//! - Log level, log format, storage backend and theme mode are normalized to
//!   lowercase and checked against their allowed values.
//! - A relative log file path is resolved against the state directory.
//! - A relative settings file path is resolved against the data directory
//!   (only for the filesystem backend).
//! - Parent directories for both files are created.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::fs as sabq_fs;
use crate::utils::paths::{get_app_config_dir, get_app_data_dir, get_app_state_dir};

const CONFIG_FILE_NAME: &str = "config.toml";

/// `ConfigLoader` provides static methods to load and validate `CoreConfig`.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates `config.toml` from the application config directory.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::DirectoryUnavailable`] if the config directory cannot be determined.
    /// - [`ConfigError::ReadError`] for read failures other than "not found".
    /// - [`ConfigError::ParseError`] for invalid TOML or unknown fields.
    /// - [`ConfigError::ValidationError`] for invalid values.
    pub fn load() -> Result<CoreConfig, CoreError> {
        let path = get_app_config_dir()?.join(CONFIG_FILE_NAME);
        Self::load_from_path(&path)
    }

    /// Loads and validates an explicit configuration file. A missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<CoreConfig, CoreError> {
        let content = Self::read_config_file(path)?;
        Self::load_from_str(&content)
    }

    /// The file's content, or an empty string when it does not exist.
    fn read_config_file(path: &Path) -> Result<String, CoreError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No configuration at {:?}, using defaults", path);
                Ok(String::new())
            }
            Err(e) => Err(CoreError::Config(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })),
        }
    }

    /// Parses and validates TOML content. Empty content yields defaults.
    pub fn load_from_str(content: &str) -> Result<CoreConfig, CoreError> {
        let mut config: CoreConfig = if content.trim().is_empty() {
            CoreConfig::default()
        } else {
            toml::from_str(content).map_err(|e| CoreError::Config(ConfigError::ParseError(e)))?
        };
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    fn normalize_choice(value: &mut String, allowed: &[&str], what: &str) -> Result<(), CoreError> {
        let lower = value.to_lowercase();
        if allowed.contains(&lower.as_str()) {
            *value = lower;
            Ok(())
        } else {
            Err(CoreError::Config(ConfigError::ValidationError(format!(
                "Invalid {}: '{}'. Must be one of {}.",
                what,
                value,
                allowed.join(", ")
            ))))
        }
    }

    fn resolve_path(
        path: &Path,
        base: impl FnOnce() -> Result<PathBuf, CoreError>,
    ) -> Result<PathBuf, CoreError> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base()?.join(path)
        };
        if let Some(parent) = absolute.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                sabq_fs::ensure_dir_exists(parent)?;
            }
        }
        Ok(absolute)
    }

    /// Validates the loaded `CoreConfig`, normalizing values and resolving paths.
    pub fn validate_config(config: &mut CoreConfig) -> Result<(), CoreError> {
        const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
        Self::normalize_choice(&mut config.logging.level, LEVELS, "log level")?;
        Self::normalize_choice(&mut config.logging.format, &["text", "json"], "log format")?;
        Self::normalize_choice(
            &mut config.storage.backend,
            &["memory", "filesystem"],
            "storage backend",
        )?;
        Self::normalize_choice(
            &mut config.appearance.theme_mode,
            &["light", "dark", "system"],
            "theme mode",
        )?;

        if config.appearance.default_theme_id.trim().is_empty() {
            return Err(CoreError::Config(ConfigError::ValidationError(
                "appearance.default_theme_id must not be empty.".to_string(),
            )));
        }
        if config.appearance.event_capacity == 0 {
            return Err(CoreError::Config(ConfigError::ValidationError(
                "appearance.event_capacity must be greater than zero.".to_string(),
            )));
        }

        if let Some(log_path) = config.logging.file_path.take() {
            config.logging.file_path = Some(Self::resolve_path(&log_path, get_app_state_dir)?);
        }

        if config.storage.backend == "filesystem" {
            let settings_path = config
                .storage
                .file_path
                .take()
                .unwrap_or_else(|| PathBuf::from("settings.json"));
            config.storage.file_path = Some(Self::resolve_path(&settings_path, get_app_data_dir)?);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = dir.path().join("data/settings.json");
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            format!("[storage]\nfile_path = {:?}\n", settings.to_string_lossy()),
        )
        .unwrap();

        let config = ConfigLoader::load_from_path(&config_path).unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.storage.backend, "filesystem");
        assert_eq!(config.storage.file_path, Some(settings.clone()));
        assert!(settings.parent().unwrap().is_dir());
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent/config.toml");

        assert_eq!(ConfigLoader::read_config_file(&missing).unwrap(), "");
        assert!(!missing.exists());
    }

    #[test]
    fn test_unreadable_path_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        match ConfigLoader::read_config_file(dir.path()) {
            Err(CoreError::Config(ConfigError::ReadError { path, .. })) => {
                assert_eq!(path, dir.path())
            }
            other => panic!("Expected ReadError, got {:?}", other),
        }
    }

    #[test]
    fn test_unset_sections_take_defaults() {
        let config = ConfigLoader::load_from_str("[storage]\nbackend = \"memory\"\n").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "text");
        assert_eq!(config.logging.file_path, None);
        assert_eq!(config.appearance.theme_mode, "light");
        assert_eq!(config.appearance.default_theme_id, "sabq-light");
        assert_eq!(config.appearance.event_capacity, 64);
    }

    #[test]
    fn test_values_are_normalized() {
        let config = ConfigLoader::load_from_str(concat!(
            "[logging]\nlevel = \"DEBUG\"\nformat = \"JSON\"\n",
            "[storage]\nbackend = \"Memory\"\n",
            "[appearance]\ntheme_mode = \"System\"\n",
        ))
        .unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.appearance.theme_mode, "system");
    }

    #[test]
    fn test_invalid_theme_mode_is_rejected() {
        let result = ConfigLoader::load_from_str(
            "[storage]\nbackend = \"memory\"\n[appearance]\ntheme_mode = \"quantum\"\n",
        );
        match result {
            Err(CoreError::Config(ConfigError::ValidationError(msg))) => {
                assert!(msg.contains("theme mode"))
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let result = ConfigLoader::load_from_str("this is = = not toml");
        assert!(matches!(result, Err(CoreError::Config(ConfigError::ParseError(_)))));
    }

    #[test]
    fn test_zero_event_capacity_is_rejected() {
        let result = ConfigLoader::load_from_str(
            "[storage]\nbackend = \"memory\"\n[appearance]\nevent_capacity = 0\n",
        );
        assert!(matches!(result, Err(CoreError::Config(ConfigError::ValidationError(_)))));
    }
}
