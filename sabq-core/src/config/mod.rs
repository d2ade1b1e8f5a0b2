//! Configuration Management for Sabq Core.
//!
//! ## Key Components:
//!
//! - [`types`]: the configuration schema ([`CoreConfig`], [`LoggingConfig`],
//!   [`StorageConfig`], [`AppearanceConfig`]).
//! - [`defaults`]: default values used by serde when a field is missing.
//! - [`loader`]: [`ConfigLoader`], which reads `config.toml`, applies defaults
//!   and validates the result.
//!
//! ## Configuration Loading Process:
//!
//! 1. `ConfigLoader::load()` looks for `config.toml` in the application config
//!    directory (see [`crate::utils::paths`]). A missing file yields defaults.
//! 2. The TOML content is parsed into [`CoreConfig`]; unknown fields are rejected.
//! 3. Validation normalizes enumerated strings and resolves relative paths
//!    (log files against the state directory, the settings file against the
//!    data directory).
//!
//! # Examples
//!
//! ```rust,ignore
//! use sabq_core::config::ConfigLoader;
//!
//! match ConfigLoader::load() {
//!     Ok(config) => println!("Theme mode: {}", config.appearance.theme_mode),
//!     Err(e) => {
//!         sabq_core::logging::init_minimal_logging();
//!         tracing::error!("Configuration error: {}", e);
//!     }
//! }
//! ```

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppearanceConfig, CoreConfig, LoggingConfig, StorageConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults as config_defaults;
    use std::path::PathBuf;

    #[test]
    fn test_new_core_config_default() {
        let config = CoreConfig::default();
        let default_log_config = LoggingConfig::default();
        assert_eq!(config.logging.level, default_log_config.level);
        assert_eq!(config.logging.file_path, default_log_config.file_path);
        assert_eq!(config.storage.backend, config_defaults::default_storage_backend());
        assert_eq!(config.appearance.theme_mode, "light");
    }

    #[test]
    fn test_core_config_deserialize_full() {
        let toml_data = r#"
            [logging]
            level = "trace"
            file_path = "/var/log/sabq.log"
            format = "json"

            [storage]
            backend = "memory"

            [appearance]
            theme_mode = "system"
            default_theme_id = "sabq-sepia"
        "#;
        let config: CoreConfig =
            toml::from_str(toml_data).expect("Failed to deserialize CoreConfig");

        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.file_path, Some(PathBuf::from("/var/log/sabq.log")));
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.storage.file_path, config_defaults::default_storage_file_path());
        assert_eq!(config.appearance.theme_mode, "system");
        assert_eq!(config.appearance.default_theme_id, "sabq-sepia");
        assert_eq!(config.appearance.event_capacity, 64);
    }
}
