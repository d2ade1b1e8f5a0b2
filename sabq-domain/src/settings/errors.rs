use sabq_core::CoreError;
use thiserror::Error;

/// Failures inside the settings layer.
///
/// [`crate::settings::SettingStore`] never hands these to callers of `read`
/// or `write`; they surface from backends and schema migrations and are
/// logged by the store.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Persistence error during operation '{operation}' for key '{key}': {message}")]
    PersistenceError {
        operation: String,
        key: String,
        message: String,
        #[source]
        source: Option<CoreError>,
    },

    #[error("Serialization error for setting '{key}': {source}")]
    SerializationError {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Deserialization error for setting '{key}': {source}")]
    DeserializationError {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Migration of setting '{key}' from schema version {from_version} failed: {reason}")]
    MigrationFailed {
        key: String,
        from_version: u32,
        reason: String,
    },

    #[error(
        "Setting '{key}' has schema version {found}, newer than the supported version {supported}"
    )]
    UnsupportedVersion { key: String, found: u32, supported: u32 },
}

impl SettingsError {
    pub fn persistence_error_from_core(operation: &str, key: &str, core_error: CoreError) -> Self {
        SettingsError::PersistenceError {
            operation: operation.to_string(),
            key: key.to_string(),
            message: core_error.to_string(),
            source: Some(core_error),
        }
    }
}
