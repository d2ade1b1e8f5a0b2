use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Broadcast after a setting has been committed to the mirror and handed to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingChangedEvent {
    pub key: String,
    /// `None` when the key was removed.
    pub new_value: Option<JsonValue>,
}

impl SettingChangedEvent {
    pub fn updated(key: impl Into<String>, new_value: JsonValue) -> Self {
        Self { key: key.into(), new_value: Some(new_value) }
    }

    pub fn removed(key: impl Into<String>) -> Self {
        Self { key: key.into(), new_value: None }
    }

    pub fn is_removal(&self) -> bool {
        self.new_value.is_none()
    }
}
