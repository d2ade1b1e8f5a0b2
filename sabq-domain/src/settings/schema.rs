//! Versioned persisted setting kinds.
//!
//! A value saved through a schema is stored as
//! `{"schemaVersion": <n>, "data": <value>}`. Anything else found under the
//! key (a value written before versioning existed) is treated as version 0.
//! Older versions go through [`SettingSchema::migrate`] when loaded, and the
//! migrated envelope is written back so the migration is not repeated.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::errors::SettingsError;

/// A persisted setting kind with a stable key and an explicit schema version.
pub trait SettingSchema: Serialize + DeserializeOwned + Default {
    const KEY: &'static str;
    const VERSION: u32;

    /// Converts the `data` part of an older envelope into the current shape.
    ///
    /// The default keeps the data as-is, which suits schemas whose older
    /// versions only lacked fields that have serde defaults.
    fn migrate(from_version: u32, data: JsonValue) -> Result<JsonValue, SettingsError> {
        let _ = from_version;
        Ok(data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaEnvelope {
    pub schema_version: u32,
    pub data: JsonValue,
}

impl SchemaEnvelope {
    pub fn new(schema_version: u32, data: JsonValue) -> Self {
        Self { schema_version, data }
    }

    /// The envelope in `raw`, if `raw` is exactly `{schemaVersion, data}`.
    pub fn parse(raw: &JsonValue) -> Option<Self> {
        let JsonValue::Object(map) = raw else {
            return None;
        };
        if map.len() != 2 {
            return None;
        }
        let version = map.get("schemaVersion").and_then(JsonValue::as_u64)?;
        let data = map.get("data")?;
        Some(Self::new(u32::try_from(version).unwrap_or(u32::MAX), data.clone()))
    }

    /// Interprets a raw stored value, treating non-envelopes as version 0.
    pub fn from_raw(raw: &JsonValue) -> Self {
        Self::parse(raw).unwrap_or_else(|| Self::new(0, raw.clone()))
    }

    pub fn into_json(self) -> JsonValue {
        serde_json::json!({ "schemaVersion": self.schema_version, "data": self.data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_is_recognized() {
        let envelope = SchemaEnvelope::from_raw(&json!({"schemaVersion": 3, "data": {"a": 1}}));
        assert_eq!(envelope, SchemaEnvelope::new(3, json!({"a": 1})));
    }

    #[test]
    fn test_bare_value_is_version_zero() {
        let raw = json!({"fontSize": "large"});
        assert_eq!(SchemaEnvelope::from_raw(&raw), SchemaEnvelope::new(0, raw.clone()));
        assert_eq!(SchemaEnvelope::from_raw(&json!("dark")).schema_version, 0);
    }

    #[test]
    fn test_object_with_extra_fields_is_not_an_envelope() {
        let raw = json!({"schemaVersion": 1, "data": {}, "other": true});
        assert_eq!(SchemaEnvelope::from_raw(&raw).schema_version, 0);
        assert_eq!(SchemaEnvelope::parse(&raw), None);
    }

    #[test]
    fn test_into_json_uses_camel_case() {
        assert_eq!(
            SchemaEnvelope::new(1, json!(true)).into_json(),
            json!({"schemaVersion": 1, "data": true})
        );
    }
}
