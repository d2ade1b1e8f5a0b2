//! Theme import and export.
//!
//! Import validates the document field by field so that the error names the
//! first offending field instead of surfacing a generic serde message.

use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use tracing::{debug, warn};
use uuid::Uuid;

use super::errors::ThemingError;
use super::types::{
    canonical_role, normalize_roles, ThemeConfiguration, ThemeMetadata, ThemeTypography,
};

pub(crate) fn generate_theme_id() -> String {
    format!("custom-{}", Uuid::new_v4())
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Pretty-printed JSON of the full theme, metadata included.
pub fn export_theme(theme: &ThemeConfiguration) -> Result<String, ThemingError> {
    serde_json::to_string_pretty(theme).map_err(|source| ThemingError::SerializationError {
        theme_id: theme.id.clone(),
        source,
    })
}

fn required_string(
    object: &Map<String, JsonValue>,
    field: &'static str,
) -> Result<String, ThemingError> {
    match object.get(field) {
        None | Some(JsonValue::Null) => Err(ThemingError::MissingField { field }),
        Some(JsonValue::String(value)) if !value.trim().is_empty() => Ok(value.clone()),
        Some(JsonValue::String(_)) => Err(ThemingError::InvalidField {
            field: field.to_string(),
            reason: "must not be empty".to_string(),
        }),
        Some(other) => Err(ThemingError::InvalidField {
            field: field.to_string(),
            reason: format!("expected a string, found {}", json_kind(other)),
        }),
    }
}

fn optional_string(
    object: &Map<String, JsonValue>,
    field: &str,
) -> Result<Option<String>, ThemingError> {
    match object.get(field) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(value)) if value.trim().is_empty() => Ok(None),
        Some(JsonValue::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(ThemingError::InvalidField {
            field: field.to_string(),
            reason: format!("expected a string, found {}", json_kind(other)),
        }),
    }
}

fn parse_colors(object: &Map<String, JsonValue>) -> Result<BTreeMap<String, String>, ThemingError> {
    let colors = match object.get("colors") {
        None | Some(JsonValue::Null) => return Err(ThemingError::MissingField { field: "colors" }),
        Some(JsonValue::Object(colors)) => colors,
        Some(other) => {
            return Err(ThemingError::InvalidField {
                field: "colors".to_string(),
                reason: format!("expected an object, found {}", json_kind(other)),
            })
        }
    };

    let parsed = colors
        .iter()
        .map(|(role, value)| match value {
            _ if canonical_role(role).is_empty() => Err(ThemingError::InvalidField {
                field: format!("colors.{}", role),
                reason: "not a usable role name".to_string(),
            }),
            JsonValue::String(color) => Ok((role.clone(), color.clone())),
            other => Err(ThemingError::InvalidField {
                field: format!("colors.{}", role),
                reason: format!("expected a string, found {}", json_kind(other)),
            }),
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;
    Ok(normalize_roles(parsed))
}

fn parse_typography(
    object: &Map<String, JsonValue>,
) -> Result<Option<ThemeTypography>, ThemingError> {
    match object.get("typography") {
        None | Some(JsonValue::Null) => Ok(None),
        Some(value) => {
            let typography: ThemeTypography =
                serde_json::from_value(value.clone()).map_err(|e| ThemingError::InvalidField {
                    field: "typography".to_string(),
                    reason: e.to_string(),
                })?;
            Ok((!typography.is_empty()).then_some(typography))
        }
    }
}

fn parse_metadata(object: &Map<String, JsonValue>) -> ThemeMetadata {
    match object.get("metadata") {
        None | Some(JsonValue::Null) => ThemeMetadata::now(None),
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            warn!("Imported theme metadata is unreadable ({}); stamping fresh metadata", e);
            ThemeMetadata::now(None)
        }),
    }
}

/// Parses and validates an exported theme document.
///
/// # Errors
///
/// - [`ThemingError::InvalidJson`] when `json` does not parse.
/// - [`ThemingError::NotAnObject`] when the top level is not an object.
/// - [`ThemingError::MissingField`] / [`ThemingError::InvalidField`] naming
///   `name`, `colors`, `colors.<role>`, `id`, `nameAr` or `typography`.
///
/// Color roles come back in canonical form (`Background` -> `background`).
pub fn import_theme(json: &str) -> Result<ThemeConfiguration, ThemingError> {
    let document: JsonValue =
        serde_json::from_str(json).map_err(|source| ThemingError::InvalidJson { source })?;
    let object = match &document {
        JsonValue::Object(object) => object,
        other => return Err(ThemingError::NotAnObject { found: json_kind(other) }),
    };

    let name = required_string(object, "name")?;
    let colors = parse_colors(object)?;
    let id = optional_string(object, "id")?.unwrap_or_else(generate_theme_id);
    let name_ar = optional_string(object, "nameAr")?.unwrap_or_else(|| name.clone());
    let typography = parse_typography(object)?;
    let metadata = parse_metadata(object);

    debug!("Imported theme '{}' with {} colors", id, colors.len());
    Ok(ThemeConfiguration {
        id,
        name,
        name_ar,
        colors,
        typography,
        metadata: Some(metadata),
    })
}
