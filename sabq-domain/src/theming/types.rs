//! Theme documents.
//!
//! A [`ThemeConfiguration`] is what gets applied, persisted, exported and
//! imported. Its JSON form uses camelCase field names and camelCase role
//! names (`cardForeground`); the CSS form of a role is its kebab-case name
//! prefixed with `--`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use sabq_core::utils::string_utils::{to_camel_case, to_kebab_case};

/// Semantic color roles every applied theme resolves.
pub const KNOWN_ROLES: [&str; 19] = [
    "background",
    "foreground",
    "card",
    "cardForeground",
    "popover",
    "popoverForeground",
    "primary",
    "primaryForeground",
    "secondary",
    "secondaryForeground",
    "muted",
    "mutedForeground",
    "accent",
    "accentForeground",
    "destructive",
    "destructiveForeground",
    "border",
    "input",
    "ring",
];

pub fn is_known_role(role: &str) -> bool {
    KNOWN_ROLES.contains(&role)
}

/// `cardForeground` -> `--card-foreground`.
pub fn role_property(role: &str) -> String {
    format!("--{}", to_kebab_case(role))
}

/// `--card-foreground` -> `cardForeground`.
pub fn property_role(property: &str) -> String {
    to_camel_case(property.trim_start_matches("--"))
}

/// The camelCase name of the CSS property `role` maps to, so that
/// `Background`, `card_foreground` and `card-foreground` name the same role
/// as `background` and `cardForeground`. Empty for names with no letters.
pub fn canonical_role(role: &str) -> String {
    property_role(&role_property(role))
}

/// Re-keys `colors` by [`canonical_role`]. When several keys name the same
/// role, the one already in canonical form wins, then the first in key order.
/// Keys that canonicalize to nothing are dropped.
pub fn normalize_roles(colors: BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut normalized = BTreeMap::new();
    for (role, value) in colors {
        let canonical = canonical_role(&role);
        if canonical.is_empty() {
            warn!("Dropping color '{}': not a usable role name", role);
            continue;
        }
        if canonical == role {
            normalized.insert(canonical, value);
        } else {
            normalized.entry(canonical).or_insert(value);
        }
    }
    normalized
}

/// Optional per-theme typography overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeTypography {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
}

impl ThemeTypography {
    pub fn is_empty(&self) -> bool {
        self.font_family.is_none()
            && self.font_scale.is_none()
            && self.line_height.is_none()
            && self.letter_spacing.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default = "default_theme_version")]
    pub version: String,
}

pub(crate) fn default_theme_version() -> String {
    "1.0.0".to_string()
}

impl ThemeMetadata {
    /// Fresh metadata stamped with the current time.
    pub fn now(author: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            author,
            version: default_theme_version(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfiguration {
    pub id: String,
    pub name: String,
    pub name_ar: String,
    /// Role name -> CSS color string.
    pub colors: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<ThemeTypography>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ThemeMetadata>,
}

impl ThemeConfiguration {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        name_ar: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            name_ar: name_ar.into(),
            colors: BTreeMap::new(),
            typography: None,
            metadata: None,
        }
    }

    pub fn with_color(mut self, role: impl Into<String>, value: impl Into<String>) -> Self {
        self.colors.insert(role.into(), value.into());
        self
    }

    pub fn color(&self, role: &str) -> Option<&str> {
        self.colors.get(role).map(String::as_str)
    }

    /// The same theme with its color roles in canonical form.
    pub fn normalized(&self) -> Self {
        Self {
            colors: normalize_roles(self.colors.clone()),
            ..self.clone()
        }
    }

    /// Roles present in `colors` that are not in [`KNOWN_ROLES`].
    pub fn extra_roles(&self) -> impl Iterator<Item = &str> {
        self.colors
            .keys()
            .map(String::as_str)
            .filter(|role| !is_known_role(role))
    }

    /// Known roles absent from `colors`.
    pub fn missing_roles(&self) -> Vec<&'static str> {
        KNOWN_ROLES
            .iter()
            .copied()
            .filter(|role| !self.colors.contains_key(*role))
            .collect()
    }
}
