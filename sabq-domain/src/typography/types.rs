//! Typography settings and the vocabulary the engine works with.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::settings::keys;
use crate::settings::lenient::lenient_enum;
use crate::settings::{SettingSchema, SettingsError};

lenient_enum! {
    pub enum FontSize {
        Small => "small" | "sm",
        Medium => "medium" | "md" | "base",
        Large => "large" | "lg",
        ExtraLarge => "extra-large" | "xl",
    }
    default = Medium;
}

lenient_enum! {
    pub enum LineHeight {
        Compact => "compact" | "tight",
        Normal => "normal",
        Relaxed => "relaxed",
        Loose => "loose",
    }
    default = Normal;
}

lenient_enum! {
    pub enum LetterSpacing {
        Tight => "tight",
        Normal => "normal",
        Wide => "wide",
    }
    default = Normal;
}

lenient_enum! {
    pub enum FontWeight {
        Light => "light",
        Normal => "normal" | "regular",
        Medium => "medium",
        Semibold => "semibold",
    }
    default = Normal;
}

impl FontSize {
    /// Value of `--font-scale`.
    pub fn scale(&self) -> &'static str {
        match self {
            FontSize::Small => "0.875",
            FontSize::Medium => "1",
            FontSize::Large => "1.125",
            FontSize::ExtraLarge => "1.25",
        }
    }

    /// Nearest bucket for a pixel size; legacy records stored pixels.
    pub fn from_pixels(px: f64) -> Self {
        if px < 15.0 {
            FontSize::Small
        } else if px < 17.0 {
            FontSize::Medium
        } else if px < 19.0 {
            FontSize::Large
        } else {
            FontSize::ExtraLarge
        }
    }
}

impl LineHeight {
    /// Value of `--user-line-height-scale`.
    pub fn scale(&self) -> &'static str {
        match self {
            LineHeight::Compact => "0.9",
            LineHeight::Normal => "1",
            LineHeight::Relaxed => "1.15",
            LineHeight::Loose => "1.3",
        }
    }
}

impl LetterSpacing {
    /// Value of `--letter-spacing`.
    pub fn css_value(&self) -> &'static str {
        match self {
            LetterSpacing::Tight => "-0.025em",
            LetterSpacing::Normal => "0em",
            LetterSpacing::Wide => "0.025em",
        }
    }
}

/// The persisted typography record.
///
/// Every field always holds a valid variant; anything else in storage
/// decodes to that field's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypographySettings {
    pub font_size: FontSize,
    pub line_height: LineHeight,
    pub letter_spacing: LetterSpacing,
    pub font_weight: FontWeight,
}

impl TypographySettings {
    /// Classes for the root `typography` group.
    pub fn root_classes(&self) -> String {
        format!(
            "font-size-{} line-height-{} letter-spacing-{} font-weight-{}",
            self.font_size, self.line_height, self.letter_spacing, self.font_weight
        )
    }
}

impl SettingSchema for TypographySettings {
    const KEY: &'static str = keys::TYPOGRAPHY_SETTINGS;
    const VERSION: u32 = 1;

    /// Version 0 records are the bare object, sometimes with `fontSize` in pixels.
    fn migrate(from_version: u32, mut data: JsonValue) -> Result<JsonValue, SettingsError> {
        if from_version != 0 {
            return Err(SettingsError::MigrationFailed {
                key: Self::KEY.to_string(),
                from_version,
                reason: "unknown schema version".to_string(),
            });
        }
        if let Some(px) = data.get("fontSize").and_then(JsonValue::as_f64) {
            data["fontSize"] = JsonValue::from(FontSize::from_pixels(px).as_str());
        }
        Ok(data)
    }
}

/// The kinds of text the engine styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Heading,
    Body,
    Summary,
    Caption,
}

impl ElementKind {
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Heading,
        ElementKind::Body,
        ElementKind::Summary,
        ElementKind::Caption,
    ];
}

/// Writing direction of the active language. Owned by the locale layer, not the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Rtl,
    Ltr,
}

impl TextDirection {
    /// Direction for a BCP 47 tag such as `ar`, `ar-SA` or `en_US`.
    pub fn for_language(code: &str) -> Self {
        let primary = code
            .trim()
            .split(|c: char| c == '-' || c == '_')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "ar" | "he" | "fa" | "ur" => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }

    /// Value for the HTML `dir` attribute.
    pub fn dir_attribute(&self) -> &'static str {
        match self {
            TextDirection::Rtl => "rtl",
            TextDirection::Ltr => "ltr",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, TextDirection::Rtl)
    }
}

/// An ordered list of class tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassList(Vec<&'static str>);

impl ClassList {
    pub(crate) fn new(tokens: Vec<&'static str>) -> Self {
        Self(tokens)
    }

    pub fn tokens(&self) -> &[&'static str] {
        &self.0
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| *t == token)
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}
