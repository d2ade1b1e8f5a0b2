//! Distraction-free reading preferences.

use serde::{Deserialize, Serialize};

use super::keys;
use super::lenient::lenient_enum;
use super::schema::SettingSchema;

lenient_enum! {
    /// Maximum width of the article column while focus mode is on.
    pub enum ReadingWidth {
        Narrow => "narrow" | "sm",
        Medium => "medium" | "normal" | "md",
        Wide => "wide" | "lg",
    }
    default = Medium;
}

impl ReadingWidth {
    pub fn container_class(&self) -> &'static str {
        match self {
            ReadingWidth::Narrow => "max-w-2xl",
            ReadingWidth::Medium => "max-w-3xl",
            ReadingWidth::Wide => "max-w-5xl",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FocusModeSettings {
    pub enabled: bool,
    pub hide_sidebar: bool,
    pub dim_distractions: bool,
    pub reading_width: ReadingWidth,
}

impl Default for FocusModeSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            hide_sidebar: true,
            dim_distractions: true,
            reading_width: ReadingWidth::Medium,
        }
    }
}

impl FocusModeSettings {
    /// Root classes for the `focus-mode` group; empty while disabled.
    pub fn root_classes(&self) -> String {
        if !self.enabled {
            return String::new();
        }
        let mut classes = vec!["focus-mode".to_string()];
        if self.hide_sidebar {
            classes.push("focus-hide-sidebar".to_string());
        }
        if self.dim_distractions {
            classes.push("focus-dim-distractions".to_string());
        }
        classes.push(format!("reading-width-{}", self.reading_width));
        classes.join(" ")
    }
}

impl SettingSchema for FocusModeSettings {
    const KEY: &'static str = keys::FOCUS_MODE_SETTINGS;
    const VERSION: u32 = 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_record_fills_defaults() {
        let settings: FocusModeSettings =
            serde_json::from_value(json!({"enabled": true, "readingWidth": "WIDE"})).unwrap();
        assert_eq!(
            settings,
            FocusModeSettings {
                enabled: true,
                reading_width: ReadingWidth::Wide,
                ..FocusModeSettings::default()
            }
        );
    }

    #[test]
    fn test_root_classes() {
        assert_eq!(FocusModeSettings::default().root_classes(), "");
        let on = FocusModeSettings {
            enabled: true,
            hide_sidebar: false,
            ..FocusModeSettings::default()
        };
        assert_eq!(on.root_classes(), "focus-mode focus-dim-distractions reading-width-medium");
        assert_eq!(ReadingWidth::Narrow.container_class(), "max-w-2xl");
    }
}
