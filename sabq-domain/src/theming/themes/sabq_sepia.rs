//! Warm paper tones with a naskh face and generous leading for long-form reading.

use super::super::types::{ThemeConfiguration, ThemeTypography};
use super::palette;

pub struct SabqSepiaTheme;

impl SabqSepiaTheme {
    pub const ID: &'static str = "sabq-sepia";

    pub fn create() -> ThemeConfiguration {
        let mut theme = palette(
            Self::ID,
            "Sabq Sepia",
            "سبق للقراءة",
            &[
                ("background", "oklch(0.95 0.03 80)"),
                ("foreground", "oklch(0.3 0.04 60)"),
                ("card", "oklch(0.97 0.025 80)"),
                ("cardForeground", "oklch(0.3 0.04 60)"),
                ("popover", "oklch(0.97 0.025 80)"),
                ("popoverForeground", "oklch(0.3 0.04 60)"),
                ("primary", "oklch(0.42 0.09 55)"),
                ("primaryForeground", "oklch(0.97 0.02 80)"),
                ("secondary", "oklch(0.9 0.04 75)"),
                ("secondaryForeground", "oklch(0.32 0.04 60)"),
                ("muted", "oklch(0.92 0.03 78)"),
                ("mutedForeground", "oklch(0.4 0.04 60)"),
                ("accent", "oklch(0.88 0.05 70)"),
                ("accentForeground", "oklch(0.3 0.05 55)"),
                ("destructive", "oklch(0.45 0.17 30)"),
                ("destructiveForeground", "oklch(0.97 0.02 80)"),
                ("border", "oklch(0.85 0.04 75)"),
                ("input", "oklch(0.85 0.04 75)"),
                ("ring", "oklch(0.42 0.09 55)"),
            ],
        );
        theme.typography = Some(ThemeTypography {
            font_family: Some("\"Amiri\", \"Noto Naskh Arabic\", serif".to_string()),
            font_scale: Some(1.05),
            line_height: Some(1.9),
            letter_spacing: None,
        });
        theme
    }
}
