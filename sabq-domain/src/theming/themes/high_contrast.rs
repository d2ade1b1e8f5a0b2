use super::super::types::ThemeConfiguration;
use super::palette;

pub struct HighContrastTheme;

impl HighContrastTheme {
    pub const ID: &'static str = "sabq-high-contrast";

    pub fn create() -> ThemeConfiguration {
        palette(
            Self::ID,
            "High Contrast",
            "تباين عالٍ",
            &[
                ("background", "oklch(1 0 0)"),
                ("foreground", "oklch(0 0 0)"),
                ("card", "oklch(1 0 0)"),
                ("cardForeground", "oklch(0 0 0)"),
                ("popover", "oklch(1 0 0)"),
                ("popoverForeground", "oklch(0 0 0)"),
                ("primary", "oklch(0.3 0.2 265)"),
                ("primaryForeground", "oklch(1 0 0)"),
                ("secondary", "oklch(0.92 0 0)"),
                ("secondaryForeground", "oklch(0.1 0 0)"),
                ("muted", "oklch(0.94 0 0)"),
                ("mutedForeground", "oklch(0.2 0 0)"),
                ("accent", "oklch(0.85 0.17 95)"),
                ("accentForeground", "oklch(0 0 0)"),
                ("destructive", "oklch(0.35 0.2 25)"),
                ("destructiveForeground", "oklch(1 0 0)"),
                ("border", "oklch(0 0 0)"),
                ("input", "oklch(0 0 0)"),
                ("ring", "oklch(0.3 0.2 265)"),
            ],
        )
    }
}
