use super::super::types::ThemeConfiguration;
use super::palette;

pub struct SabqDarkTheme;

impl SabqDarkTheme {
    pub const ID: &'static str = "sabq-dark";

    pub fn create() -> ThemeConfiguration {
        palette(
            Self::ID,
            "Sabq Dark",
            "سبق الداكن",
            &[
                ("background", "oklch(0.14 0.01 250)"),
                ("foreground", "oklch(0.96 0 0)"),
                ("card", "oklch(0.18 0.01 250)"),
                ("cardForeground", "oklch(0.96 0 0)"),
                ("popover", "oklch(0.18 0.01 250)"),
                ("popoverForeground", "oklch(0.96 0 0)"),
                ("primary", "oklch(0.72 0.14 250)"),
                ("primaryForeground", "oklch(0.15 0.02 250)"),
                ("secondary", "oklch(0.26 0.02 250)"),
                ("secondaryForeground", "oklch(0.94 0 0)"),
                ("muted", "oklch(0.24 0.01 250)"),
                ("mutedForeground", "oklch(0.76 0.01 250)"),
                ("accent", "oklch(0.3 0.04 200)"),
                ("accentForeground", "oklch(0.94 0.02 200)"),
                ("destructive", "oklch(0.42 0.18 25)"),
                ("destructiveForeground", "oklch(0.98 0 0)"),
                ("border", "oklch(0.3 0.01 250)"),
                ("input", "oklch(0.3 0.01 250)"),
                ("ring", "oklch(0.72 0.14 250)"),
            ],
        )
    }
}
