//! The default palette. Its colors are also the fallback for any role a theme omits.

use super::super::types::ThemeConfiguration;
use super::palette;

pub struct SabqLightTheme;

impl SabqLightTheme {
    pub const ID: &'static str = "sabq-light";

    pub const COLORS: [(&'static str, &'static str); 19] = [
        ("background", "oklch(0.99 0 0)"),
        ("foreground", "oklch(0.15 0.01 250)"),
        ("card", "oklch(1 0 0)"),
        ("cardForeground", "oklch(0.15 0.01 250)"),
        ("popover", "oklch(1 0 0)"),
        ("popoverForeground", "oklch(0.15 0.01 250)"),
        ("primary", "oklch(0.45 0.15 250)"),
        ("primaryForeground", "oklch(0.98 0 0)"),
        ("secondary", "oklch(0.95 0.01 250)"),
        ("secondaryForeground", "oklch(0.25 0.02 250)"),
        ("muted", "oklch(0.96 0.005 250)"),
        ("mutedForeground", "oklch(0.44 0.02 250)"),
        ("accent", "oklch(0.94 0.03 200)"),
        ("accentForeground", "oklch(0.25 0.05 200)"),
        ("destructive", "oklch(0.45 0.2 25)"),
        ("destructiveForeground", "oklch(0.98 0 0)"),
        ("border", "oklch(0.9 0.01 250)"),
        ("input", "oklch(0.9 0.01 250)"),
        ("ring", "oklch(0.45 0.15 250)"),
    ];

    pub fn create() -> ThemeConfiguration {
        palette(Self::ID, "Sabq Light", "سبق الفاتح", &Self::COLORS)
    }
}
