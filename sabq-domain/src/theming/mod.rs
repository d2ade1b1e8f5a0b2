//! Themes: semantic color palettes with optional typography overrides.
//!
//! [`ThemeEngine`] writes a [`ThemeConfiguration`] to the style surface,
//! persists it and keeps a library of saved themes next to the built-in
//! [`themes`] presets.

pub mod accessibility;
pub mod engine;
pub mod errors;
pub mod events;
pub mod exchange;
pub mod system_scheme;
pub mod themes;
pub mod types;


pub use accessibility::{validate_accessibility, AccessibilityIssue, IssueReason};
pub use engine::ThemeEngine;
pub use errors::ThemingError;
pub use events::ThemeChangedEvent;
pub use exchange::{export_theme, import_theme};
pub use system_scheme::{
    setup_system_theme_detection, ColorSchemeSource, ListenerId, ManualColorSchemeSource,
    SchemeSubscription,
};
pub use types::{
    canonical_role, ThemeConfiguration, ThemeMetadata, ThemeTypography, KNOWN_ROLES,
};
