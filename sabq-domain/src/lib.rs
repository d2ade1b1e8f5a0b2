//! Domain layer for Sabq's reading experience.
//!
//! This crate holds the appearance logic of the reader: persisted settings,
//! the typography engine, the theme engine and the glue that connects them to
//! a style surface.

pub use sabq_core as core;

pub mod adaptive;
pub mod appearance;
pub mod error;
pub mod settings;
pub mod style_surface;
pub mod theming;
pub mod typography;

pub use adaptive::{
    adapt, Adaptation, AdaptiveContext, AdaptivePalette, AmbientLight, EyeStrain, TimeOfDay,
    UserActivity,
};
pub use appearance::{AppearanceService, ThemeMode};
pub use error::{DomainError, DomainResult};
pub use settings::{
    FilesystemSettingsBackend, FocusModeSettings, MemorySettingsBackend, ReadingWidth, Setting,
    SettingChangedEvent, SettingSchema, SettingStore, SettingsBackend, SettingsError,
};
pub use style_surface::{InMemoryStyleSurface, StyleSurface};
pub use theming::{
    AccessibilityIssue, ColorSchemeSource, ManualColorSchemeSource, SchemeSubscription,
    ThemeChangedEvent, ThemeConfiguration, ThemeEngine, ThemingError,
};
pub use typography::{ElementKind, TextDirection, TypographyEngine, TypographySettings};
