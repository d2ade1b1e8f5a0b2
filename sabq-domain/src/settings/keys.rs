//! Storage keys of the well-known settings. Consumers rely on these exact names.

pub const TYPOGRAPHY_SETTINGS: &str = "typography-settings";
pub const FOCUS_MODE_SETTINGS: &str = "focus-mode-settings";
pub const CURRENT_THEME: &str = "sabq-current-theme";
pub const SAVED_THEMES: &str = "sabq-saved-themes";
pub const THEME_MODE: &str = "sabq-theme-mode";
