use serde::{Deserialize, Serialize};

use super::types::ThemeConfiguration;

/// Sent after a theme has been written to the style surface and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeChangedEvent {
    pub theme: ThemeConfiguration,
}

impl ThemeChangedEvent {
    pub fn new(theme: ThemeConfiguration) -> Self {
        Self { theme }
    }

    pub fn theme_id(&self) -> &str {
        &self.theme.id
    }
}
