//! Applies themes to the style surface and manages the theme libraries.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::settings::{keys, SettingStore};
use crate::style_surface::StyleSurface;

use super::accessibility::{self, AccessibilityIssue};
use super::errors::ThemingError;
use super::events::ThemeChangedEvent;
use super::exchange::{self, generate_theme_id};
use super::system_scheme::{self, ColorSchemeSource, SchemeSubscription};
use super::themes::{self, fallback_color};
use super::types::{
    is_known_role, role_property, ThemeConfiguration, ThemeMetadata, ThemeTypography,
    KNOWN_ROLES,
};

pub const THEME_FONT_FAMILY_PROPERTY: &str = "--theme-font-family";
pub const THEME_FONT_SCALE_PROPERTY: &str = "--theme-font-scale";
pub const THEME_LINE_HEIGHT_PROPERTY: &str = "--theme-line-height";
pub const THEME_LETTER_SPACING_PROPERTY: &str = "--theme-letter-spacing";

/// What the surface cannot tell us about the last applied theme.
struct AppliedThemeState {
    id: String,
    name: String,
    name_ar: String,
    metadata: Option<ThemeMetadata>,
    extra_roles: BTreeSet<String>,
}

impl AppliedThemeState {
    fn from_theme(theme: &ThemeConfiguration) -> Self {
        Self {
            id: theme.id.clone(),
            name: theme.name.clone(),
            name_ar: theme.name_ar.clone(),
            metadata: theme.metadata.clone(),
            extra_roles: theme.extra_roles().map(str::to_string).collect(),
        }
    }
}

/// The theme engine.
///
/// Colors live on the [`StyleSurface`] as `--<role>` custom properties; the
/// current theme and the saved library are persisted through the
/// [`SettingStore`]. Each successful [`apply_theme`](Self::apply_theme)
/// broadcasts a [`ThemeChangedEvent`].
#[derive(Clone)]
pub struct ThemeEngine {
    store: SettingStore,
    surface: Arc<dyn StyleSurface>,
    applied: Arc<RwLock<AppliedThemeState>>,
    event_sender: broadcast::Sender<ThemeChangedEvent>,
}

impl ThemeEngine {
    /// Creates an engine. Nothing is written to the surface until a theme is
    /// applied; see [`restore_persisted`](Self::restore_persisted).
    pub fn new(
        store: SettingStore,
        surface: Arc<dyn StyleSurface>,
        broadcast_capacity: usize,
    ) -> Self {
        let (event_sender, _) = broadcast::channel(broadcast_capacity.max(1));
        let applied = AppliedThemeState::from_theme(&themes::default_theme());
        Self {
            store,
            surface,
            applied: Arc::new(RwLock::new(applied)),
            event_sender,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ThemeChangedEvent> {
        self.event_sender.subscribe()
    }

    /// Writes every color and typography override of `theme` to the surface,
    /// persists it as the current theme and notifies subscribers.
    ///
    /// Role names are put in canonical form first, and that normalized theme
    /// is what gets persisted and broadcast. Known roles the theme leaves out
    /// fall back to the default palette. Extra roles from the previously
    /// applied theme that `theme` lacks are removed.
    pub fn apply_theme(&self, theme: &ThemeConfiguration) {
        let theme = theme.normalized();
        for role in KNOWN_ROLES {
            if let Some(value) = theme.color(role).or_else(|| fallback_color(role)) {
                self.surface.set_property(&role_property(role), value);
            }
        }
        for role in theme.extra_roles() {
            if let Some(value) = theme.color(role) {
                self.surface.set_property(&role_property(role), value);
            }
        }

        self.apply_typography(theme.typography.as_ref());

        let next = AppliedThemeState::from_theme(&theme);
        {
            let mut applied = self.applied.write().unwrap_or_else(PoisonError::into_inner);
            let stale = applied
                .extra_roles
                .difference(&next.extra_roles)
                .filter(|role| !is_known_role(role));
            for role in stale {
                self.surface.remove_property(&role_property(role));
            }
            *applied = next;
        }

        self.store.write(keys::CURRENT_THEME, &theme);
        info!("Applied theme '{}'", theme.id);

        let theme_id = theme.id.clone();
        if self.event_sender.send(ThemeChangedEvent::new(theme)).is_err() {
            debug!("No subscribers for theme change of '{}'", theme_id);
        }
    }

    fn apply_typography(&self, typography: Option<&ThemeTypography>) {
        let typography = typography.cloned().unwrap_or_default();
        let values = [
            (THEME_FONT_FAMILY_PROPERTY, typography.font_family),
            (THEME_FONT_SCALE_PROPERTY, typography.font_scale.map(|v| v.to_string())),
            (THEME_LINE_HEIGHT_PROPERTY, typography.line_height.map(|v| v.to_string())),
            (THEME_LETTER_SPACING_PROPERTY, typography.letter_spacing),
        ];
        for (property, value) in values {
            match value {
                Some(value) => self.surface.set_property(property, &value),
                None => self.surface.remove_property(property),
            }
        }
    }

    fn read_typography(&self) -> Option<ThemeTypography> {
        let number = |property: &str| {
            self.surface.property(property).and_then(|value| value.parse::<f64>().ok())
        };
        let typography = ThemeTypography {
            font_family: self.surface.property(THEME_FONT_FAMILY_PROPERTY),
            font_scale: number(THEME_FONT_SCALE_PROPERTY),
            line_height: number(THEME_LINE_HEIGHT_PROPERTY),
            letter_spacing: self.surface.property(THEME_LETTER_SPACING_PROPERTY),
        };
        (!typography.is_empty()).then_some(typography)
    }

    /// Rebuilds the theme from what is currently on the surface.
    pub fn current_theme(&self) -> ThemeConfiguration {
        let applied = self.applied.read().unwrap_or_else(PoisonError::into_inner);
        let roles = KNOWN_ROLES
            .iter()
            .copied()
            .chain(applied.extra_roles.iter().map(String::as_str));

        let mut theme = ThemeConfiguration::new(
            applied.id.clone(),
            applied.name.clone(),
            applied.name_ar.clone(),
        );
        for role in roles {
            if let Some(value) = self.surface.property(&role_property(role)) {
                theme.colors.insert(role.to_string(), value);
            }
        }
        theme.typography = self.read_typography();
        theme.metadata = applied.metadata.clone();
        theme
    }

    /// Snapshots the current theme under a fresh `custom-` id and adds it to
    /// the saved library.
    pub fn create_preset(
        &self,
        name: &str,
        name_ar: &str,
        author: Option<String>,
    ) -> ThemeConfiguration {
        let mut theme = self.current_theme();
        theme.id = generate_theme_id();
        theme.name = name.to_string();
        theme.name_ar = name_ar.to_string();
        theme.metadata = Some(ThemeMetadata::now(author));
        self.save_theme(&theme);
        theme
    }

    pub fn restore_default(&self) {
        self.apply_theme(&themes::default_theme());
    }

    /// Applies the persisted current theme, or the default palette when none
    /// is stored or it no longer decodes.
    pub fn restore_persisted(&self) -> ThemeConfiguration {
        let theme = match self.store.read_raw(keys::CURRENT_THEME) {
            Some(raw) => serde_json::from_value(raw).unwrap_or_else(|e| {
                warn!("Persisted theme is unreadable ({}); using the default palette", e);
                themes::default_theme()
            }),
            None => themes::default_theme(),
        };
        self.apply_theme(&theme);
        theme
    }

    pub fn export_theme(&self, theme: &ThemeConfiguration) -> Result<String, ThemingError> {
        exchange::export_theme(theme)
    }

    pub fn import_theme(&self, json: &str) -> Result<ThemeConfiguration, ThemingError> {
        exchange::import_theme(json)
    }

    pub fn saved_themes(&self) -> Vec<ThemeConfiguration> {
        self.store.read(keys::SAVED_THEMES, Vec::new())
    }

    /// Adds `theme` to the saved library, replacing any entry with the same id.
    pub fn save_theme(&self, theme: &ThemeConfiguration) {
        let empty = Vec::<ThemeConfiguration>::new();
        self.store.update(keys::SAVED_THEMES, empty, |mut saved| {
            match saved.iter_mut().find(|existing| existing.id == theme.id) {
                Some(existing) => *existing = theme.clone(),
                None => saved.push(theme.clone()),
            }
            saved
        });
        debug!("Saved theme '{}'", theme.id);
    }

    /// Returns `false` when no saved theme has `theme_id`.
    pub fn delete_saved_theme(&self, theme_id: &str) -> bool {
        let mut saved = self.saved_themes();
        let before = saved.len();
        saved.retain(|theme| theme.id != theme_id);
        if saved.len() == before {
            return false;
        }
        self.store.write(keys::SAVED_THEMES, &saved);
        true
    }

    pub fn apply_saved_theme(&self, theme_id: &str) -> Result<ThemeConfiguration, ThemingError> {
        let theme = self
            .saved_themes()
            .into_iter()
            .find(|theme| theme.id == theme_id)
            .ok_or_else(|| ThemingError::ThemeNotFound {
                theme_id: theme_id.to_string(),
            })?;
        self.apply_theme(&theme);
        Ok(theme)
    }

    pub fn apply_preset(&self, theme_id: &str) -> Result<ThemeConfiguration, ThemingError> {
        let theme = themes::preset(theme_id).ok_or_else(|| ThemingError::ThemeNotFound {
            theme_id: theme_id.to_string(),
        })?;
        self.apply_theme(&theme);
        Ok(theme)
    }

    /// Built-in presets followed by the saved library.
    pub fn available_themes(&self) -> Vec<ThemeConfiguration> {
        let mut all = themes::presets();
        all.extend(self.saved_themes());
        all
    }

    pub fn validate_accessibility(&self, theme: &ThemeConfiguration) -> Vec<AccessibilityIssue> {
        accessibility::validate_accessibility(theme)
    }

    pub fn setup_system_theme_detection<F>(
        &self,
        source: Arc<dyn ColorSchemeSource>,
        callback: F,
    ) -> SchemeSubscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        system_scheme::setup_system_theme_detection(source, callback)
    }
}
