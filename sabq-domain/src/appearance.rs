//! Wires the store, the style surface and both engines together.
//!
//! ```rust,ignore
//! let config = sabq_core::ConfigLoader::load()?;
//! sabq_core::initialize_logging(&config.logging, false)?;
//! let appearance = AppearanceService::initialize(&config)?;
//! appearance.set_theme_mode(ThemeMode::System);
//! let _follow = appearance.follow_system_scheme(source);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

use sabq_core::{CoreConfig, CoreError, StorageConfig};

use crate::error::DomainResult;
use crate::settings::lenient::lenient_enum;
use crate::settings::{
    keys, FilesystemSettingsBackend, FocusModeSettings, MemorySettingsBackend, SettingStore,
    SettingsBackend,
};
use crate::style_surface::{InMemoryStyleSurface, StyleSurface};
use crate::theming::themes::SabqDarkTheme;
use crate::theming::{ColorSchemeSource, SchemeSubscription, ThemeEngine};
use crate::typography::TypographyEngine;

pub const FOCUS_MODE_CLASS_GROUP: &str = "focus-mode";

lenient_enum! {
    /// Which palette family the service keeps applied.
    pub enum ThemeMode {
        Light => "light",
        Dark => "dark",
        System => "system" | "auto",
    }
    default = System;
}

fn build_backend(storage: &StorageConfig) -> DomainResult<Arc<dyn SettingsBackend>> {
    match storage.backend.as_str() {
        "memory" => Ok(Arc::new(MemorySettingsBackend::new())),
        "filesystem" => {
            let path = storage.file_path.clone().ok_or_else(|| {
                CoreError::InvalidInput(
                    "storage.file_path is required for the filesystem backend".to_string(),
                )
            })?;
            debug!("Persisting settings to {:?}", path);
            Ok(Arc::new(FilesystemSettingsBackend::new(path)))
        }
        other => {
            Err(CoreError::InvalidInput(format!("Unknown storage backend '{}'", other)).into())
        }
    }
}

/// Applies the preset matching a mode. Shared with the system-scheme listener.
#[derive(Clone)]
struct ModeSwitcher {
    store: SettingStore,
    themes: ThemeEngine,
    light_theme_id: String,
    system_prefers_dark: Arc<AtomicBool>,
}

impl ModeSwitcher {
    fn mode(&self) -> ThemeMode {
        self.store.read(keys::THEME_MODE, ThemeMode::default())
    }

    fn apply(&self, mode: ThemeMode) {
        let dark = match mode {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => self.system_prefers_dark.load(Ordering::SeqCst),
        };
        if dark {
            if let Err(e) = self.themes.apply_preset(SabqDarkTheme::ID) {
                warn!("{}", e);
            }
            return;
        }
        if self.themes.apply_preset(&self.light_theme_id).is_err()
            && self.themes.apply_saved_theme(&self.light_theme_id).is_err()
        {
            warn!("Theme '{}' is unknown; applying the default palette", self.light_theme_id);
            self.themes.restore_default();
        }
    }
}

/// The appearance layer as one object.
pub struct AppearanceService {
    store: SettingStore,
    surface: Arc<InMemoryStyleSurface>,
    themes: ThemeEngine,
    typography: TypographyEngine,
    switcher: ModeSwitcher,
    scheme_subscription: Mutex<Option<SchemeSubscription>>,
}

impl AppearanceService {
    /// Builds the store from `config.storage` and restores persisted state.
    ///
    /// The persisted current theme wins over `appearance.theme_mode`; the mode
    /// only picks a preset when no theme has been stored yet. A persisted mode
    /// wins over the configured one.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidInput`] (wrapped) for an unusable storage section.
    pub fn initialize(config: &CoreConfig) -> DomainResult<Self> {
        let backend = build_backend(&config.storage)?;
        let capacity = config.appearance.event_capacity;
        let store = SettingStore::new(backend, capacity);
        let surface = Arc::new(InMemoryStyleSurface::new());
        let dyn_surface: Arc<dyn StyleSurface> = surface.clone();
        let themes = ThemeEngine::new(store.clone(), dyn_surface.clone(), capacity);
        let typography = TypographyEngine::new(store.clone(), dyn_surface);

        let switcher = ModeSwitcher {
            store: store.clone(),
            themes: themes.clone(),
            light_theme_id: config.appearance.default_theme_id.clone(),
            system_prefers_dark: Arc::new(AtomicBool::new(false)),
        };
        let service = Self {
            store,
            surface,
            themes,
            typography,
            switcher,
            scheme_subscription: Mutex::new(None),
        };

        service.typography.apply_global_variables();
        service.apply_focus_mode_classes(&service.focus_mode());

        if !service.store.contains(keys::THEME_MODE) {
            let mode = ThemeMode::parse_lenient(&config.appearance.theme_mode).unwrap_or_default();
            service.store.write(keys::THEME_MODE, &mode);
        }
        if service.store.contains(keys::CURRENT_THEME) {
            service.themes.restore_persisted();
        } else {
            service.switcher.apply(service.theme_mode());
        }

        info!(
            "Appearance initialized (mode: {}, theme: {})",
            service.theme_mode(),
            service.themes.current_theme().id
        );
        Ok(service)
    }

    pub fn store(&self) -> &SettingStore {
        &self.store
    }

    pub fn surface(&self) -> &InMemoryStyleSurface {
        &self.surface
    }

    pub fn theme_engine(&self) -> &ThemeEngine {
        &self.themes
    }

    pub fn typography_engine(&self) -> &TypographyEngine {
        &self.typography
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.switcher.mode()
    }

    /// Persists `mode` and applies the matching preset.
    pub fn set_theme_mode(&self, mode: ThemeMode) {
        self.store.write(keys::THEME_MODE, &mode);
        self.switcher.apply(mode);
    }

    /// Tracks `source` while the mode is [`ThemeMode::System`]. Replaces any
    /// previously followed source.
    pub fn follow_system_scheme(&self, source: Arc<dyn ColorSchemeSource>) {
        let switcher = self.switcher.clone();
        let subscription = self.themes.setup_system_theme_detection(source, move |dark| {
            switcher.system_prefers_dark.store(dark, Ordering::SeqCst);
            if switcher.mode() == ThemeMode::System {
                switcher.apply(ThemeMode::System);
            }
        });
        let previous = self
            .scheme_subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(subscription);
        drop(previous);
    }

    pub fn stop_following_system_scheme(&self) {
        let subscription = self
            .scheme_subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
        }
    }

    pub fn focus_mode(&self) -> FocusModeSettings {
        self.store.load_schema()
    }

    pub fn set_focus_mode(&self, settings: FocusModeSettings) {
        self.store.save_schema(&settings);
        self.apply_focus_mode_classes(&settings);
    }

    pub fn update_focus_mode(&self, f: impl FnOnce(&mut FocusModeSettings)) -> FocusModeSettings {
        let updated = self.store.update_schema(f);
        self.apply_focus_mode_classes(&updated);
        updated
    }

    fn apply_focus_mode_classes(&self, settings: &FocusModeSettings) {
        self.surface.set_root_classes(FOCUS_MODE_CLASS_GROUP, &settings.root_classes());
    }

    /// The `:root` block for everything currently applied.
    pub fn to_css(&self) -> String {
        self.surface.to_css()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theming::ManualColorSchemeSource;
    use crate::theming::themes::{self, SabqLightTheme};
    use sabq_core::ConfigLoader;

    fn memory_config(mode: &str) -> CoreConfig {
        ConfigLoader::load_from_str(&format!(
            "[storage]\nbackend = \"memory\"\n[appearance]\ntheme_mode = \"{}\"\n",
            mode
        ))
        .unwrap()
    }

    fn background(service: &AppearanceService) -> Option<String> {
        service.surface().property("--background")
    }

    #[test]
    fn test_dark_mode_applies_dark_preset() {
        let service = AppearanceService::initialize(&memory_config("dark")).unwrap();
        assert_eq!(service.theme_mode(), ThemeMode::Dark);
        assert_eq!(background(&service).as_deref(), SabqDarkTheme::create().color("background"));
        assert_eq!(service.surface().property("--font-scale").as_deref(), Some("1"));
    }

    #[test]
    fn test_set_theme_mode_persists() {
        let service = AppearanceService::initialize(&memory_config("light")).unwrap();
        service.set_theme_mode(ThemeMode::Dark);
        assert_eq!(service.store().read_raw(keys::THEME_MODE), Some(serde_json::json!("dark")));
        assert_eq!(background(&service).as_deref(), SabqDarkTheme::create().color("background"));
    }

    #[test]
    fn test_system_mode_follows_source() {
        let service = AppearanceService::initialize(&memory_config("system")).unwrap();
        let source = Arc::new(ManualColorSchemeSource::new(true));
        service.follow_system_scheme(source.clone());
        assert_eq!(background(&service).as_deref(), SabqDarkTheme::create().color("background"));

        source.set_prefers_dark(false);
        assert_eq!(background(&service).as_deref(), SabqLightTheme::create().color("background"));

        service.set_theme_mode(ThemeMode::Dark);
        source.set_prefers_dark(true);
        source.set_prefers_dark(false);
        assert_eq!(background(&service).as_deref(), SabqDarkTheme::create().color("background"));

        service.stop_following_system_scheme();
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn test_focus_mode_classes() {
        let service = AppearanceService::initialize(&memory_config("light")).unwrap();
        assert_eq!(service.surface().root_classes(FOCUS_MODE_CLASS_GROUP), None);

        let updated = service.update_focus_mode(|settings| settings.enabled = true);
        assert!(updated.enabled);
        assert_eq!(
            service.surface().root_classes(FOCUS_MODE_CLASS_GROUP).as_deref(),
            Some(updated.root_classes().as_str())
        );
    }

    #[test]
    fn test_unknown_default_theme_falls_back() {
        let mut config = memory_config("light");
        config.appearance.default_theme_id = "sabq-neon".to_string();
        let service = AppearanceService::initialize(&config).unwrap();
        assert_eq!(service.theme_engine().current_theme().id, themes::default_theme().id);
    }

    #[test]
    fn test_filesystem_backend_requires_path() {
        let mut config = memory_config("light");
        config.storage.backend = "filesystem".to_string();
        config.storage.file_path = None;
        assert!(AppearanceService::initialize(&config).is_err());
    }
}
