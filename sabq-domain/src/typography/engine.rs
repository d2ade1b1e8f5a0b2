use std::sync::Arc;
use tracing::debug;

use crate::settings::SettingStore;
use crate::style_surface::StyleSurface;

use super::classes;
use super::types::{ClassList, ElementKind, TypographySettings};

pub const FONT_SCALE_PROPERTY: &str = "--font-scale";
pub const LINE_HEIGHT_SCALE_PROPERTY: &str = "--user-line-height-scale";
pub const LETTER_SPACING_PROPERTY: &str = "--letter-spacing";
pub const ROOT_CLASS_GROUP: &str = "typography";

/// Turns the persisted [`TypographySettings`] into class bundles and root
/// custom properties.
///
/// The engine holds no copy of the settings; every call reads the store, so
/// changes made through any handle are picked up. It never fails: invalid
/// persisted values were already normalized when decoded.
#[derive(Clone)]
pub struct TypographyEngine {
    store: SettingStore,
    surface: Arc<dyn StyleSurface>,
}

impl TypographyEngine {
    pub fn new(store: SettingStore, surface: Arc<dyn StyleSurface>) -> Self {
        Self { store, surface }
    }

    pub fn settings(&self) -> TypographySettings {
        self.store.load_schema()
    }

    pub fn classes_for(&self, kind: ElementKind) -> ClassList {
        classes::class_list(&self.settings(), kind)
    }

    /// Writes the three scale properties and the root `typography` class group.
    pub fn apply_global_variables(&self) {
        let settings = self.settings();
        self.surface.set_property(FONT_SCALE_PROPERTY, settings.font_size.scale());
        self.surface.set_property(LINE_HEIGHT_SCALE_PROPERTY, settings.line_height.scale());
        self.surface.set_property(LETTER_SPACING_PROPERTY, settings.letter_spacing.css_value());
        self.surface.set_root_classes(ROOT_CLASS_GROUP, &settings.root_classes());
        debug!("Applied typography variables: {}", settings.root_classes());
    }

    /// Persists `settings` and re-applies the global variables.
    pub fn set(&self, settings: TypographySettings) {
        self.store.save_schema(&settings);
        self.apply_global_variables();
    }

    pub fn update(&self, f: impl FnOnce(&mut TypographySettings)) -> TypographySettings {
        let updated = self.store.update_schema(f);
        self.apply_global_variables();
        updated
    }

    pub fn reset(&self) {
        self.set(TypographySettings::default());
    }
}
