use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

use crate::settings::{keys, MemorySettingsBackend, SettingStore, DEFAULT_EVENT_CAPACITY};
use crate::style_surface::{InMemoryStyleSurface, StyleSurface};

use super::engine::{
    TypographyEngine, FONT_SCALE_PROPERTY, LETTER_SPACING_PROPERTY, LINE_HEIGHT_SCALE_PROPERTY,
    ROOT_CLASS_GROUP,
};
use super::types::{
    ElementKind, FontSize, FontWeight, LetterSpacing, LineHeight, TypographySettings,
};

fn engine_with(store: SettingStore) -> (TypographyEngine, Arc<InMemoryStyleSurface>) {
    let surface = Arc::new(InMemoryStyleSurface::new());
    (TypographyEngine::new(store, surface.clone()), surface)
}

#[test]
fn default_settings_apply_neutral_variables() {
    let (engine, surface) = engine_with(SettingStore::in_memory());
    engine.apply_global_variables();

    assert_eq!(surface.property(FONT_SCALE_PROPERTY).as_deref(), Some("1"));
    assert_eq!(surface.property(LINE_HEIGHT_SCALE_PROPERTY).as_deref(), Some("1"));
    assert_eq!(surface.property(LETTER_SPACING_PROPERTY).as_deref(), Some("0em"));
    assert_eq!(
        surface.root_classes(ROOT_CLASS_GROUP).as_deref(),
        Some("font-size-medium line-height-normal letter-spacing-normal font-weight-normal")
    );
}

#[test]
fn set_persists_and_reapplies() {
    let store = SettingStore::in_memory();
    let (engine, surface) = engine_with(store.clone());

    engine.set(TypographySettings {
        font_size: FontSize::ExtraLarge,
        line_height: LineHeight::Loose,
        letter_spacing: LetterSpacing::Tight,
        font_weight: FontWeight::Light,
    });

    assert_eq!(surface.property(FONT_SCALE_PROPERTY).as_deref(), Some("1.25"));
    assert_eq!(surface.property(LINE_HEIGHT_SCALE_PROPERTY).as_deref(), Some("1.3"));
    assert_eq!(surface.property(LETTER_SPACING_PROPERTY).as_deref(), Some("-0.025em"));
    assert_eq!(
        store.read_raw(keys::TYPOGRAPHY_SETTINGS),
        Some(json!({
            "schemaVersion": 1,
            "data": {
                "fontSize": "extra-large",
                "lineHeight": "loose",
                "letterSpacing": "tight",
                "fontWeight": "light"
            }
        }))
    );
}

#[test]
fn engine_and_plain_handles_agree_on_the_stored_settings() {
    let store = SettingStore::in_memory();
    let (engine, _surface) = engine_with(store.clone());
    let large = TypographySettings {
        font_size: FontSize::Large,
        ..TypographySettings::default()
    };
    let small = TypographySettings {
        font_size: FontSize::Small,
        ..TypographySettings::default()
    };

    engine.set(large);
    assert_eq!(store.read(keys::TYPOGRAPHY_SETTINGS, TypographySettings::default()), large);

    let handle = store.setting(keys::TYPOGRAPHY_SETTINGS, TypographySettings::default());
    handle.set(&large);
    handle.set(&small);
    assert_eq!(engine.settings(), small);
}

#[test]
fn update_changes_one_field() {
    let (engine, surface) = engine_with(SettingStore::in_memory());
    let updated = engine.update(|s| s.font_size = FontSize::Small);

    assert_eq!(updated.font_size, FontSize::Small);
    assert_eq!(updated.line_height, LineHeight::Normal);
    assert_eq!(surface.property(FONT_SCALE_PROPERTY).as_deref(), Some("0.875"));
    assert!(engine.classes_for(ElementKind::Body).contains("text-sm"));
}

#[test]
fn legacy_record_with_unknown_values_is_normalized() {
    let backend = MemorySettingsBackend::with_entries([(
        keys::TYPOGRAPHY_SETTINGS,
        json!({"fontSize": "humongous", "lineHeight": "relaxed", "fontWeight": 700}),
    )]);
    let store = SettingStore::new(Arc::new(backend), DEFAULT_EVENT_CAPACITY);
    let (engine, _surface) = engine_with(store);

    let settings = engine.settings();
    assert_eq!(settings.font_size, FontSize::Medium);
    assert_eq!(settings.line_height, LineHeight::Relaxed);
    assert_eq!(settings.font_weight, FontWeight::Normal);
}

#[test]
fn body_classes_for_default_settings() {
    let (engine, _surface) = engine_with(SettingStore::in_memory());
    let classes = engine.classes_for(ElementKind::Body);
    assert!(classes.contains("text-base"));
    assert!(classes.contains("leading-relaxed"));
    assert!(classes.contains("font-normal"));
}

#[test]
fn reset_restores_defaults() {
    let (engine, surface) = engine_with(SettingStore::in_memory());
    engine.update(|s| s.letter_spacing = LetterSpacing::Wide);
    engine.reset();
    assert_eq!(engine.settings(), TypographySettings::default());
    assert_eq!(surface.property(LETTER_SPACING_PROPERTY).as_deref(), Some("0em"));
}
