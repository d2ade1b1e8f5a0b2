use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

use super::backend::{FilesystemSettingsBackend, MemorySettingsBackend, SettingsBackend};
use super::errors::SettingsError;
use super::schema::SettingSchema;
use super::store::{SettingStore, DEFAULT_EVENT_CAPACITY};
use super::{FocusModeSettings, ReadingWidth};

/// Accepts nothing: every write fails.
struct FailingBackend;

impl SettingsBackend for FailingBackend {
    fn load_all(&self) -> Result<BTreeMap<String, JsonValue>, SettingsError> {
        Err(SettingsError::PersistenceError {
            operation: "load".to_string(),
            key: "*".to_string(),
            message: "quota exceeded".to_string(),
            source: None,
        })
    }

    fn save(&self, key: &str, _value: &JsonValue) -> Result<(), SettingsError> {
        Err(SettingsError::PersistenceError {
            operation: "save".to_string(),
            key: key.to_string(),
            message: "quota exceeded".to_string(),
            source: None,
        })
    }

    fn remove(&self, _key: &str) -> Result<(), SettingsError> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Counter {
    value: u32,
}

#[test]
fn read_before_write_returns_default() {
    let store = SettingStore::in_memory();
    let default = json!({"fontSize": "medium"});
    assert_eq!(store.read("typography-settings", default.clone()), default);
    // Reading does not materialize anything.
    assert!(!store.contains("typography-settings"));
}

#[test]
fn write_then_read_in_same_turn() {
    let store = SettingStore::in_memory();
    store.write("k", &5);
    assert_eq!(store.read("k", 0), 5);
}

#[test]
fn undecodable_value_reads_as_default() {
    let backend = MemorySettingsBackend::with_entries([("counter", json!("not a counter"))]);
    let store = SettingStore::new(Arc::new(backend), DEFAULT_EVENT_CAPACITY);
    assert_eq!(store.read("counter", Counter { value: 7 }), Counter { value: 7 });
}

#[test]
fn update_applies_function_of_previous_value() {
    let store = SettingStore::in_memory();
    let first = store.update("counter", Counter { value: 1 }, |c| Counter {
        value: c.value + 1,
    });
    let second = store.update("counter", Counter { value: 1 }, |c| Counter {
        value: c.value * 10,
    });
    assert_eq!(first, Counter { value: 2 });
    assert_eq!(second, Counter { value: 20 });
    assert_eq!(store.read("counter", Counter { value: 0 }), Counter { value: 20 });
}

#[test]
fn writes_reach_backend_and_broadcast_after_commit() {
    let backend = Arc::new(MemorySettingsBackend::new());
    let store = SettingStore::new(backend.clone(), DEFAULT_EVENT_CAPACITY);
    let mut rx = store.subscribe();

    store.write("sabq-theme-mode", "dark");

    let event = rx.try_recv().unwrap();
    assert_eq!(event.key, "sabq-theme-mode");
    assert_eq!(event.new_value, Some(json!("dark")));
    assert_eq!(backend.snapshot()["sabq-theme-mode"], json!("dark"));
}

#[test]
fn failed_persistence_keeps_mirror_value() {
    let store = SettingStore::new(Arc::new(FailingBackend), DEFAULT_EVENT_CAPACITY);
    let mut rx = store.subscribe();

    store.write("k", &42);

    assert_eq!(store.read("k", 0), 42);
    assert!(rx.try_recv().is_ok(), "subscribers are still notified");
}

#[test]
fn remove_drops_key_and_notifies() {
    let backend = Arc::new(MemorySettingsBackend::new());
    let store = SettingStore::new(backend.clone(), DEFAULT_EVENT_CAPACITY);
    store.write("k", &1);
    let mut rx = store.subscribe();

    store.remove("k");
    store.remove("k");

    assert_eq!(store.read("k", 9), 9);
    assert!(backend.snapshot().is_empty());
    assert!(rx.try_recv().unwrap().is_removal());
    assert!(rx.try_recv().is_err(), "removing a missing key is silent");
}

#[test]
fn typed_handle_and_watcher() {
    let store = SettingStore::in_memory();
    let mode = store.setting("sabq-theme-mode", "light".to_string());
    let other = store.setting("other", 0u8);
    let mut watcher = mode.subscribe();

    assert_eq!(mode.get(), "light");
    other.set(&3);
    mode.set(&"dark".to_string());
    mode.update(|m| format!("{}!", m));
    mode.reset();

    assert_eq!(watcher.try_next().as_deref(), Some("dark"));
    assert_eq!(watcher.try_next().as_deref(), Some("dark!"));
    assert_eq!(watcher.try_next().as_deref(), Some("light"));
    assert_eq!(watcher.try_next(), None);
}

#[test]
fn filesystem_store_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");

    let open = || {
        SettingStore::new(
            Arc::new(FilesystemSettingsBackend::new(&path)),
            DEFAULT_EVENT_CAPACITY,
        )
    };

    let first = open();
    first.write("k", &Counter { value: 11 });
    first.save_schema(&FocusModeSettings {
        enabled: true,
        ..FocusModeSettings::default()
    });

    let second = open();
    assert_eq!(second.read("k", Counter { value: 0 }), Counter { value: 11 });
    assert!(second.load_schema::<FocusModeSettings>().enabled);
}

#[test]
fn schema_is_stored_in_envelope() {
    let backend = Arc::new(MemorySettingsBackend::new());
    let store = SettingStore::new(backend.clone(), DEFAULT_EVENT_CAPACITY);

    store.update_schema::<FocusModeSettings>(|s| s.reading_width = ReadingWidth::Narrow);

    assert_eq!(
        backend.snapshot()["focus-mode-settings"],
        json!({
            "schemaVersion": 1,
            "data": {
                "enabled": false,
                "hideSidebar": true,
                "dimDistractions": true,
                "readingWidth": "narrow"
            }
        })
    );
}

#[test]
fn plain_reads_and_handles_share_the_schema_record() {
    let backend = Arc::new(MemorySettingsBackend::new());
    let store = SettingStore::new(backend.clone(), DEFAULT_EVENT_CAPACITY);
    let enabled = FocusModeSettings {
        enabled: true,
        ..FocusModeSettings::default()
    };

    store.save_schema(&enabled);
    assert_eq!(store.read(FocusModeSettings::KEY, FocusModeSettings::default()), enabled);

    let handle = store.setting(FocusModeSettings::KEY, FocusModeSettings::default());
    let mut watcher = handle.subscribe();
    let narrow = FocusModeSettings {
        reading_width: ReadingWidth::Narrow,
        ..enabled
    };
    handle.set(&narrow);
    handle.set(&FocusModeSettings::default());

    assert_eq!(watcher.try_next(), Some(narrow));
    assert_eq!(store.load_schema::<FocusModeSettings>(), FocusModeSettings::default());
    assert_eq!(
        backend.snapshot()[FocusModeSettings::KEY]["schemaVersion"],
        json!(1),
        "plain writes keep the versioned shape"
    );
}

#[test]
fn update_closure_may_read_the_store() {
    let store = SettingStore::in_memory();
    store.write("limit", &5);
    let (done_tx, done_rx) = mpsc::channel();

    let worker = store.clone();
    thread::spawn(move || {
        let reader = worker.clone();
        let value = worker.update("count", 0, |count: i32| count + reader.read("limit", 0));
        let _ = done_tx.send(value);
    });

    assert_eq!(done_rx.recv_timeout(Duration::from_secs(5)), Ok(5));
    assert_eq!(store.read("count", 0), 5);
}

#[test]
fn concurrent_writers_leave_mirror_and_backend_in_agreement() {
    let backend = Arc::new(MemorySettingsBackend::new());
    let store = SettingStore::new(backend.clone(), DEFAULT_EVENT_CAPACITY);

    let writers: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            thread::spawn(move || {
                for round in 0..50 {
                    store.write("shared", &(i * 100 + round));
                }
                store.update("total", 0, |t: i32| t + 1);
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    let snapshot = backend.snapshot();
    assert_eq!(store.read_raw("shared").as_ref(), snapshot.get("shared"));
    assert_eq!(store.read("total", 0), 8);
    assert_eq!(snapshot["total"], json!(8));
}

static MIGRATIONS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
struct Volume {
    percent: u8,
}

impl SettingSchema for Volume {
    const KEY: &'static str = "volume";
    const VERSION: u32 = 2;

    fn migrate(from_version: u32, data: JsonValue) -> Result<JsonValue, SettingsError> {
        MIGRATIONS.fetch_add(1, Ordering::SeqCst);
        match (from_version, data.as_f64()) {
            // Version 0 stored a bare fraction.
            (0, Some(fraction)) => Ok(json!({"percent": (fraction * 100.0).round() as u8})),
            _ => Err(SettingsError::MigrationFailed {
                key: Self::KEY.to_string(),
                from_version,
                reason: "unrecognized legacy shape".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
struct Brightness {
    level: u8,
}

impl SettingSchema for Brightness {
    const KEY: &'static str = "brightness";
    const VERSION: u32 = 1;

    fn migrate(from_version: u32, _data: JsonValue) -> Result<JsonValue, SettingsError> {
        Err(SettingsError::MigrationFailed {
            key: Self::KEY.to_string(),
            from_version,
            reason: "no migration path".to_string(),
        })
    }
}

#[test]
fn legacy_value_migrates_once_and_is_written_back() {
    let backend = Arc::new(MemorySettingsBackend::with_entries([("volume", json!(0.35))]));
    let store = SettingStore::new(backend.clone(), DEFAULT_EVENT_CAPACITY);
    let before = MIGRATIONS.load(Ordering::SeqCst);

    assert_eq!(store.load_schema::<Volume>(), Volume { percent: 35 });
    assert_eq!(store.load_schema::<Volume>(), Volume { percent: 35 });

    // A fresh store over the migrated record reads it directly.
    let reopened = SettingStore::new(backend.clone(), DEFAULT_EVENT_CAPACITY);
    assert_eq!(reopened.load_schema::<Volume>(), Volume { percent: 35 });

    assert_eq!(MIGRATIONS.load(Ordering::SeqCst) - before, 1);
    assert_eq!(
        backend.snapshot()["volume"],
        json!({"schemaVersion": 2, "data": {"percent": 35}})
    );
}

#[test]
fn failed_migration_yields_default() {
    let backend = MemorySettingsBackend::with_entries([("brightness", json!({"level": "max"}))]);
    let store = SettingStore::new(Arc::new(backend), DEFAULT_EVENT_CAPACITY);
    assert_eq!(store.load_schema::<Brightness>(), Brightness::default());
    assert_eq!(store.load_schema::<Brightness>(), Brightness::default());
}

#[test]
fn newer_schema_version_yields_default() {
    let backend = MemorySettingsBackend::with_entries([(
        "brightness",
        json!({"schemaVersion": 9, "data": {"level": 3}}),
    )]);
    let store = SettingStore::new(Arc::new(backend), DEFAULT_EVENT_CAPACITY);
    assert_eq!(store.load_schema::<Brightness>(), Brightness::default());
}

#[test]
fn unreadable_backend_starts_empty() {
    let store = SettingStore::new(Arc::new(FailingBackend), DEFAULT_EVENT_CAPACITY);
    assert!(store.keys().is_empty());
}
