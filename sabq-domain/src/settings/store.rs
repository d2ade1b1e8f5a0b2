//! The persisted key/value setting store.
//!
//! [`SettingStore`] keeps an in-memory mirror of every key. Reads are served
//! from the mirror and never fail: a missing or undecodable value yields the
//! caller's default. Writes update the mirror first, hand the value to the
//! [`SettingsBackend`], then broadcast a [`SettingChangedEvent`]. Backend
//! failures are logged and do not undo the mirror update. Writers are
//! serialized, so the backend always ends up with the mirror's last value.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, error, info, warn};

use sabq_core::utils::string_utils::truncate_string;

use super::backend::{MemorySettingsBackend, SettingsBackend};
use super::errors::SettingsError;
use super::events::SettingChangedEvent;
use super::schema::{SchemaEnvelope, SettingSchema};

pub const DEFAULT_EVENT_CAPACITY: usize = 64;

struct StoreInner {
    mirror: RwLock<HashMap<String, JsonValue>>,
    backend: Arc<dyn SettingsBackend>,
    event_sender: broadcast::Sender<SettingChangedEvent>,
    /// Held across mirror update, backend write and broadcast so that the
    /// mirror and the backend agree on the last writer of every key.
    commit_lock: Mutex<()>,
}

#[derive(Clone)]
pub struct SettingStore {
    inner: Arc<StoreInner>,
}

impl std::fmt::Debug for SettingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingStore").field("keys", &self.keys()).finish()
    }
}

impl SettingStore {
    /// Creates a store and fills the mirror from `backend`.
    ///
    /// A backend that cannot be read leaves the mirror empty; the store still
    /// works and later writes are attempted as usual.
    pub fn new(backend: Arc<dyn SettingsBackend>, event_capacity: usize) -> Self {
        let mirror: HashMap<String, JsonValue> = match backend.load_all() {
            Ok(entries) => {
                debug!("Setting store loaded {} persisted key(s)", entries.len());
                entries.into_iter().collect()
            }
            Err(e) => {
                warn!("Failed to load persisted settings, starting empty: {}", e);
                HashMap::new()
            }
        };
        let (event_sender, _) = broadcast::channel(event_capacity.max(1));
        Self {
            inner: Arc::new(StoreInner {
                mirror: RwLock::new(mirror),
                backend,
                event_sender,
                commit_lock: Mutex::new(()),
            }),
        }
    }

    /// A store over a fresh [`MemorySettingsBackend`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySettingsBackend::new()), DEFAULT_EVENT_CAPACITY)
    }

    /// Decodes a stored value. Versioned values are read through their
    /// envelope, so plain reads and schema loads see the same record.
    fn decode<T: DeserializeOwned>(key: &str, raw: &JsonValue) -> Option<T> {
        let data = match SchemaEnvelope::parse(raw) {
            Some(envelope) => envelope.data,
            None => raw.clone(),
        };
        match serde_json::from_value(data) {
            Ok(value) => Some(value),
            Err(source) => {
                let err = SettingsError::DeserializationError {
                    key: key.to_string(),
                    source,
                };
                warn!(
                    "{}; stored value '{}' is ignored",
                    err,
                    truncate_string(&raw.to_string(), 80)
                );
                None
            }
        }
    }

    /// Returns the last written value for `key`, or `default`.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.read_raw(key)
            .and_then(|raw| Self::decode(key, &raw))
            .unwrap_or(default)
    }

    /// The raw JSON held in the mirror, if any.
    pub fn read_raw(&self, key: &str) -> Option<JsonValue> {
        self.inner
            .mirror
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner
            .mirror
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// All keys currently held, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .inner
            .mirror
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// Replaces the value under `key`.
    ///
    /// A value that cannot be represented as JSON is logged and dropped.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(raw) => self.write_raw(key, raw),
            Err(source) => {
                error!(
                    "{}",
                    SettingsError::SerializationError {
                        key: key.to_string(),
                        source
                    }
                );
            }
        }
    }

    /// Replaces the value under `key` with `raw`.
    ///
    /// When the key holds a versioned record, a plain value is stored inside
    /// an envelope of the same version so the record keeps its shape.
    pub fn write_raw(&self, key: &str, raw: JsonValue) {
        let _commit = self.lock_commits();
        self.commit_locked(key, raw);
    }

    /// Read-modify-write: `f` receives the current value (or `default`) and
    /// returns the replacement, which is also returned to the caller.
    ///
    /// Writers are serialized while `f` runs. `f` may read the store but must
    /// not write to it.
    pub fn update<T, F>(&self, key: &str, default: T, f: F) -> T
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(T) -> T,
    {
        let _commit = self.lock_commits();
        let next = f(self.read(key, default));
        match serde_json::to_value(&next) {
            Ok(raw) => self.commit_locked(key, raw),
            Err(source) => {
                error!(
                    "{}",
                    SettingsError::SerializationError {
                        key: key.to_string(),
                        source
                    }
                );
            }
        }
        next
    }

    /// Drops `key` from the mirror and the backend.
    pub fn remove(&self, key: &str) {
        let _commit = self.lock_commits();
        let existed = self
            .inner
            .mirror
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some();
        if !existed {
            return;
        }
        if let Err(e) = self.inner.backend.remove(key) {
            error!("Failed to remove persisted setting '{}': {}", key, e);
        }
        self.broadcast(SettingChangedEvent::removed(key));
    }

    fn lock_commits(&self) -> MutexGuard<'_, ()> {
        self.inner
            .commit_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Caller holds the commit lock.
    fn commit_locked(&self, key: &str, raw: JsonValue) {
        let raw = {
            let mut mirror = self
                .inner
                .mirror
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let existing_version = mirror
                .get(key)
                .and_then(SchemaEnvelope::parse)
                .map(|envelope| envelope.schema_version);
            let raw = match existing_version {
                Some(version) if SchemaEnvelope::parse(&raw).is_none() => {
                    SchemaEnvelope::new(version, raw).into_json()
                }
                _ => raw,
            };
            mirror.insert(key.to_string(), raw.clone());
            raw
        };
        if let Err(e) = self.inner.backend.save(key, &raw) {
            error!(
                "Failed to persist setting '{}' (value kept in memory): {}",
                key, e
            );
        }
        self.broadcast(SettingChangedEvent::updated(key, raw));
    }

    fn broadcast(&self, event: SettingChangedEvent) {
        // Sending fails only when nobody is subscribed.
        if self.inner.event_sender.send(event).is_err() {
            debug!("No subscribers for setting change events");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SettingChangedEvent> {
        self.inner.event_sender.subscribe()
    }

    /// A typed handle for one key.
    pub fn setting<T>(&self, key: &str, default: T) -> Setting<T>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        Setting {
            store: self.clone(),
            key: key.to_string(),
            default,
        }
    }

    /// Decodes a versioned setting. The second element is the envelope to
    /// write back when the stored value had to be migrated.
    fn resolve_schema<S: SettingSchema>(&self) -> (S, Option<JsonValue>) {
        let Some(raw) = self.read_raw(S::KEY) else {
            return (S::default(), None);
        };
        let envelope = SchemaEnvelope::from_raw(&raw);

        if envelope.schema_version == S::VERSION {
            return (Self::decode(S::KEY, &raw).unwrap_or_default(), None);
        }
        if envelope.schema_version > S::VERSION {
            warn!(
                "{}; using defaults",
                SettingsError::UnsupportedVersion {
                    key: S::KEY.to_string(),
                    found: envelope.schema_version,
                    supported: S::VERSION,
                }
            );
            return (S::default(), None);
        }

        let from_version = envelope.schema_version;
        let migrated = S::migrate(from_version, envelope.data).and_then(|data| {
            let value = serde_json::from_value::<S>(data.clone()).map_err(|source| {
                SettingsError::DeserializationError {
                    key: S::KEY.to_string(),
                    source,
                }
            })?;
            Ok((value, data))
        });
        match migrated {
            Ok((value, data)) => {
                info!(
                    "Migrated setting '{}' from schema version {} to {}",
                    S::KEY,
                    from_version,
                    S::VERSION
                );
                let envelope = SchemaEnvelope::new(S::VERSION, data).into_json();
                (value, Some(envelope))
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                (S::default(), None)
            }
        }
    }

    /// Loads a versioned setting.
    ///
    /// An older stored version is migrated and the result written back, so
    /// later loads read it directly. A failed migration leaves the stored
    /// value untouched and yields the default.
    pub fn load_schema<S: SettingSchema>(&self) -> S {
        let (value, migrated) = self.resolve_schema::<S>();
        if let Some(envelope) = migrated {
            let _commit = self.lock_commits();
            self.commit_locked(S::KEY, envelope);
        }
        value
    }

    fn schema_envelope<S: SettingSchema>(value: &S) -> Option<JsonValue> {
        match serde_json::to_value(value) {
            Ok(data) => Some(SchemaEnvelope::new(S::VERSION, data).into_json()),
            Err(source) => {
                error!(
                    "{}",
                    SettingsError::SerializationError {
                        key: S::KEY.to_string(),
                        source
                    }
                );
                None
            }
        }
    }

    /// Stores `value` inside a current-version envelope.
    pub fn save_schema<S: SettingSchema>(&self, value: &S) {
        if let Some(envelope) = Self::schema_envelope(value) {
            self.write_raw(S::KEY, envelope);
        }
    }

    /// Loads, edits in place and saves a versioned setting as one write.
    /// `f` must not write to the store.
    pub fn update_schema<S: SettingSchema>(&self, f: impl FnOnce(&mut S)) -> S {
        let _commit = self.lock_commits();
        let (mut value, _) = self.resolve_schema::<S>();
        f(&mut value);
        if let Some(envelope) = Self::schema_envelope(&value) {
            self.commit_locked(S::KEY, envelope);
        }
        value
    }
}

/// A typed view of one key in a [`SettingStore`].
///
/// Every feature setting uses this same shape: `get` falls back to the
/// handle's default, `set` and `update` write through the store.
#[derive(Clone)]
pub struct Setting<T> {
    store: SettingStore,
    key: String,
    default: T,
}

impl<T> Setting<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    pub fn get(&self) -> T {
        self.store.read(&self.key, self.default.clone())
    }

    pub fn set(&self, value: &T) {
        self.store.write(&self.key, value);
    }

    pub fn update(&self, f: impl FnOnce(T) -> T) -> T {
        self.store.update(&self.key, self.default.clone(), f)
    }

    /// Removes the stored value so `get` returns the default again.
    pub fn reset(&self) {
        self.store.remove(&self.key);
    }

    /// Watches changes of this key only.
    pub fn subscribe(&self) -> SettingWatcher<T> {
        SettingWatcher {
            receiver: self.store.subscribe(),
            key: self.key.clone(),
            default: self.default.clone(),
        }
    }
}

/// Receiver of one key's changes, decoded to `T`. Removals yield the default.
pub struct SettingWatcher<T> {
    receiver: broadcast::Receiver<SettingChangedEvent>,
    key: String,
    default: T,
}

impl<T> SettingWatcher<T>
where
    T: DeserializeOwned + Clone,
{
    /// The next pending change of the watched key, without blocking.
    pub fn try_next(&mut self) -> Option<T> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if event.key == self.key => {
                    return Some(match event.new_value {
                        Some(raw) => SettingStore::decode(&self.key, &raw)
                            .unwrap_or_else(|| self.default.clone()),
                        None => self.default.clone(),
                    });
                }
                Ok(_) => continue,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Watcher for '{}' lagged behind by {} event(s)", self.key, skipped);
                    continue;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}
