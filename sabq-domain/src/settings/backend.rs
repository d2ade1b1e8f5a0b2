//! Durable storage behind the [`SettingStore`](super::SettingStore) mirror.
//!
//! A backend holds one JSON value per key. The store loads everything once at
//! construction and afterwards only pushes single-key writes and removals.

use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

use sabq_core::utils::fs as sabq_fs;

use super::errors::SettingsError;

pub trait SettingsBackend: Send + Sync {
    /// Every stored key with its raw JSON value.
    fn load_all(&self) -> Result<BTreeMap<String, JsonValue>, SettingsError>;
    fn save(&self, key: &str, value: &JsonValue) -> Result<(), SettingsError>;
    fn remove(&self, key: &str) -> Result<(), SettingsError>;
}

/// Process-local backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySettingsBackend {
    entries: Mutex<BTreeMap<String, JsonValue>>,
}

impl MemorySettingsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with pre-existing entries, as if written by an earlier session.
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, JsonValue)>,
        K: Into<String>,
    {
        Self {
            entries: Mutex::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    pub fn snapshot(&self) -> BTreeMap<String, JsonValue> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn with_entries_mut<R>(&self, f: impl FnOnce(&mut BTreeMap<String, JsonValue>) -> R) -> R {
        match self.entries.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl SettingsBackend for MemorySettingsBackend {
    fn load_all(&self) -> Result<BTreeMap<String, JsonValue>, SettingsError> {
        Ok(self.snapshot())
    }

    fn save(&self, key: &str, value: &JsonValue) -> Result<(), SettingsError> {
        self.with_entries_mut(|entries| entries.insert(key.to_string(), value.clone()));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.with_entries_mut(|entries| entries.remove(key));
        Ok(())
    }
}

/// One JSON object on disk holding every key.
///
/// Writes rewrite the whole document through a temporary file and a rename.
/// A document that does not parse as a JSON object is treated as empty.
#[derive(Debug)]
pub struct FilesystemSettingsBackend {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FilesystemSettingsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, JsonValue>, SettingsError> {
        let content = match sabq_fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.is_not_found() => {
                debug!("Settings document {:?} does not exist yet", self.path);
                return Ok(Map::new());
            }
            Err(e) => return Err(SettingsError::persistence_error_from_core("load", "*", e)),
        };

        match serde_json::from_str::<JsonValue>(&content) {
            Ok(JsonValue::Object(map)) => Ok(map),
            Ok(other) => {
                warn!(
                    "Settings document {:?} is not a JSON object (found {}); treating it as empty",
                    self.path,
                    json_kind(&other)
                );
                Ok(Map::new())
            }
            Err(e) => {
                warn!("Settings document {:?} is corrupt ({}); treating it as empty", self.path, e);
                Ok(Map::new())
            }
        }
    }

    fn modify_document(
        &self,
        operation: &str,
        key: &str,
        f: impl FnOnce(&mut Map<String, JsonValue>),
    ) -> Result<(), SettingsError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut document = self.read_document()?;
        f(&mut document);

        let serialized = serde_json::to_string_pretty(&JsonValue::Object(document))
            .map_err(|source| SettingsError::SerializationError { key: key.to_string(), source })?;
        sabq_fs::write_atomically(&self.path, &serialized)
            .map_err(|e| SettingsError::persistence_error_from_core(operation, key, e))?;
        debug!("Settings document {:?} updated ({} '{}')", self.path, operation, key);
        Ok(())
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

impl SettingsBackend for FilesystemSettingsBackend {
    fn load_all(&self) -> Result<BTreeMap<String, JsonValue>, SettingsError> {
        Ok(self.read_document()?.into_iter().collect())
    }

    fn save(&self, key: &str, value: &JsonValue) -> Result<(), SettingsError> {
        self.modify_document("save", key, |document| {
            document.insert(key.to_string(), value.clone());
        })
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.modify_document("remove", key, |document| {
            document.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_memory_backend_round_trip() {
        let backend = MemorySettingsBackend::new();
        backend.save("a", &json!(1)).unwrap();
        backend.save("b", &json!({"x": true})).unwrap();
        backend.remove("a").unwrap();

        let all = backend.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all["b"], json!({"x": true}));
    }

    #[test]
    fn test_filesystem_backend_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let backend = FilesystemSettingsBackend::new(dir.path().join("settings.json"));
        assert!(backend.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_filesystem_backend_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/settings.json");

        let first = FilesystemSettingsBackend::new(&path);
        first.save("sabq-theme-mode", &json!("dark")).unwrap();
        first.save("focus-mode-settings", &json!({"enabled": true})).unwrap();
        first.remove("focus-mode-settings").unwrap();

        let second = FilesystemSettingsBackend::new(&path);
        let all = second.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all["sabq-theme-mode"], json!("dark"));
    }

    #[test]
    fn test_filesystem_backend_corrupt_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let backend = FilesystemSettingsBackend::new(&path);
        assert!(backend.load_all().unwrap().is_empty());

        // The next write replaces the corrupt document with a valid one.
        backend.save("k", &json!(5)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let reparsed: JsonValue = serde_json::from_str(&written).unwrap();
        assert_eq!(reparsed, json!({"k": 5}));
    }

    #[test]
    fn test_filesystem_backend_non_object_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(FilesystemSettingsBackend::new(&path).load_all().unwrap().is_empty());
    }
}
