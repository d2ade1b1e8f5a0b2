//! Persisted settings.
//!
//! Every feature preference (typography, focus mode, the current theme, the
//! saved theme library, the theme mode) is a JSON value under a well-known key
//! in a [`SettingStore`]. Versioned kinds implement [`SettingSchema`].

pub mod backend;
pub mod errors;
pub mod events;
pub mod focus_mode;
pub mod keys;
pub mod lenient;
pub mod schema;
pub mod store;

#[cfg(test)]
mod store_tests;

pub use backend::{FilesystemSettingsBackend, MemorySettingsBackend, SettingsBackend};
pub use errors::SettingsError;
pub use events::SettingChangedEvent;
pub use focus_mode::{FocusModeSettings, ReadingWidth};
pub use schema::{SchemaEnvelope, SettingSchema};
pub use store::{Setting, SettingStore, SettingWatcher, DEFAULT_EVENT_CAPACITY};
