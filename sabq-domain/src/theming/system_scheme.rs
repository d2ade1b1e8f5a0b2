//! OS light/dark preference tracking.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

pub type SchemeListener = Arc<dyn Fn(bool) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Where the "prefers dark" signal comes from.
pub trait ColorSchemeSource: Send + Sync {
    fn prefers_dark(&self) -> bool;
    fn add_listener(&self, listener: SchemeListener) -> ListenerId;
    fn remove_listener(&self, id: ListenerId);
}

struct ManualSourceState {
    prefers_dark: bool,
    next_id: u64,
    listeners: BTreeMap<ListenerId, SchemeListener>,
}

/// A source driven by explicit calls, for hosts that forward the OS signal
/// themselves and for tests.
pub struct ManualColorSchemeSource {
    state: Mutex<ManualSourceState>,
}

impl ManualColorSchemeSource {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            state: Mutex::new(ManualSourceState {
                prefers_dark,
                next_id: 0,
                listeners: BTreeMap::new(),
            }),
        }
    }

    /// Updates the preference and notifies listeners when it changed.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        let listeners: Vec<SchemeListener> = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.prefers_dark == prefers_dark {
                return;
            }
            state.prefers_dark = prefers_dark;
            state.listeners.values().cloned().collect()
        };
        debug!("System color scheme changed (prefers dark: {})", prefers_dark);
        // Called without the lock so listeners may unsubscribe.
        for listener in listeners {
            listener(prefers_dark);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).listeners.len()
    }
}

impl Default for ManualColorSchemeSource {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ColorSchemeSource for ManualColorSchemeSource {
    fn prefers_dark(&self) -> bool {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).prefers_dark
    }

    fn add_listener(&self, listener: SchemeListener) -> ListenerId {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        state.listeners.insert(id, listener);
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).listeners.remove(&id);
    }
}

/// Keeps a scheme listener registered. Dropping it unsubscribes.
pub struct SchemeSubscription {
    source: Arc<dyn ColorSchemeSource>,
    id: Mutex<Option<ListenerId>>,
}

impl SchemeSubscription {
    pub fn unsubscribe(&self) {
        if let Some(id) = self.id.lock().unwrap_or_else(PoisonError::into_inner).take() {
            self.source.remove_listener(id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.id.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

impl Drop for SchemeSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for SchemeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemeSubscription").field("active", &self.is_active()).finish()
    }
}

/// Calls `callback` with the current preference, then on every change until
/// the returned subscription is unsubscribed or dropped.
pub fn setup_system_theme_detection<F>(
    source: Arc<dyn ColorSchemeSource>,
    callback: F,
) -> SchemeSubscription
where
    F: Fn(bool) + Send + Sync + 'static,
{
    let callback: SchemeListener = Arc::new(callback);
    callback(source.prefers_dark());
    let id = source.add_listener(callback);
    SchemeSubscription {
        source,
        id: Mutex::new(Some(id)),
    }
}
