//! The document root as seen by the engines.
//!
//! Both engines talk to the renderer only through CSS custom properties and
//! named groups of root classes. [`StyleSurface`] is that seam;
//! [`InMemoryStyleSurface`] is the implementation used by the service and in
//! tests, and can render itself as a `:root` block.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::{PoisonError, RwLock};

pub trait StyleSurface: Send + Sync {
    /// `name` includes the leading `--`.
    fn set_property(&self, name: &str, value: &str);
    fn remove_property(&self, name: &str);
    fn property(&self, name: &str) -> Option<String>;
    /// Replaces the classes owned by `group`. An empty string clears the group.
    fn set_root_classes(&self, group: &str, classes: &str);
    fn root_classes(&self, group: &str) -> Option<String>;
}

#[derive(Debug, Default)]
struct SurfaceState {
    properties: BTreeMap<String, String>,
    class_groups: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
pub struct InMemoryStyleSurface {
    state: RwLock<SurfaceState>,
}

impl InMemoryStyleSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn properties(&self) -> BTreeMap<String, String> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).properties.clone()
    }

    /// Every root class, groups in name order.
    pub fn class_attribute(&self) -> String {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .class_groups
            .values()
            .filter(|classes| !classes.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Renders the properties as a `:root` rule, sorted by name.
    pub fn to_css(&self) -> String {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let mut css = String::from(":root {\n");
        for (name, value) in &state.properties {
            let _ = writeln!(css, "  {}: {};", name, value);
        }
        css.push_str("}\n");
        css
    }
}

impl StyleSurface for InMemoryStyleSurface {
    fn set_property(&self, name: &str, value: &str) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .properties
            .insert(name.to_string(), value.to_string());
    }

    fn remove_property(&self, name: &str) {
        self.state.write().unwrap_or_else(PoisonError::into_inner).properties.remove(name);
    }

    fn property(&self, name: &str) -> Option<String> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).properties.get(name).cloned()
    }

    fn set_root_classes(&self, group: &str, classes: &str) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if classes.trim().is_empty() {
            state.class_groups.remove(group);
        } else {
            state.class_groups.insert(group.to_string(), classes.trim().to_string());
        }
    }

    fn root_classes(&self, group: &str) -> Option<String> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).class_groups.get(group).cloned()
    }
}
