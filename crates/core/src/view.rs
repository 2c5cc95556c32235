//! Derived context views and their cache key.

use crate::role::Role;
use crate::stage::Stage;
use serde::Serialize;
use serde_json::{Map, Value};

/// A derived, size-bounded subset of the pool for one (role, stage) pair.
///
/// A view never aliases pool state: every sequence or mapping inside it is a
/// fresh copy, so a cached view can outlive pool snapshots and sit next to
/// other cached views without any shared mutable structure between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContextView {
    fields: Map<String, Value>,
}

impl ContextView {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a view from an existing field map.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Insert or overwrite a field on this view.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Field names, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume the view into a plain JSON object value.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Composite cache key for one derived view.
///
/// A proper (role, stage) pair rather than a joined string, so no delimiter
/// choice can ever make two distinct keys collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewKey {
    pub role: Role,
    pub stage: Stage,
}

impl ViewKey {
    pub fn new(role: Role, stage: Stage) -> Self {
        Self { role, stage }
    }
}

impl std::fmt::Display for ViewKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.role, self.stage)
    }
}
