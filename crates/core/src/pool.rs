//! The context pool: everything known about one generation request.
//!
//! The pool is collected by the pipeline bootstrap before any production
//! stage runs (brand facts, voice, benchmarks, keyword research, product
//! data, semantic fields). It is treated as a read-only snapshot for the
//! lifetime of the request: stages never see a half-written field because
//! appending a completed stage's output produces a *new* pool value rather
//! than mutating the old one in place.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An immutable snapshot of all context data for one generation request.
///
/// Field values are arbitrary JSON: strings (brand, voice, products prose),
/// arrays (keyword records), or nested objects (semantic fields). Every
/// accessor is total — a missing or wrongly-typed field degrades to the
/// type-appropriate empty value, since absence of optional upstream data is
/// expected, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextPool {
    fields: Map<String, Value>,
}

impl ContextPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from an already-parsed JSON object.
    pub fn from_object(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a pool from any JSON value; fails unless the value is an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(Error::PoolNotAnObject {
                kind: json_kind(&other),
            }),
        }
    }

    /// Raw access to a field, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// A field's value cloned out of the pool, or `default` when absent.
    pub fn value_or(&self, name: &str, default: Value) -> Value {
        self.fields.get(name).cloned().unwrap_or(default)
    }

    /// A string field; missing or non-string values yield the empty string.
    pub fn string_field(&self, name: &str) -> String {
        match self.fields.get(name) {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        }
    }

    /// An array field; missing or non-array values yield an empty vec.
    pub fn array_field(&self, name: &str) -> Vec<Value> {
        match self.fields.get(name) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    /// An object field; missing or non-object values yield an empty map.
    pub fn object_field(&self, name: &str) -> Map<String, Value> {
        match self.fields.get(name) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }

    /// Names of all fields, in insertion order.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Produce a new pool with one extra field appended.
    ///
    /// Fields are append-only: recording over an existing name is rejected so
    /// a stage output can never silently shadow collected context (or another
    /// stage's output).
    pub fn append(&self, name: &str, value: Value) -> Result<Self> {
        if self.fields.contains_key(name) {
            return Err(Error::DuplicateField(name.to_string()));
        }
        let mut fields = self.fields.clone();
        fields.insert(name.to_string(), value);
        Ok(Self { fields })
    }

    /// Record a completed stage's raw textual output under `field`
    /// (e.g. `strategy_output`), yielding the successor pool.
    pub fn append_stage_output(&self, field: &str, output: &str) -> Result<Self> {
        self.append(field, Value::String(output.to_string()))
    }

    /// The underlying field map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
