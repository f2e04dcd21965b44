//! Path-addressable storage for JSON-shaped records.
//!
//! [`PathStore`] wraps a JSON object and addresses its contents with dot-delimited paths
//! such as `"user.profile.name"`. Writes create any missing intermediate mappings; reads
//! never mutate the store.
//!
//! # Usage
//!
//! ```
//! use formshape::PathStore;
//! use serde_json::json;
//!
//! let mut store = PathStore::new();
//! store.set_path("user.profile.name", json!("Alice"));
//!
//! assert_eq!(store.get_path("user.profile.name"), Some(&json!("Alice")));
//! assert_eq!(store.get_path_or("user.profile.age", &json!(0)), &json!(0));
//! assert_eq!(store.as_map()["user"], json!({"profile": {"name": "Alice"}}));
//! ```

use serde_json::{Map, Value};

use crate::dataobj::DataObjError;

/// Splits a dotted path into its segments.
///
/// Splitting is literal: `"a..b"` yields `["a", "", "b"]` and `""` yields `[""]`, so that every
/// path string round-trips through [`PathStore::set_path`] and [`PathStore::get_path`].
pub fn segments(path: &str) -> Vec<&str> {
    path.split('.').collect()
}

/// A nested JSON mapping addressed by dot-delimited paths.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PathStore {
    data: Map<String, Value>,
}

impl PathStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self { data: Map::new() }
    }

    /// Wraps an existing mapping.
    pub fn from_map(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Wraps a raw JSON value, which must be an object.
    pub fn from_value(raw: Value) -> Result<Self, DataObjError> {
        match raw {
            Value::Object(data) => Ok(Self { data }),
            other => Err(DataObjError::Structure {
                reason: format!("expected a JSON object at the root, found {}", type_name(&other)),
            }),
        }
    }

    /// Returns true if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Immutable access to the underlying mapping.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Consumes the store, returning its contents as a JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.data)
    }

    /// Sets `value` at `path`, returning the previous leaf value if there was one.
    ///
    /// Every segment but the last names a mapping which is created when missing. A
    /// non-mapping value found at an intermediate segment is replaced by an empty mapping so
    /// that navigation can continue.
    pub fn set_path(&mut self, path: &str, value: Value) -> Option<Value> {
        let parts = segments(path);
        let (last, parents) = parts.split_last()?;

        let mut current = &mut self.data;
        for segment in parents {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                tracing::debug!(
                    path,
                    segment,
                    found = type_name(entry),
                    "replacing non-mapping intermediate value"
                );
                *entry = Value::Object(Map::new());
            }
            current = match entry {
                Value::Object(map) => map,
                _ => unreachable!("intermediate entry was just made a mapping"),
            };
        }

        current.insert(last.to_string(), value)
    }

    /// Gets the value at `path`, if present.
    ///
    /// A missing or non-mapping intermediate segment reads as absent.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let parts = segments(path);
        let (last, parents) = parts.split_last()?;

        let mut current = &self.data;
        for segment in parents {
            current = current.get(*segment)?.as_object()?;
        }
        current.get(*last)
    }

    /// Gets the value at `path`, or `default` when it is absent.
    pub fn get_path_or<'a>(&'a self, path: &str, default: &'a Value) -> &'a Value {
        self.get_path(path).unwrap_or(default)
    }

    /// Gets a mutable reference to an existing value at `path`.
    pub fn get_path_mut(&mut self, path: &str) -> Option<&mut Value> {
        let parts = segments(path);
        let (last, parents) = parts.split_last()?;

        let mut current = &mut self.data;
        for segment in parents {
            current = current.get_mut(*segment)?.as_object_mut()?;
        }
        current.get_mut(*last)
    }

    /// Returns the immediate keys of the mapping at `path`, in storage order.
    ///
    /// Returns an empty list when nothing, or a non-mapping value, lives at `path`.
    pub fn keys_at(&self, path: &str) -> Vec<String> {
        match self.get_path(path) {
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Removes the value at `path`, returning it.
    ///
    /// With `prune`, every mapping along the path that is left empty by the removal is
    /// removed as well, innermost first.
    pub fn delete_path(&mut self, path: &str, prune: bool) -> Option<Value> {
        let parts = segments(path);
        let removed = remove_in(&mut self.data, &parts, prune);
        if removed.is_some() {
            tracing::debug!(path, prune, "deleted path");
        }
        removed
    }
}

fn remove_in(map: &mut Map<String, Value>, parts: &[&str], prune: bool) -> Option<Value> {
    let (first, rest) = parts.split_first()?;
    if rest.is_empty() {
        return map.remove(*first);
    }

    let child = map.get_mut(*first)?.as_object_mut()?;
    let removed = remove_in(child, rest, prune)?;
    if prune && child.is_empty() {
        map.remove(*first);
    }
    Some(removed)
}

impl From<Map<String, Value>> for PathStore {
    fn from(data: Map<String, Value>) -> Self {
        Self::from_map(data)
    }
}

/// Short human-readable name of a JSON value's type, used in error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
