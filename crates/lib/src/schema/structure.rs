//! Structural validation of raw records.
//!
//! Field schemas check values as they pass through the field API. Records that arrive
//! whole (e.g. a CRUD response) can additionally be checked against a [`Structure`], which
//! declares every permitted key and the shape of its value.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::{dataobj::DataObjError, path::type_name};

/// Declared shape of a JSON record.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    /// Keys holding booleans
    pub bools: Vec<String>,
    /// Keys holding strings or numbers
    pub fields: Vec<String>,
    /// Keys holding lists
    pub lists: Vec<String>,
    /// Keys holding objects
    pub objects: Vec<String>,
    /// Shape of each entry of a list; entries of lists without one must be scalars
    pub list_entries: HashMap<String, Structure>,
    /// Shape of an object; objects without one are not checked further
    pub object_entries: HashMap<String, Structure>,
}

fn names(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bools(mut self, keys: &[&str]) -> Self {
        self.bools.extend(names(keys));
        self
    }

    pub fn with_fields(mut self, keys: &[&str]) -> Self {
        self.fields.extend(names(keys));
        self
    }

    pub fn with_lists(mut self, keys: &[&str]) -> Self {
        self.lists.extend(names(keys));
        self
    }

    pub fn with_objects(mut self, keys: &[&str]) -> Self {
        self.objects.extend(names(keys));
        self
    }

    pub fn with_list_entry(mut self, key: impl Into<String>, entry: Structure) -> Self {
        self.list_entries.insert(key.into(), entry);
        self
    }

    pub fn with_object_entry(mut self, key: impl Into<String>, entry: Structure) -> Self {
        self.object_entries.insert(key.into(), entry);
        self
    }

    fn declares(&self, key: &str) -> bool {
        [&self.bools, &self.fields, &self.lists, &self.objects]
            .iter()
            .any(|keys| keys.iter().any(|k| k == key))
    }

    /// Checks `record` against this structure, failing on the first violation.
    pub fn validate(&self, record: &Map<String, Value>) -> Result<(), DataObjError> {
        for (key, value) in record {
            if !self.declares(key) {
                return Err(violation(format!(
                    "object contains key {key} which is not permitted"
                )));
            }

            if self.bools.contains(key) && !value.is_boolean() {
                return Err(mismatch(key, "bool", value));
            }

            if self.fields.contains(key) && !is_scalar(value) {
                return Err(mismatch(key, "string or number", value));
            }

            if self.lists.contains(key) {
                let Value::Array(entries) = value else {
                    return Err(mismatch(key, "list", value));
                };
                match self.list_entries.get(key) {
                    Some(entry_structure) => {
                        for entry in entries {
                            let Value::Object(entry) = entry else {
                                return Err(mismatch(key, "list of objects", entry));
                            };
                            entry_structure.validate(entry)?;
                        }
                    }
                    None => {
                        if let Some(bad) = entries.iter().find(|e| !is_scalar(e)) {
                            return Err(mismatch(key, "list of strings or numbers", bad));
                        }
                    }
                }
            }

            if self.objects.contains(key) {
                let Value::Object(object) = value else {
                    return Err(mismatch(key, "object", value));
                };
                if let Some(object_structure) = self.object_entries.get(key) {
                    object_structure.validate(object)?;
                }
            }
        }
        Ok(())
    }
}

fn is_scalar(value: &Value) -> bool {
    value.is_string() || value.is_number()
}

fn violation(reason: String) -> DataObjError {
    DataObjError::Structure { reason }
}

fn mismatch(key: &str, expected: &str, value: &Value) -> DataObjError {
    violation(format!(
        "object contains {key} = {value} ({}) but expected {expected}",
        type_name(value)
    ))
}
