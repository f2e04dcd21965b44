//! Schema-mediated data objects.
//!
//! [`DataObj`] stores a JSON record in a [`PathStore`] and exposes it through field names.
//! Every field access is resolved through the object's [`Schema`]: the schema entry names
//! the dotted path of the field, whether it is a single value or a list, and the rules
//! applied on the way in and out.
//!
//! Record types with a fixed schema implement the [`DataObject`] trait by delegating to an
//! inner `DataObj` (see `account::BasicAccount`). State is always per instance; only the
//! schema is shared.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use formshape::{DataObj, DataObject, FieldSpec, Range, Schema};
//! use formshape::coerce::Coerce;
//! use serde_json::json;
//!
//! let schema = Arc::new(
//!     Schema::new()
//!         .with("id", FieldSpec::single("id").with_coerce(Coerce::Text))
//!         .with("rating", FieldSpec::single("scores.rating").with_range(Range::between(json!(1), json!(10))))
//!         .with("tags", FieldSpec::list("tags")),
//! );
//!
//! let mut obj = DataObj::new(schema);
//! obj.set_field("id", json!(123))?;
//! obj.set_field("rating", json!(5))?;
//! obj.append_field("tags", json!("new"))?;
//!
//! assert_eq!(obj.get_field("id")?, json!("123"));
//! assert!(obj.set_field("rating", json!(11)).is_err());
//! assert_eq!(obj.data()["scores"], json!({"rating": 5}));
//! # Ok::<(), formshape::Error>(())
//! ```

use std::{borrow::Cow, sync::Arc};

use serde_json::{Map, Value};

use crate::{
    Result,
    coerce::Coerce,
    path::{PathStore, type_name},
    schema::{FieldKind, FieldSpec, Schema, Structure},
};

mod errors;

pub use errors::{DataObjError, ErrorKind};

/// The field-level interface shared by every data object.
///
/// Reads take `&mut self` because reading a list field binds a freshly created empty list
/// into the record, so later appends observe it.
pub trait DataObject {
    /// Reads a field, applying its default and coercion.
    fn get_field(&mut self, field: &str) -> Result<Value>;

    /// Validates and writes a field.
    fn set_field(&mut self, field: &str, value: Value) -> Result<()>;

    /// Appends one value to a list field.
    fn append_field(&mut self, field: &str, value: Value) -> Result<()>;
}

/// Returns true for the values treated as "no value": `null` and the empty string.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// A JSON record accessed through a field schema.
#[derive(Debug, Clone)]
pub struct DataObj {
    store: PathStore,
    schema: Arc<Schema>,
    allow_off_schema: bool,
}

impl DataObj {
    /// Creates an empty object governed by `schema`, rejecting fields it does not declare.
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            store: PathStore::new(),
            schema,
            allow_off_schema: false,
        }
    }

    /// Creates an empty object with no schema that accepts any field as a single value
    /// stored at the path given by its name.
    pub fn off_schema() -> Self {
        Self::new(Arc::new(Schema::new())).with_off_schema(true)
    }

    /// Wraps raw record data.
    pub fn from_raw(schema: Arc<Schema>, raw: Value) -> Result<Self> {
        Ok(Self {
            store: PathStore::from_value(raw)?,
            schema,
            allow_off_schema: false,
        })
    }

    /// Wraps raw record data after checking it against `structure`.
    pub fn from_raw_checked(schema: Arc<Schema>, raw: Value, structure: &Structure) -> Result<Self> {
        let store = PathStore::from_value(raw)?;
        structure.validate(store.as_map())?;
        Ok(Self {
            store,
            schema,
            allow_off_schema: false,
        })
    }

    /// Sets whether fields without a schema entry are accepted.
    pub fn with_off_schema(mut self, allow: bool) -> Self {
        self.allow_off_schema = allow;
        self
    }

    pub fn allows_off_schema(&self) -> bool {
        self.allow_off_schema
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// The raw record.
    pub fn data(&self) -> &Map<String, Value> {
        self.store.as_map()
    }

    pub fn store(&self) -> &PathStore {
        &self.store
    }

    pub fn into_value(self) -> Value {
        self.store.into_value()
    }

    /// Serializes the raw record as compact JSON text.
    pub fn to_json_string(&self) -> String {
        Value::Object(self.store.as_map().clone()).to_string()
    }

    /// Reads a field without binding anything into the record.
    ///
    /// An absent list field reads as an empty list.
    pub fn read_field(&self, field: &str) -> Result<Value> {
        let schema = Arc::clone(&self.schema);
        let spec = self.resolve(&schema, field)?;
        match spec.kind {
            FieldKind::Single => Ok(self.read_single(&spec)),
            FieldKind::List => match self.store.get_path(&spec.path) {
                None | Some(Value::Null) => Ok(Value::Array(Vec::new())),
                Some(Value::Array(items)) => Ok(Value::Array(
                    items
                        .iter()
                        .map(|item| coerce_for_read(spec.coerce.as_ref(), item))
                        .collect(),
                )),
                Some(other) => Err(DataObjError::NotAList {
                    field: field.to_string(),
                    path: spec.path.clone(),
                    found: type_name(other),
                }
                .into()),
            },
        }
    }

    /// Removes a field's value, optionally pruning parent mappings left empty.
    pub fn delete_field(&mut self, field: &str, prune: bool) -> Result<Option<Value>> {
        let schema = Arc::clone(&self.schema);
        let spec = self.resolve(&schema, field)?;
        Ok(self.store.delete_path(&spec.path, prune))
    }

    fn resolve<'s>(&self, schema: &'s Schema, field: &str) -> Result<Cow<'s, FieldSpec>> {
        match schema.get(field) {
            Some(spec) => Ok(Cow::Borrowed(spec)),
            None if self.allow_off_schema => Ok(Cow::Owned(FieldSpec::single(field))),
            None => Err(DataObjError::UnknownField {
                field: field.to_string(),
            }
            .into()),
        }
    }

    fn read_single(&self, spec: &FieldSpec) -> Value {
        let value = match (self.store.get_path(&spec.path), &spec.default_value) {
            (Some(value), _) => value,
            (None, Some(default)) => default,
            (None, None) => return Value::Null,
        };
        coerce_for_read(spec.coerce.as_ref(), value)
    }

    fn set_single(&mut self, field: &str, spec: &FieldSpec, value: Value) -> Result<()> {
        if is_empty_value(&value) && !spec.allow_none {
            return Err(DataObjError::NoneNotAllowed {
                field: field.to_string(),
                path: spec.path.clone(),
            }
            .into());
        }

        let value = coerce_for_write(field, spec, value)?;

        if !value.is_null() {
            if let Some(allowed) = &spec.allowed_values
                && !allowed.contains(&value)
            {
                return Err(DataObjError::ValueNotAllowed {
                    field: field.to_string(),
                    path: spec.path.clone(),
                    value: value.to_string(),
                }
                .into());
            }

            if let Some(range) = &spec.allowed_range
                && !range.contains(&value)
            {
                return Err(DataObjError::OutOfRange {
                    field: field.to_string(),
                    path: spec.path.clone(),
                    value: value.to_string(),
                    lower: bound_text(range.lower.as_ref()),
                    upper: bound_text(range.upper.as_ref()),
                }
                .into());
            }
        }

        self.store.set_path(&spec.path, value);
        Ok(())
    }

    fn set_list(&mut self, field: &str, spec: &FieldSpec, value: Value) -> Result<()> {
        let Value::Array(items) = value else {
            return Err(DataObjError::NotAList {
                field: field.to_string(),
                path: spec.path.clone(),
                found: type_name(&value),
            }
            .into());
        };

        // Coerce everything first so a bad element leaves the stored list untouched.
        let coerced = items
            .into_iter()
            .map(|item| coerce_for_write(field, spec, item))
            .collect::<Result<Vec<_>>>()?;

        self.store.set_path(&spec.path, Value::Array(Vec::new()));
        let list = self.list_mut(field, spec)?;
        list.extend(coerced);
        Ok(())
    }

    /// Returns the stored list for `spec`, binding an empty one when absent.
    fn list_mut(&mut self, field: &str, spec: &FieldSpec) -> Result<&mut Vec<Value>> {
        if matches!(self.store.get_path(&spec.path), None | Some(Value::Null)) {
            self.store.set_path(&spec.path, Value::Array(Vec::new()));
        }

        match self.store.get_path_mut(&spec.path) {
            Some(Value::Array(items)) => Ok(items),
            found => Err(DataObjError::NotAList {
                field: field.to_string(),
                path: spec.path.clone(),
                found: found.map_or("nothing", |v| type_name(v)),
            }
            .into()),
        }
    }
}

impl DataObject for DataObj {
    fn get_field(&mut self, field: &str) -> Result<Value> {
        let schema = Arc::clone(&self.schema);
        let spec = self.resolve(&schema, field)?;
        match spec.kind {
            FieldKind::Single => Ok(self.read_single(&spec)),
            FieldKind::List => {
                let list = self.list_mut(field, &spec)?;
                if let Some(coerce) = &spec.coerce {
                    for item in list.iter_mut() {
                        *item = coerce_for_read(Some(coerce), item);
                    }
                }
                Ok(Value::Array(list.clone()))
            }
        }
    }

    fn set_field(&mut self, field: &str, value: Value) -> Result<()> {
        let schema = Arc::clone(&self.schema);
        let spec = self.resolve(&schema, field)?;
        match spec.kind {
            FieldKind::Single => self.set_single(field, &spec, value),
            FieldKind::List => self.set_list(field, &spec, value),
        }
    }

    fn append_field(&mut self, field: &str, value: Value) -> Result<()> {
        let schema = Arc::clone(&self.schema);
        let spec = self.resolve(&schema, field)?;
        if !spec.is_list() {
            return Err(DataObjError::NotAListField {
                field: field.to_string(),
            }
            .into());
        }

        let value = coerce_for_write(field, &spec, value)?;
        self.list_mut(field, &spec)?.push(value);
        Ok(())
    }
}

impl serde::Serialize for DataObj {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.store, serializer)
    }
}

fn coerce_for_write(field: &str, spec: &FieldSpec, value: Value) -> Result<Value> {
    let Some(coerce) = &spec.coerce else {
        return Ok(value);
    };
    if value.is_null() {
        return Ok(value);
    }

    match coerce.apply(&value) {
        Ok(coerced) => Ok(coerced),
        Err(e) if spec.allow_coerce_failure => {
            tracing::debug!(field, error = %e, "keeping uncoerced value");
            Ok(value)
        }
        Err(source) => Err(DataObjError::CoerceFailed {
            field: field.to_string(),
            path: spec.path.clone(),
            source,
        }
        .into()),
    }
}

/// Reads tolerate coercion failures and hand back the stored value.
fn coerce_for_read(coerce: Option<&Coerce>, value: &Value) -> Value {
    match coerce {
        Some(coerce) if !value.is_null() => coerce.apply(value).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "returning uncoerced value");
            value.clone()
        }),
        _ => value.clone(),
    }
}

fn bound_text(bound: Option<&Value>) -> String {
    bound.map_or_else(|| "*".to_string(), Value::to_string)
}
