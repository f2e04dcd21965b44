//! Field schemas for data objects.
//!
//! A [`Schema`] maps field names to [`FieldSpec`]s. Each spec says where the field lives in
//! the record (its dotted path), whether it holds a single value or a list, and which rules
//! apply when it is written: coercion, null policy, allowed values and allowed range.
//!
//! ```
//! use formshape::{FieldSpec, Range, Schema};
//! use formshape::coerce::Coerce;
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .with("email", FieldSpec::single("email").with_coerce(Coerce::Text).with_allow_none(false))
//!     .with("rating", FieldSpec::single("scores.rating").with_range(Range::between(json!(1), json!(10))))
//!     .with("role", FieldSpec::list("role").with_coerce(Coerce::Text));
//!
//! assert!(schema.get("role").unwrap().is_list());
//! ```

use std::{cmp::Ordering, collections::HashMap};

use serde_json::Value;

use crate::coerce::Coerce;

pub mod structure;

pub use structure::Structure;

/// Whether a field holds one value or a sequence of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Single,
    List,
}

/// An inclusive range with optional bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Range {
    pub lower: Option<Value>,
    pub upper: Option<Value>,
}

impl Range {
    pub fn between(lower: Value, upper: Value) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    pub fn at_least(lower: Value) -> Self {
        Self {
            lower: Some(lower),
            upper: None,
        }
    }

    pub fn at_most(upper: Value) -> Self {
        Self {
            lower: None,
            upper: Some(upper),
        }
    }

    /// Returns true if `value` lies within both configured bounds.
    ///
    /// Values that cannot be ordered against a bound (e.g. a string against a number) are
    /// outside the range.
    pub fn contains(&self, value: &Value) -> bool {
        let above_lower = match &self.lower {
            Some(lower) => matches!(
                compare(value, lower),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            None => true,
        };
        let below_upper = match &self.upper {
            Some(upper) => matches!(
                compare(value, upper),
                Some(Ordering::Less | Ordering::Equal)
            ),
            None => true,
        };
        above_lower && below_upper
    }
}

/// Orders two JSON values: numbers numerically, strings lexically.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Rules for a single field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Dotted path of the field inside the record
    pub path: String,
    pub kind: FieldKind,
    pub coerce: Option<Coerce>,
    /// Value returned for an absent single field
    pub default_value: Option<Value>,
    /// Whether an empty value (null or "") may be written
    pub allow_none: bool,
    pub allowed_values: Option<Vec<Value>>,
    pub allowed_range: Option<Range>,
    /// Keep the raw value when coercion fails on write instead of failing
    pub allow_coerce_failure: bool,
}

impl FieldSpec {
    fn new(path: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            path: path.into(),
            kind,
            coerce: None,
            default_value: None,
            allow_none: true,
            allowed_values: None,
            allowed_range: None,
            allow_coerce_failure: false,
        }
    }

    /// A single-valued field stored at `path`.
    pub fn single(path: impl Into<String>) -> Self {
        Self::new(path, FieldKind::Single)
    }

    /// A list-valued field stored at `path`.
    pub fn list(path: impl Into<String>) -> Self {
        Self::new(path, FieldKind::List)
    }

    pub fn with_coerce(mut self, coerce: Coerce) -> Self {
        self.coerce = Some(coerce);
        self
    }

    pub fn with_default(mut self, default_value: impl Into<Value>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn with_allow_none(mut self, allow_none: bool) -> Self {
        self.allow_none = allow_none;
        self
    }

    pub fn with_allowed_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.allowed_range = Some(range);
        self
    }

    pub fn with_allow_coerce_failure(mut self, allow: bool) -> Self {
        self.allow_coerce_failure = allow;
        self
    }

    pub fn is_list(&self) -> bool {
        self.kind == FieldKind::List
    }
}

/// Field name to [`FieldSpec`] mapping.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: HashMap<String, FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, spec: FieldSpec) -> Self {
        self.insert(field, spec);
        self
    }

    /// Adds or replaces a field, returning the previous spec.
    pub fn insert(&mut self, field: impl Into<String>, spec: FieldSpec) -> Option<FieldSpec> {
        self.fields.insert(field.into(), spec)
    }

    pub fn get(&self, field: &str) -> Option<&FieldSpec> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(field, spec)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldSpec)> {
        self.fields.iter()
    }
}

impl FromIterator<(String, FieldSpec)> for Schema {
    fn from_iter<T: IntoIterator<Item = (String, FieldSpec)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
