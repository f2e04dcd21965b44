//! Value coercions applied by schema fields on read and write.
//!
//! A [`Coerce`] is either one of the named coercions or a caller-supplied closure. Named
//! coercions can be looked up with [`Coerce::from_name`], which is how schemas loaded from
//! configuration refer to them.

use std::{fmt, sync::Arc};

use serde_json::{Number, Value};
use thiserror::Error;

/// Error produced when a value cannot be converted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot coerce {value} with {coerce}: {reason}")]
pub struct CoerceError {
    /// Name of the coercion that failed
    pub coerce: String,
    /// JSON text of the rejected value
    pub value: String,
    pub reason: String,
}

impl CoerceError {
    fn new(coerce: &Coerce, value: &Value, reason: impl Into<String>) -> Self {
        Self {
            coerce: coerce.name().to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Signature of a custom coercion.
pub type CoerceFn = dyn Fn(&Value) -> Result<Value, String> + Send + Sync;

/// A conversion applied to field values.
#[derive(Clone)]
pub enum Coerce {
    /// Render the value as a string.
    Text,
    /// Parse or truncate to an integer.
    Integer,
    /// Parse to a floating point number; the empty string becomes `null`.
    Float,
    /// Conservative boolean conversion.
    Bool,
    /// Require an absolute http(s) URL, kept as a string.
    Url,
    /// A named caller-supplied conversion.
    Custom { name: String, func: Arc<CoerceFn> },
}

impl fmt::Debug for Coerce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coerce::Custom { name, .. } => f.debug_tuple("Custom").field(name).finish(),
            other => f.write_str(other.name()),
        }
    }
}

impl Coerce {
    /// Looks up a named coercion.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" | "unicode" | "string" => Some(Coerce::Text),
            "integer" | "int" => Some(Coerce::Integer),
            "float" => Some(Coerce::Float),
            "bool" => Some(Coerce::Bool),
            "url" => Some(Coerce::Url),
            _ => None,
        }
    }

    /// Wraps a closure as a coercion.
    pub fn custom<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Coerce::Custom {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// The coercion's name.
    pub fn name(&self) -> &str {
        match self {
            Coerce::Text => "text",
            Coerce::Integer => "integer",
            Coerce::Float => "float",
            Coerce::Bool => "bool",
            Coerce::Url => "url",
            Coerce::Custom { name, .. } => name,
        }
    }

    /// Converts `value`.
    pub fn apply(&self, value: &Value) -> Result<Value, CoerceError> {
        match self {
            Coerce::Text => Ok(Value::String(to_text(value))),
            Coerce::Integer => to_int(value)
                .map(|i| Value::Number(i.into()))
                .ok_or_else(|| CoerceError::new(self, value, "not an integer")),
            Coerce::Float => match value {
                Value::String(s) if s.is_empty() => Ok(Value::Null),
                _ => to_float(value)
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| CoerceError::new(self, value, "not a finite number")),
            },
            Coerce::Bool => to_bool(value)
                .map(Value::Bool)
                .ok_or_else(|| CoerceError::new(self, value, "expected true or false")),
            Coerce::Url => {
                let text = value
                    .as_str()
                    .ok_or_else(|| CoerceError::new(self, value, "expected a string"))?;
                let parsed =
                    url::Url::parse(text).map_err(|e| CoerceError::new(self, value, e.to_string()))?;
                if parsed.scheme().starts_with("http") {
                    Ok(Value::String(text.to_string()))
                } else {
                    Err(CoerceError::new(
                        self,
                        value,
                        format!("unsupported scheme {}", parsed.scheme()),
                    ))
                }
            }
            Coerce::Custom { func, .. } => {
                func(value).map_err(|reason| CoerceError::new(self, value, reason))
            }
        }
    }
}

/// String rendering used by [`Coerce::Text`] and by form assignments.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => {
            let ascii: String = s.chars().filter(char::is_ascii).collect();
            let trimmed = ascii.trim();
            trimmed
                .parse()
                .ok()
                .or_else(|| trimmed.replace(',', "").parse().ok())
        }
        _ => None,
    }
}

fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            if let Ok(f) = s.trim().parse() {
                return Some(f);
            }
            let clean: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, ',' | ' ' | '.' | '\'' | '-'))
                .collect();
            let clean = clean.trim();
            clean
                .parse()
                .ok()
                .or_else(|| clean.replace([',', ' ', '\''], "").parse().ok())
        }
        _ => None,
    }
}

/// Conservative boolean conversion: booleans, numbers and a fixed set of words only.
pub fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "t" | "1" | "on" => Some(true),
            "false" | "no" | "f" | "0" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
