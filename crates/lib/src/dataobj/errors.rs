//! Error types for data object operations.
//!
//! Every failure of the field API is reported synchronously at the offending call and is
//! classified by [`ErrorKind`]: schema violations, missing schema entries, and operations
//! applied to the wrong shape of field.

use thiserror::Error;

/// Broad classification of a [`DataObjError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value broke one of the field's rules
    Validation,
    /// The field has no schema entry and off-schema access is disabled
    Schema,
    /// The operation does not fit the field's shape
    InvalidOperation,
}

/// Structured error types for data object operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DataObjError {
    /// An empty value was written to a field that does not allow one
    #[error("empty value is not allowed at {path}")]
    NoneNotAllowed { field: String, path: String },

    /// The value is not in the field's allowed set
    #[error("value {value} is not permitted at {path}")]
    ValueNotAllowed {
        field: String,
        path: String,
        value: String,
    },

    /// The value lies outside the field's allowed range
    #[error("value {value} at {path} is outside the allowed range: {lower} - {upper}")]
    OutOfRange {
        field: String,
        path: String,
        value: String,
        lower: String,
        upper: String,
    },

    /// The field's coercion rejected the value
    #[error("coercion failed at {path}: {source}")]
    CoerceFailed {
        field: String,
        path: String,
        #[source]
        source: crate::coerce::CoerceError,
    },

    /// A raw record does not match its declared structure
    #[error("record structure invalid: {reason}")]
    Structure { reason: String },

    /// No schema entry exists for the field
    #[error("no schema entry for field {field}")]
    UnknownField { field: String },

    /// A list operation was applied to a single-valued field
    #[error("field {field} is not a list field")]
    NotAListField { field: String },

    /// A list was expected but something else was found or supplied
    #[error("expecting a list at {path} but found {found}")]
    NotAList {
        field: String,
        path: String,
        found: &'static str,
    },
}

impl DataObjError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataObjError::NoneNotAllowed { .. }
            | DataObjError::ValueNotAllowed { .. }
            | DataObjError::OutOfRange { .. }
            | DataObjError::CoerceFailed { .. }
            | DataObjError::Structure { .. } => ErrorKind::Validation,
            DataObjError::UnknownField { .. } => ErrorKind::Schema,
            DataObjError::NotAListField { .. } | DataObjError::NotAList { .. } => {
                ErrorKind::InvalidOperation
            }
        }
    }

    /// Check if this error is a validation failure
    pub fn is_validation_error(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Check if this error is a missing schema entry
    pub fn is_schema_error(&self) -> bool {
        self.kind() == ErrorKind::Schema
    }

    /// Check if this error is an invalid operation
    pub fn is_invalid_operation(&self) -> bool {
        self.kind() == ErrorKind::InvalidOperation
    }

    /// Get the field name, if the error concerns a single field
    pub fn field(&self) -> Option<&str> {
        match self {
            DataObjError::NoneNotAllowed { field, .. }
            | DataObjError::ValueNotAllowed { field, .. }
            | DataObjError::OutOfRange { field, .. }
            | DataObjError::CoerceFailed { field, .. }
            | DataObjError::UnknownField { field }
            | DataObjError::NotAListField { field }
            | DataObjError::NotAList { field, .. } => Some(field),
            DataObjError::Structure { .. } => None,
        }
    }

    /// Get the record path, if known
    pub fn path(&self) -> Option<&str> {
        match self {
            DataObjError::NoneNotAllowed { path, .. }
            | DataObjError::ValueNotAllowed { path, .. }
            | DataObjError::OutOfRange { path, .. }
            | DataObjError::CoerceFailed { path, .. }
            | DataObjError::NotAList { path, .. } => Some(path),
            _ => None,
        }
    }
}

// Conversion from DataObjError to the main Error type
impl From<DataObjError> for crate::Error {
    fn from(err: DataObjError) -> Self {
        crate::Error::DataObj(err)
    }
}
