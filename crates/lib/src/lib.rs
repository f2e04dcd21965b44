//!
//! formshape: schema-constrained data objects and form serialization.
//! This library provides the core components for shaping JSON records on their way between
//! HTML forms and a CRUD backend.
//!
//! ## Core Concepts
//!
//! * **Paths (`path::PathStore`)**: A nested JSON mapping addressed by dot-delimited paths, with
//!   auto-vivification of intermediate mappings on write.
//! * **Schemas (`schema::Schema`)**: Per-field rules (single or list, coercion, default, allowed
//!   values, allowed range, null policy) applied whenever a field is read or written.
//! * **Data objects (`dataobj::DataObj`)**: A `PathStore` behind a field-name API, mediated by a
//!   schema. Concrete record types (e.g. `account::BasicAccount`) implement the
//!   `dataobj::DataObject` trait by delegating to a `DataObj`.
//! * **Forms (`form`)**: Translation between index-encoded form field names such as
//!   `people-0-name` and nested, list-shaped data objects, plus the repeatable section model
//!   that clones and renumbers numbered form sections.
//! * **Clients (`client`)**: Thin async clients for the CRUD, autocomplete and fragment
//!   collaborators, behind a pluggable `client::Transport`.
//! * **Rendering (`render`)**: Escaping result-row renderers for search result listings.

pub mod account;
pub mod client;
pub mod coerce;
pub mod config;
pub mod dataobj;
pub mod form;
pub mod path;
pub mod render;
pub mod schema;

pub use dataobj::{DataObj, DataObject};
pub use path::PathStore;
pub use schema::{FieldKind, FieldSpec, Range, Schema};

/// Result type used throughout the formshape library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the formshape library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured data object errors from the dataobj module
    #[error(transparent)]
    DataObj(dataobj::DataObjError),

    /// Structured form translation errors from the form module
    #[error(transparent)]
    Form(form::FormError),

    /// Structured collaborator errors from the client module
    #[error(transparent)]
    Client(client::ClientError),

    /// Structured configuration errors from the config module
    #[error(transparent)]
    Config(config::ConfigError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::DataObj(_) => "dataobj",
            Error::Form(_) => "form",
            Error::Client(_) => "client",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error is a schema validation failure (disallowed empty value,
    /// disallowed value, out of range, failed coercion, malformed record).
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::DataObj(err) => err.kind() == dataobj::ErrorKind::Validation,
            _ => false,
        }
    }

    /// Check if this error means a field has no schema entry.
    pub fn is_schema_error(&self) -> bool {
        match self {
            Error::DataObj(err) => err.kind() == dataobj::ErrorKind::Schema,
            _ => false,
        }
    }

    /// Check if this error is an operation applied to the wrong shape of field.
    pub fn is_invalid_operation(&self) -> bool {
        match self {
            Error::DataObj(err) => err.kind() == dataobj::ErrorKind::InvalidOperation,
            Error::Form(err) => err.is_shape_error(),
            _ => false,
        }
    }

    /// Check if this error is form-related.
    pub fn is_form_error(&self) -> bool {
        matches!(self, Error::Form(_))
    }

    /// Check if this error came from a collaborator request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Client(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Config(config_err) => config_err.is_io_error(),
            _ => false,
        }
    }
}
