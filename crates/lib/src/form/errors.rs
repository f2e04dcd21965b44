//! Error types for form translation and repeatable sections.

use thiserror::Error;

/// Structured error types for the form module.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FormError {
    /// A list-group key did not parse as an integer index
    #[error("list group {group} has non-numeric index {key:?}")]
    InvalidIndex { group: String, key: String },

    /// A list group's captured value was not a mapping of indices
    #[error("list group {group} holds {found} instead of indexed entries")]
    GroupShape { group: String, found: &'static str },

    /// A section id did not end in `_{number}`
    #[error("section id {id:?} does not end in a numeric suffix")]
    InvalidSectionId { id: String },

    /// A control name has no index segment to renumber
    #[error("control name {name:?} has no index segment")]
    InvalidControlName { name: String },

    /// The group has no section to clone
    #[error("repeatable group {prefix} has no section to use as a template")]
    NoTemplate { prefix: String },

    /// The sole remaining section cannot be removed
    #[error("section {id} is the last one in its group")]
    LastSection { id: String },

    /// Removal was not enabled for the group
    #[error("sections of repeatable group {prefix} cannot be removed")]
    RemoveDisabled { prefix: String },

    /// No section with this id exists in the group
    #[error("section {id} not found")]
    SectionNotFound { id: String },
}

impl FormError {
    /// Check if this error is a mismatch between field names and data shape
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            FormError::InvalidIndex { .. } | FormError::GroupShape { .. }
        )
    }

    /// Check if this error concerns repeatable sections
    pub fn is_section_error(&self) -> bool {
        matches!(
            self,
            FormError::InvalidSectionId { .. }
                | FormError::InvalidControlName { .. }
                | FormError::NoTemplate { .. }
                | FormError::LastSection { .. }
                | FormError::RemoveDisabled { .. }
                | FormError::SectionNotFound { .. }
        )
    }
}

// Conversion from FormError to the main Error type
impl From<FormError> for crate::Error {
    fn from(err: FormError) -> Self {
        crate::Error::Form(err)
    }
}
