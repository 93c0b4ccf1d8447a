//! Error types for record classes and records.
//!
//! Two families of errors exist: [`DeclarationError`] is raised while a
//! record class or field constraint is being declared, before any instance
//! exists, and [`RecordError`] is raised while records are constructed or
//! mutated.

use crate::Value;
use thiserror::Error;

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors raised while constructing or mutating a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// Both a mapping and named entries were supplied
    #[error("Must specify input mapping or entries, both are not allowed")]
    ConflictingInput,

    /// A schema field has no value and does not accept null
    #[error("On {record}: Missing attribute `{field}`.")]
    MissingAttribute {
        /// Name of the record class
        record: String,
        /// Missing field
        field: String,
    },

    /// A value does not satisfy its field constraint
    #[error("On {record}: Invalid attribute `{field}`, got {value} which is a {actual} (expected {expected}).")]
    InvalidAttribute {
        /// Name of the record class
        record: String,
        /// Offending field
        field: String,
        /// Offending value
        value: Value,
        /// Runtime type name of the offending value
        actual: String,
        /// Accepted kinds, joined for display
        expected: String,
    },

    /// A field outside the schema was supplied to a strict construction
    #[error("On {record}: Unknown attribute `{field}`.")]
    UnknownAttribute {
        /// Name of the record class
        record: String,
        /// Undeclared field
        field: String,
    },
}

impl RecordError {
    /// Creates a new missing attribute error.
    pub fn missing(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingAttribute {
            record: record.into(),
            field: field.into(),
        }
    }

    /// Creates a new invalid attribute error for `value`.
    pub fn invalid(
        record: impl Into<String>,
        field: impl Into<String>,
        value: &Value,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            record: record.into(),
            field: field.into(),
            actual: value.type_name().into_owned(),
            value: value.clone(),
            expected: expected.into(),
        }
    }

    /// Creates a new unknown attribute error.
    pub fn unknown(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            record: record.into(),
            field: field.into(),
        }
    }

    /// Returns the field this error is about, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ConflictingInput => None,
            Self::MissingAttribute { field, .. }
            | Self::InvalidAttribute { field, .. }
            | Self::UnknownAttribute { field, .. } => Some(field),
        }
    }
}

/// Errors raised while declaring field constraints and record classes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    /// A field constraint was declared without predicates
    #[error("Field constraint requires at least one accepted kind")]
    EmptyConstraint,

    /// `Kind::Null` passed as an accepted kind instead of the nullable flag
    #[error("Null is not an accepted kind, declare the field nullable instead")]
    NullKind,

    /// Record class or field declared with an empty name
    #[error("Names of record classes and fields must not be empty")]
    EmptyName,

    /// The same field declared twice by one class
    #[error("On {record}: Field `{field}` declared more than once")]
    DuplicateField {
        /// Name of the record class
        record: String,
        /// Duplicated field
        field: String,
    },

    /// A combinator pattern failed to compile
    #[error("Invalid regex pattern '{pattern}': {error}")]
    InvalidPattern {
        /// Pattern source
        pattern: String,
        /// Compilation error
        error: String,
    },

    /// A range combinator with inverted or NaN bounds
    #[error("Invalid range bounds [{min}, {max}]")]
    InvalidRange {
        /// Lower bound as written
        min: String,
        /// Upper bound as written
        max: String,
    },
}
