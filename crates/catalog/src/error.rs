//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
/// Every `path` is a JSON-path into the document, such as `$.serie[3].teile[0]`.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The text is not a JSON document.
    #[display("malformed catalog document")]
    MalformedDocument,
    /// A required field is absent (or `null`).
    #[display("missing required field '{field}' of {entity} at {path}")]
    MissingField {
        /// Kind of entity being decoded.
        entity: &'static str,
        /// Unprefixed field name.
        field: &'static str,
        path: String,
    },
    /// A value could not be converted into its expected type.
    #[display("field '{field}' at {path} is not {expected}")]
    TypeMismatch {
        /// Unprefixed field name.
        field: String,
        /// Human readable description of the expected value.
        expected: &'static str,
        path: String,
    },
    /// Two keys of one object name the same field, such as `04_nummer` and
    /// `nummer`.
    #[display("field '{field}' given twice at {path}")]
    DuplicateField {
        /// Unprefixed field name.
        field: String,
        path: String,
    },
    /// A textual option does not name any known value.
    #[display("invalid value: {_0}")]
    InvalidValue(#[error(not(source))] String),
    /// The mandatory series collection is empty.
    #[display("catalog contains no series episodes")]
    EmptySeries,
    /// An episode or part number occurs twice within the same sequence.
    #[display("duplicate {field} {number} in {path}")]
    DuplicateNumber {
        field: &'static str,
        number: u32,
        path: String,
    },
    /// The JSON value tree could not be written out as text.
    #[display("failed to serialize catalog")]
    Serialize,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Decoding is deterministic: the same input always fails the same way.
        false
    }
}
