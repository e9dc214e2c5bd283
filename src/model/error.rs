//! Error types for the dataset model.
//!
//! Covers structural problems in a decoded dataset (missing or misshapen
//! fields), element lookup failures, and tabular-result construction errors.

use thiserror::Error;

use super::dataset::Field;
use super::element::UnknownElementError;

/// Errors raised by dataset accessors and table construction.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A required archive field is absent from the dataset.
    #[error("dataset field '{0}' is missing")]
    MissingField(Field),

    /// A field is present but its shape does not fit the data model.
    #[error("dataset field '{field}' has an unexpected shape: {details}")]
    FieldShape {
        /// The offending field.
        field: Field,
        /// Description of the mismatch.
        details: String,
    },

    /// An atomic number outside the supported element lookup.
    #[error(transparent)]
    UnknownElement(#[from] UnknownElementError),

    /// A column pushed onto a table does not match the table's row count.
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A table's row count is not a whole number of conformation-id cycles.
    #[error("table with {rows} rows cannot carry {ids} conformation ids")]
    ConformationMismatch { rows: usize, ids: usize },

    /// A geometry index past the end of the conformation axis.
    #[error("geometry index {index} is out of range for {count} conformations")]
    GeometryIndex { index: usize, count: usize },
}

impl ModelError {
    /// Creates a [`FieldShape`](ModelError::FieldShape) error.
    pub fn field_shape(field: Field, details: impl Into<String>) -> Self {
        Self::FieldShape { field, details: details.into() }
    }
}
