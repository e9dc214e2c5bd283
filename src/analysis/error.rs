//! Error types for property extraction, internal coordinates, and statistics.

use thiserror::Error;

use crate::model::error::ModelError;

/// Errors raised while deriving tables from a dataset.
#[derive(Debug, Error)]
pub enum Error {
    /// An internal-coordinate selection with an unsupported number of atoms.
    #[error(
        "invalid atom selection: the number of indices must be 2 (distance), 3 (angle) or 4 (dihedral), got {arity}"
    )]
    InvalidCoordinateSpec {
        /// Number of indices in the rejected selection.
        arity: usize,
    },

    /// An atom index beyond the dataset's atom list.
    #[error("atom index {index} is out of range for {count} atoms")]
    AtomIndex { index: usize, count: usize },

    /// A coordinate spec string that does not parse into atom indices.
    #[error("invalid coordinate spec '{spec}': {details}")]
    SpecParse {
        /// The offending input text.
        spec: String,
        /// Description of the problem.
        details: String,
    },

    /// A vibrational-mode selection beyond the sentinel bound.
    ///
    /// Selections run from 0 through the mode count inclusive; selecting the
    /// mode count itself filters every row away and is still valid.
    #[error("mode index {mode} is out of range for {count} modes (valid selections are 0..={count})")]
    ModeOutOfRange { mode: usize, count: usize },

    /// A statistics request naming a column the table does not have.
    #[error("table has no column named '{0}'")]
    MissingColumn(String),

    /// A statistics request naming a column that is not numeric.
    #[error("column '{0}' does not hold float values")]
    ColumnKind(String),

    /// Structural dataset problems surfaced during extraction.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl Error {
    /// Creates a [`SpecParse`](Error::SpecParse) error.
    pub fn spec_parse(spec: impl Into<String>, details: impl Into<String>) -> Self {
        Self::SpecParse { spec: spec.into(), details: details.into() }
    }
}
