use std::fmt;

pub mod error;

pub use error::Error;

pub mod csv;
pub mod fetch;
pub mod json;
pub mod npz;
pub mod xyz;

/// Output format for exported results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
    Xyz,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Csv => write!(f, "CSV"),
            Format::Json => write!(f, "JSON"),
            Format::Xyz => write!(f, "XYZ"),
        }
    }
}
