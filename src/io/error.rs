use thiserror::Error;

use crate::model::error::ModelError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to transfer {url}: {details}")]
    Transfer { url: String, details: String },

    #[error("no dataset archive for '{molecule}' at {location}")]
    DatasetNotFound { molecule: String, location: String },

    #[error("failed to open archive: {source}")]
    Archive {
        #[from]
        source: zip::result::ZipError,
    },

    #[error("failed to decode archive member '{entry}': {details}")]
    Decode { entry: String, details: String },

    #[error("archive does not assemble into a valid dataset: {source}")]
    Malformed {
        #[from]
        source: ModelError,
    },

    #[error("failed to write CSV: {0}")]
    Csv(String),

    #[error("failed to write JSON: {0}")]
    Json(String),
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}

impl Error {
    pub fn transfer(url: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Transfer {
            url: url.into(),
            details: details.into(),
        }
    }

    pub fn not_found(molecule: impl Into<String>, location: impl Into<String>) -> Self {
        Self::DatasetNotFound {
            molecule: molecule.into(),
            location: location.into(),
        }
    }

    pub fn decode(entry: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Decode {
            entry: entry.into(),
            details: details.into(),
        }
    }
}
