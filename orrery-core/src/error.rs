//! Error types for reading route data.

use thiserror::Error;

/// Failure while reading from a data source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// The data parsed but violates a uniqueness rule.
    #[error("Invalid dataset: {0}")]
    Invalid(String),

    /// A storage backend failed. The message comes from the backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, SourceError>;
