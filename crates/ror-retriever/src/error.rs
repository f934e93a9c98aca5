//! Error types for the ROR retriever library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for retriever operations.
#[derive(Debug, Error)]
pub enum RorError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request could not be completed (connection, timeout, redirects, bad URL).
    #[error("Request to '{url}' failed: {message}")]
    Transport { url: String, message: String },

    /// Server answered with something other than 200 OK.
    #[error("Request to '{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Response body is missing required fields or is malformed.
    #[error("Malformed API response: {0}")]
    Parse(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RorError {
    /// Whether this error only affects a single affiliation lookup.
    ///
    /// Per-record failures are logged and the run moves on; everything else
    /// aborts the run.
    pub fn is_per_record(&self) -> bool {
        matches!(
            self,
            RorError::Transport { .. } | RorError::Status { .. } | RorError::Parse(_)
        )
    }
}

/// Result type alias for retriever operations.
pub type Result<T> = std::result::Result<T, RorError>;
