//! Error types for CDI extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching or writing CDI rows.
///
/// Requests are never retried; any of these ends the extract.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The request could not be sent or its body could not be decoded.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("CDI API returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body was not a JSON array of objects.
    #[error("unexpected CDI response: {0}")]
    UnexpectedResponse(String),

    /// Failed to create the output directory or file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode CSV output.
    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for extraction.
pub type Result<T> = std::result::Result<T, ExtractError>;
