//! Error types for materialization and view reading.

use hx_store::StoreError;
use thiserror::Error;

/// Errors that can occur while writing clean outputs or reading views.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The store rejected a write or read. The run aborts; nothing partial is
    /// committed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A view row could not be decoded.
    #[error("view {view} returned an invalid {column} value '{value}'")]
    InvalidViewValue {
        view: String,
        column: &'static str,
        value: String,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
