//! Error types for store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading from or writing to the store.
///
/// All of these are fatal for a pipeline run: the run aborts and a later run
/// replaces whatever was partially written.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened or created.
    #[error("failed to open store at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The parent directory of the database file could not be created.
    #[error("failed to create store directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table or view the caller asked for does not exist.
    #[error("table not found in store: {name}")]
    TableNotFound { name: String },

    /// A table was declared without columns.
    #[error("table {name} has no columns")]
    EmptySchema { name: String },

    /// A row did not match the declared column count.
    #[error("row {row} of table {table} has {found} values, expected {expected}")]
    ShapeMismatch {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Any other SQLite failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
