//! Error types for the transform stages.

use hx_model::Entity;
use thiserror::Error;

/// Errors that abort a transform run.
///
/// Bad cell values never surface here; they become nulls or dropped rows and
/// are counted in the cleaning statistics instead.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A raw table lacks a column the cleaning stage cannot do without.
    #[error("raw {entity} table is missing required column '{column}'")]
    MissingColumn { entity: Entity, column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
