//! Shared utilities for the health readmission pipeline crates.
//!
//! This crate provides Polars helpers for the all-text frames that travel
//! between the store reader and the cleaning stage.

pub mod frame;

// Re-export commonly used functions at crate root for convenience
pub use frame::{column_strings, find_column, non_blank, string_frame, text_column};
