//! Transform core of the health readmission pipeline.
//!
//! Turns raw all-text frames into clean, typed records:
//! - **Cleaning**: coercion, trimming, key checks, and deduplication
//! - **Referential integrity**: encounters and conditions of unknown patients are dropped
//! - **Readmission detection**: the 30-day inpatient readmission flag
//!
//! # Example
//!
//! ```ignore
//! use hx_transform::clean_and_flag;
//!
//! let raw = hx_ingest::read_raw_tables(&store, &config.source_table_names)?;
//! let clean = clean_and_flag(&raw, &config.readmission)?;
//! println!("{} readmissions", clean.readmit_count());
//! ```
//!
//! # Design Principles
//!
//! - **Total cell functions**: bad values become nulls or dropped rows, never errors
//! - **Explicit configuration**: the readmission rule is passed in, not global

mod clean;
mod error;
mod integrity;
mod pipeline;
mod readmission;

pub mod normalization;

// Error type
pub use error::{Result, TransformError};

// Stages
pub use clean::{Cleaned, clean_conditions, clean_encounters, clean_patients};
pub use integrity::{known_patients, retain_known};
pub use readmission::{
    ReadmissionSummary, flag_readmissions, readmission_flags, readmission_flags_pairwise,
};

// Entry point
pub use pipeline::{clean_and_flag, sort_encounters};
