//! Chronic disease indicator (CDI) extraction.
//!
//! Pulls one state's slice of the CDC CDI dataset from its Socrata endpoint
//! and writes it as a flat CSV file. Each query is a single request: there is
//! no paging and no retry.
//!
//! # Example
//!
//! ```ignore
//! use hx_extract::{CdiClient, ExtractOptions, extract_cdi};
//!
//! let client = CdiClient::from_env()?;
//! let report = extract_cdi(&client, &ExtractOptions::default())?;
//! println!("wrote {} rows to {}", report.rows, report.path.display());
//! ```

mod client;
mod error;
mod extract;
mod query;
mod select;
mod source;
mod writer;

pub use client::{APP_TOKEN_ENV, CDI_RESOURCE_URL, CdiClient, records_from_json};
pub use error::{ExtractError, Result};
pub use extract::{
    ExtractOptions, ExtractOutcome, ExtractReport, FALLBACK_YEARS, UNFILTERED_LIMIT, extract_cdi,
};
pub use query::{
    DEFAULT_LIMIT, FINAL_COLUMNS, FINAL_ORDER, SocrataQuery, since_and_type_filter, since_filter,
};
pub use select::{choose_data_value_type, data_value_type_counts};
pub use source::{CdiRecord, CdiSource};
pub use writer::{record_columns, write_records_csv};
