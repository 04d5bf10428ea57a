//! Raw data ingestion for the health readmission pipeline.
//!
//! # Features
//!
//! - **CSV Loading**: read raw extracts as all-text frames (no type inference)
//! - **Store Loading**: replace the raw `patients`, `encounters`, `conditions`
//!   tables and ensure their `patient_id` indexes
//! - **Raw Table Reading**: pull raw tables back out as frames with
//!   lower-cased column names
//!
//! # Example
//!
//! ```ignore
//! use hx_ingest::{load_raw_tables, read_raw_tables};
//!
//! let report = load_raw_tables(&mut store, Path::new("data_raw"), &config.source_table_names)?;
//! let raw = read_raw_tables(&store, &config.source_table_names)?;
//! ```

mod csv;
mod error;
mod loader;
mod reader;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{read_text_csv, validate_csv_file};

// === Store Loading ===
pub use loader::{LoadReport, LoadedTable, load_raw_tables, raw_csv_path, raw_index_name};

// === Raw Table Reading ===
pub use reader::{read_raw_table, read_raw_tables};
pub use table::{frame_to_text_table, text_table_to_frame};
