//! Relational store for the health readmission pipeline.
//!
//! A thin layer over a SQLite database addressed by table and view name. It
//! supports the operations the pipeline needs and nothing else:
//!
//! - **Text tables**: raw CSV extracts stored with every column as `TEXT`
//! - **Typed tables**: create-or-replace with declared column types
//! - **Indexes and views**: idempotent creation and redefinition
//! - **Transactions**: every write goes through [`Store::write`], which commits
//!   on success and rolls back on error
//!
//! # Example
//!
//! ```ignore
//! use hx_store::{Store, TextTable};
//!
//! let mut store = Store::open(Path::new("data/health.db"))?;
//! store.write(|writer| writer.replace_text_table("patients", &table))?;
//! let raw = store.read_text_table("patients")?;
//! ```

mod error;
mod schema;
mod store;
mod table;
mod writer;

pub use error::{Result, StoreError};
pub use schema::{ColumnDef, SqlType, quote_ident};
pub use store::Store;
pub use table::TextTable;
pub use writer::StoreWriter;

// Row-level types used by callers that map query results.
pub use rusqlite::Row;
pub use rusqlite::types::Value;
