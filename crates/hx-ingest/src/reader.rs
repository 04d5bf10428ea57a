//! Raw table reader: store tables to all-text frames.

use hx_model::{Entity, RawTables, SourceTableNames};
use hx_store::Store;
use polars::prelude::DataFrame;
use tracing::info;

use crate::error::Result;
use crate::table::text_table_to_frame;

/// Reads one raw table as an all-text frame with lower-cased column names.
pub fn read_raw_table(store: &Store, name: &str) -> Result<DataFrame> {
    let table = store.read_text_table(name)?;
    text_table_to_frame(name, &table)
}

/// Reads the three raw tables named in `names`.
///
/// Fails when any of them is missing from the store.
pub fn read_raw_tables(store: &Store, names: &SourceTableNames) -> Result<RawTables> {
    let raw = RawTables {
        patients: read_raw_table(store, names.get(Entity::Patients))?,
        encounters: read_raw_table(store, names.get(Entity::Encounters))?,
        conditions: read_raw_table(store, names.get(Entity::Conditions))?,
    };
    for (entity, rows) in raw.row_counts() {
        info!(entity = %entity, table = names.get(entity), rows, "raw table read");
    }
    Ok(raw)
}
