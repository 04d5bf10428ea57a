//! Conversion between Polars frames and store text tables.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;

use hx_common::{column_strings, string_frame};
use hx_store::TextTable;

use crate::error::{IngestError, Result};

/// Converts a frame into a text table, rendering every cell as text.
pub fn frame_to_text_table(df: &DataFrame) -> Result<TextTable> {
    let columns: Vec<String> = df
        .get_columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();

    let values = df
        .get_columns()
        .iter()
        .map(column_strings)
        .collect::<polars::prelude::PolarsResult<Vec<_>>>()?;

    let mut table = TextTable::new(columns);
    table.rows = (0..df.height())
        .map(|row| values.iter().map(|column| column[row].clone()).collect())
        .collect();
    Ok(table)
}

/// Converts a text table into a frame with lower-cased column names.
///
/// Fails when a name is blank or when two names collide after lower-casing,
/// since downstream lookups are case-insensitive.
pub fn text_table_to_frame(name: &str, table: &TextTable) -> Result<DataFrame> {
    let mut seen = BTreeSet::new();
    let mut columns = Vec::with_capacity(table.width());
    for (idx, column) in table.columns.iter().enumerate() {
        let lowered = column.trim().to_ascii_lowercase();
        if lowered.is_empty() {
            return Err(IngestError::EmptyColumnName {
                table: name.to_string(),
            });
        }
        if !seen.insert(lowered.clone()) {
            return Err(IngestError::DuplicateColumn {
                table: name.to_string(),
                column: lowered,
            });
        }
        columns.push((lowered, table.column_values(idx)));
    }
    Ok(string_frame(columns)?)
}
