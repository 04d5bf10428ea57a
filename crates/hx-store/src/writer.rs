//! Write operations, available only inside a store transaction.

use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::schema::{ColumnDef, SqlType, column_list, quote_ident};
use crate::table::TextTable;

/// Handle for writing to the store within a single transaction.
///
/// Obtained from [`Store::write`](crate::Store::write); every operation here
/// becomes visible only when the surrounding closure returns `Ok`.
pub struct StoreWriter<'conn> {
    pub(crate) conn: &'conn Connection,
}

impl StoreWriter<'_> {
    /// Drops `name` if it exists and recreates it with the given columns and rows.
    ///
    /// Returns the number of rows inserted.
    pub fn replace_table<I>(&self, name: &str, columns: &[ColumnDef], rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = Vec<Value>>,
    {
        let schema = columns.iter().map(|col| (col.name, col.sql_type));
        let names: Vec<&str> = columns.iter().map(|col| col.name).collect();
        self.recreate(name, column_list(schema))?;
        self.insert_rows(name, &names, rows)
    }

    /// Drops `name` if it exists and recreates it with every column as `TEXT`.
    pub fn replace_text_table(&self, name: &str, table: &TextTable) -> Result<usize> {
        let schema = table
            .columns
            .iter()
            .map(|col| (col.as_str(), SqlType::Text));
        let names: Vec<&str> = table.columns.iter().map(String::as_str).collect();
        self.recreate(name, column_list(schema))?;
        let rows = table.rows.iter().map(|row| {
            row.iter()
                .map(|cell| cell.clone().map_or(Value::Null, Value::Text))
                .collect::<Vec<_>>()
        });
        self.insert_rows(name, &names, rows)
    }

    /// Creates an index unless one with the same name already exists.
    pub fn create_index(&self, index: &str, table: &str, columns: &[&str]) -> Result<()> {
        let cols = columns
            .iter()
            .map(|&col| quote_ident(col))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "CREATE INDEX IF NOT EXISTS {} ON {}({cols})",
            quote_ident(index),
            quote_ident(table)
        );
        self.conn.execute_batch(&sql)?;
        debug!(index, table, "index ensured");
        Ok(())
    }

    /// Drops the view if it exists, then creates it from `select_sql`.
    pub fn replace_view(&self, name: &str, select_sql: &str) -> Result<()> {
        let view = quote_ident(name);
        self.conn
            .execute_batch(&format!("DROP VIEW IF EXISTS {view}"))?;
        self.conn
            .execute_batch(&format!("CREATE VIEW {view} AS {select_sql}"))?;
        debug!(view = name, "view replaced");
        Ok(())
    }

    fn recreate(&self, name: &str, column_sql: String) -> Result<()> {
        if column_sql.is_empty() {
            return Err(StoreError::EmptySchema {
                name: name.to_string(),
            });
        }
        let table = quote_ident(name);
        self.conn
            .execute_batch(&format!("DROP TABLE IF EXISTS {table}"))?;
        self.conn
            .execute_batch(&format!("CREATE TABLE {table} ({column_sql})"))?;
        Ok(())
    }

    fn insert_rows<I>(&self, name: &str, columns: &[&str], rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = Vec<Value>>,
    {
        let column_sql = columns
            .iter()
            .map(|&col| quote_ident(col))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=columns.len())
            .map(|idx| format!("?{idx}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({column_sql}) VALUES ({placeholders})",
            quote_ident(name)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut inserted = 0usize;
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(StoreError::ShapeMismatch {
                    table: name.to_string(),
                    row: idx,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            inserted += stmt.execute(params_from_iter(row.iter()))?;
        }
        debug!(table = name, rows = inserted, "table replaced");
        Ok(inserted)
    }
}
