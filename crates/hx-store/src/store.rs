//! Store handle: open, read, and transactional write entry point.

use std::path::{Path, PathBuf};

use rusqlite::types::{Value, ValueRef};
use rusqlite::{Connection, OpenFlags, Row, params};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::schema::quote_ident;
use crate::table::TextTable;
use crate::writer::StoreWriter;

/// A SQLite-backed relational store.
///
/// One `Store` is the single exclusive writer for a pipeline run.
pub struct Store {
    conn: Connection,
    location: Option<PathBuf>,
}

impl Store {
    /// Opens (or creates) the database at `path`, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "store opened");
        Ok(Self {
            conn,
            location: Some(path.to_path_buf()),
        })
    }

    /// Opens an existing database at `path` for reading only.
    ///
    /// Never creates the file or its parent directories; a missing file is an
    /// `Open` error and writes through this handle fail.
    pub fn open_read_only(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "store opened read-only");
        Ok(Self {
            conn,
            location: Some(path.to_path_buf()),
        })
    }

    /// Opens a private in-memory database. Useful for testing.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn,
            location: None,
        })
    }

    /// Database file path, or `None` for an in-memory store.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Runs `f` inside a transaction.
    ///
    /// Commits when `f` returns `Ok`; otherwise the transaction is rolled back
    /// and the error is returned unchanged.
    pub fn write<T, E, F>(&mut self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&StoreWriter<'_>) -> std::result::Result<T, E>,
        E: From<StoreError>,
    {
        let tx = self.conn.transaction().map_err(StoreError::from)?;
        let value = f(&StoreWriter { conn: &*tx })?;
        tx.commit().map_err(StoreError::from)?;
        Ok(value)
    }

    /// True when a table with this name exists.
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        self.object_exists("table", name)
    }

    /// True when a view with this name exists.
    pub fn view_exists(&self, name: &str) -> Result<bool> {
        self.object_exists("view", name)
    }

    /// True when an index with this name exists.
    pub fn index_exists(&self, name: &str) -> Result<bool> {
        self.object_exists("index", name)
    }

    fn object_exists(&self, kind: &str, name: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2",
            params![kind, name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Number of rows in a table or view.
    pub fn row_count(&self, name: &str) -> Result<usize> {
        self.ensure_relation(name)?;
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_ident(name)),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Reads every row of a table or view, rendering each cell as text.
    ///
    /// Rows come back in the store's natural scan order. Numbers are rendered
    /// with their shortest display form, blobs are decoded lossily as UTF-8.
    pub fn read_text_table(&self, name: &str) -> Result<TextTable> {
        self.ensure_relation(name)?;
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {}", quote_ident(name)))?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let width = columns.len();
        let mut table = TextTable::new(columns);
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(width);
            for idx in 0..width {
                values.push(value_to_text(row.get_ref(idx)?));
            }
            table.rows.push(values);
        }
        debug!(table = name, rows = table.len(), "text table read");
        Ok(table)
    }

    /// Runs a query and returns every row as owned SQLite values.
    pub fn read_rows(&self, sql: &str) -> Result<Vec<Vec<Value>>> {
        let mut stmt = self.conn.prepare(sql)?;
        let width = stmt.column_count();
        let mut out = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(width);
            for idx in 0..width {
                values.push(row.get::<_, Value>(idx)?);
            }
            out.push(values);
        }
        Ok(out)
    }

    /// Runs a query and maps each row with `f`.
    pub fn query_map<T, F>(&self, sql: &str, f: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let mapped = stmt.query_map([], f)?;
        let values = mapped.collect::<rusqlite::Result<Vec<T>>>()?;
        Ok(values)
    }

    fn ensure_relation(&self, name: &str) -> Result<()> {
        if self.table_exists(name)? || self.view_exists(name)? {
            Ok(())
        } else {
            Err(StoreError::TableNotFound {
                name: name.to_string(),
            })
        }
    }
}

fn value_to_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(v) => Some(v.to_string()),
        ValueRef::Real(v) => Some(v.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnDef, SqlType};

    fn text_table() -> TextTable {
        TextTable {
            columns: vec!["patient_id".to_string(), "sex".to_string()],
            rows: vec![
                vec![Some("P1".to_string()), Some("F".to_string())],
                vec![Some("P2".to_string()), None],
            ],
        }
    }

    #[test]
    fn test_text_table_roundtrip_preserves_nulls() {
        let mut store = Store::open_in_memory().unwrap();
        let written: usize = store
            .write(|writer| writer.replace_text_table("patients", &text_table()))
            .unwrap();
        assert_eq!(written, 2);

        let read = store.read_text_table("patients").unwrap();
        assert_eq!(read, text_table());
    }

    #[test]
    fn test_replace_table_drops_previous_rows() {
        let mut store = Store::open_in_memory().unwrap();
        let columns = [
            ColumnDef::new("id", SqlType::Text),
            ColumnDef::new("flag", SqlType::Boolean),
        ];
        for _ in 0..2 {
            store
                .write(|writer| {
                    writer.replace_table(
                        "flags",
                        &columns,
                        vec![vec![Value::Text("a".into()), Value::Integer(1)]],
                    )
                })
                .unwrap();
        }
        assert_eq!(store.row_count("flags").unwrap(), 1);
        let rows = store.read_rows("SELECT flag FROM flags").unwrap();
        assert_eq!(rows, vec![vec![Value::Integer(1)]]);
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let mut store = Store::open_in_memory().unwrap();
        let result: Result<usize> = store.write(|writer| {
            writer.replace_text_table("patients", &text_table())?;
            writer.replace_table(
                "broken",
                &[ColumnDef::new("a", SqlType::Text)],
                vec![vec![Value::Null, Value::Null]],
            )
        });
        assert!(matches!(result, Err(StoreError::ShapeMismatch { .. })));
        assert!(!store.table_exists("patients").unwrap());
    }

    #[test]
    fn test_missing_table() {
        let store = Store::open_in_memory().unwrap();
        let err = store.read_text_table("encounters").unwrap_err();
        assert!(matches!(err, StoreError::TableNotFound { .. }));
    }

    #[test]
    fn test_views_and_indexes_are_idempotent() {
        let mut store = Store::open_in_memory().unwrap();
        for _ in 0..2 {
            store
                .write(|writer| {
                    writer.replace_text_table("patients", &text_table())?;
                    writer.create_index("ix_patients_pid", "patients", &["patient_id"])?;
                    writer.replace_view("vw_ids", "SELECT patient_id FROM patients")
                })
                .unwrap();
        }
        assert!(store.index_exists("ix_patients_pid").unwrap());
        assert!(store.view_exists("vw_ids").unwrap());
        assert_eq!(store.row_count("vw_ids").unwrap(), 2);
    }

    #[test]
    fn test_numbers_render_as_text() {
        let store = Store::open_in_memory().unwrap();
        store
            .conn
            .execute_batch("CREATE TABLE t (a, b); INSERT INTO t VALUES (1980, 2.5);")
            .unwrap();
        let table = store.read_text_table("t").unwrap();
        assert_eq!(
            table.rows,
            vec![vec![Some("1980".to_string()), Some("2.5".to_string())]]
        );
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("health.db");
        let store = Store::open(&path).unwrap();
        assert_eq!(store.location(), Some(path.as_path()));
        assert!(path.parent().unwrap().is_dir());
    }
}
