//! Loads raw CSV extracts into the store as all-text tables.

use std::path::{Path, PathBuf};

use hx_model::{Entity, SourceTableNames};
use hx_store::{Store, TextTable};
use tracing::info;

use crate::csv::read_text_csv;
use crate::error::Result;
use crate::table::frame_to_text_table;

/// Column that gets a lookup index on every raw table that carries it.
const PATIENT_KEY: &str = "patient_id";

/// One raw table written by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTable {
    pub entity: Entity,
    pub table: String,
    pub source: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

/// Result of a load run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub tables: Vec<LoadedTable>,
    /// Indexes ensured on the raw tables.
    pub indexes: Vec<String>,
}

impl LoadReport {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

/// Path of the raw extract for an entity: `<raw_dir>/<entity>.csv`.
pub fn raw_csv_path(raw_dir: &Path, entity: Entity) -> PathBuf {
    raw_dir.join(format!("{}.csv", entity.as_str()))
}

/// Index name for the patient lookup index on a raw table.
pub fn raw_index_name(table: &str) -> String {
    format!("ix_{table}_patient")
}

/// Reads `patients.csv`, `encounters.csv` and `conditions.csv` from `raw_dir`
/// and replaces the corresponding raw tables.
///
/// Every CSV is parsed before anything is written, and all tables are written
/// in one transaction, so a bad file leaves the store untouched. Encounter and
/// condition tables get a `patient_id` index when they carry that column.
pub fn load_raw_tables(
    store: &mut Store,
    raw_dir: &Path,
    names: &SourceTableNames,
) -> Result<LoadReport> {
    let mut parsed: Vec<(Entity, PathBuf, TextTable)> = Vec::with_capacity(Entity::ALL.len());
    for entity in Entity::ALL {
        let path = raw_csv_path(raw_dir, entity);
        let df = read_text_csv(&path)?;
        parsed.push((entity, path, frame_to_text_table(&df)?));
    }

    let report = store.write(|writer| -> Result<LoadReport> {
        let mut report = LoadReport::default();
        for (entity, path, table) in &parsed {
            let name = names.get(*entity);
            let rows = writer.replace_text_table(name, table)?;
            info!(table = name, rows, source = %path.display(), "loaded raw table");
            report.tables.push(LoadedTable {
                entity: *entity,
                table: name.to_string(),
                source: path.clone(),
                rows,
                columns: table.width(),
            });

            let has_key = table
                .columns
                .iter()
                .any(|column| column.eq_ignore_ascii_case(PATIENT_KEY));
            if *entity != Entity::Patients && has_key {
                let index = raw_index_name(name);
                writer.create_index(&index, name, &[PATIENT_KEY])?;
                report.indexes.push(index);
            }
        }
        Ok(report)
    })?;

    info!(
        tables = report.tables.len(),
        rows = report.total_rows(),
        "raw load complete"
    );
    Ok(report)
}
