//! CSV output for CDI rows.

use std::fs::File;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::error::{ExtractError, Result};
use crate::source::CdiRecord;

/// Union of record keys in first-seen order.
pub fn record_columns(records: &[CdiRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Writes records as CSV with a header row, creating parent directories.
///
/// Missing keys and nulls become empty fields. Returns the number of rows.
pub fn write_records_csv(path: &Path, records: &[CdiRecord]) -> Result<usize> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| ExtractError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let csv_error = |source| ExtractError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let columns = record_columns(records);
    let mut writer = csv::Writer::from_writer(file);
    if !columns.is_empty() {
        writer.write_record(&columns).map_err(csv_error)?;
    }
    for record in records {
        writer
            .write_record(columns.iter().map(|c| cell(record.get(c))))
            .map_err(csv_error)?;
    }
    writer.flush().map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), rows = records.len(), "CDI rows written");
    Ok(records.len())
}
