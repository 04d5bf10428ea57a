//! CSV reading for raw extracts.
//!
//! Every column is read as text; no type inference happens at load time so
//! that the cleaning stage sees exactly what the extract contained.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

const UTF8_BOM: char = '\u{feff}';

fn open_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Checks that the file exists, is non-empty, and is not UTF-16 encoded.
///
/// A UTF-8 BOM is accepted; it is stripped from the first header later.
pub fn validate_csv_file(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads a CSV file with a single header row into an all-text DataFrame.
///
/// Empty fields become nulls.
pub fn read_text_csv(path: &Path) -> Result<DataFrame> {
    validate_csv_file(path)?;

    let parse_error = |e: PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    let bom_column = df
        .get_column_names()
        .first()
        .filter(|name| name.starts_with(UTF8_BOM))
        .map(|name| name.to_string());
    if let Some(name) = bom_column {
        let cleaned = name.trim_start_matches(UTF8_BOM).to_string();
        df.rename(&name, cleaned.into())?;
    }

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "raw CSV read"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_keeps_text() {
        let file = create_temp_csv("patient_id,birth_year\nP001,1980\nP002,\n");
        let df = read_text_csv(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        let years = df.column("birth_year").unwrap();
        assert_eq!(years.dtype(), &DataType::String);
        let values: Vec<Option<&str>> = years.str().unwrap().iter().collect();
        assert_eq!(values, vec![Some("1980"), None]);
    }

    #[test]
    fn test_leading_zeros_survive() {
        let file = create_temp_csv("patient_id\n007\n");
        let df = read_text_csv(file.path()).unwrap();
        let ids: Vec<Option<&str>> = df.column("patient_id").unwrap().str().unwrap().iter().collect();
        assert_eq!(ids, vec![Some("007")]);
    }

    #[test]
    fn test_bom_stripped_from_header() {
        let file = create_temp_csv("\u{feff}patient_id,sex\nP001,F\n");
        let df = read_text_csv(file.path()).unwrap();
        assert!(df.column("patient_id").is_ok());
    }

    #[test]
    fn test_empty_file() {
        let file = create_temp_csv("");
        let result = read_text_csv(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_utf16_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, b'a', 0]).unwrap();
        let result = read_text_csv(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = read_text_csv(&dir.path().join("patients.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
