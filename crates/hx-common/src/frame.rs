//! Polars helpers for all-text frames.
//!
//! Raw tables arrive from the store with every column typed as a nullable
//! string. These helpers read such columns back into owned values and build
//! frames from column vectors, tolerating non-string columns by casting.

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, PolarsResult, Series};

/// Finds a column by name, ignoring ASCII case.
pub fn find_column<'a>(df: &'a DataFrame, name: &str) -> Option<&'a Column> {
    df.get_columns()
        .iter()
        .find(|column| column.name().as_str().eq_ignore_ascii_case(name))
}

/// Reads a column as nullable strings, casting non-string columns first.
pub fn column_strings(column: &Column) -> PolarsResult<Vec<Option<String>>> {
    let str_col = column.cast(&DataType::String)?;
    let chunked = str_col.str()?;
    Ok(chunked
        .iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Reads a column by case-insensitive name.
///
/// Returns `Ok(None)` when the frame has no such column.
pub fn text_column(df: &DataFrame, name: &str) -> PolarsResult<Option<Vec<Option<String>>>> {
    find_column(df, name).map(column_strings).transpose()
}

/// Builds a frame of string columns from `(name, values)` pairs.
///
/// All value vectors must have the same length.
pub fn string_frame(columns: Vec<(String, Vec<Option<String>>)>) -> PolarsResult<DataFrame> {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    DataFrame::new(cols)
}

/// Returns the value when it contains anything besides whitespace.
///
/// The value itself is returned untrimmed.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        string_frame(vec![
            (
                "Patient_ID".to_string(),
                vec![Some("P1".to_string()), None],
            ),
            (
                "sex".to_string(),
                vec![Some(" F ".to_string()), Some("M".to_string())],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_find_column_case_insensitive() {
        let df = frame();
        assert!(find_column(&df, "patient_id").is_some());
        assert!(find_column(&df, "SEX").is_some());
        assert!(find_column(&df, "state").is_none());
    }

    #[test]
    fn test_text_column_values() {
        let df = frame();
        let values = text_column(&df, "patient_id").unwrap().unwrap();
        assert_eq!(values, vec![Some("P1".to_string()), None]);
        assert!(text_column(&df, "missing").unwrap().is_none());
    }

    #[test]
    fn test_column_strings_casts_numbers() {
        let column = Series::new("birth_year".into(), &[1980i64, 1975]).into_column();
        let values = column_strings(&column).unwrap();
        assert_eq!(
            values,
            vec![Some("1980".to_string()), Some("1975".to_string())]
        );
    }

    #[test]
    fn test_string_frame_shape() {
        let df = frame();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some(" P1 ")), Some(" P1 "));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(None), None);
    }
}
