//! Cleaning stage: raw text frames to typed, deduplicated records.
//!
//! Each entity has one function that reads the raw frame column by column,
//! coerces cells, drops rows whose keys are absent, and removes duplicates.
//! A cell that is null or blank after trimming counts as absent.

use std::collections::HashSet;

use hx_common::{non_blank, text_column};
use hx_model::{CleaningStats, Condition, Encounter, Entity, Patient};
use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::{Result, TransformError};
use crate::normalization::{clean_lower, clean_text, parse_date, parse_year};

/// Records of one entity plus the row accounting that produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cleaned<T> {
    pub rows: Vec<T>,
    pub stats: CleaningStats,
}

type TextValues = Vec<Option<String>>;

fn required_column(df: &DataFrame, entity: Entity, column: &str) -> Result<TextValues> {
    text_column(df, column)?.ok_or_else(|| TransformError::MissingColumn {
        entity,
        column: column.to_string(),
    })
}

fn optional_column(df: &DataFrame, column: &str) -> Result<TextValues> {
    Ok(text_column(df, column)?.unwrap_or_else(|| vec![None; df.height()]))
}

/// Key cells keep their raw spelling; only blank detection trims.
fn key(values: &TextValues, row: usize) -> Option<&str> {
    non_blank(values[row].as_deref())
}

/// Cleans raw patients.
///
/// `birth_year` failing numeric coercion becomes null; `sex` and `state` are
/// trimmed. Rows without `patient_id` are dropped and the first row for each
/// `patient_id` wins.
pub fn clean_patients(df: &DataFrame) -> Result<Cleaned<Patient>> {
    let ids = required_column(df, Entity::Patients, "patient_id")?;
    let sex = optional_column(df, "sex")?;
    let birth_year = optional_column(df, "birth_year")?;
    let state = optional_column(df, "state")?;

    let mut stats = CleaningStats {
        rows_in: df.height(),
        ..CleaningStats::default()
    };
    let mut seen: HashSet<&str> = HashSet::new();
    let mut rows = Vec::new();

    for row in 0..df.height() {
        let Some(patient_id) = key(&ids, row) else {
            stats.missing_key += 1;
            continue;
        };
        if !seen.insert(patient_id) {
            stats.duplicates += 1;
            continue;
        }

        let raw_year = key(&birth_year, row);
        let year = raw_year.and_then(parse_year);
        if raw_year.is_some() && year.is_none() {
            stats.coerced_to_null += 1;
        }

        rows.push(Patient {
            patient_id: patient_id.to_string(),
            sex: clean_text(sex[row].as_deref()),
            birth_year: year,
            state: clean_text(state[row].as_deref()),
        });
    }

    debug!(entity = %Entity::Patients, rows_out = rows.len(), ?stats, "cleaned");
    Ok(Cleaned { rows, stats })
}

/// Cleans raw encounters.
///
/// `start_date` failing to parse drops the row, as do an absent
/// `encounter_id` or `patient_id`. `encounter_type` is trimmed and
/// lower-cased, `facility` trimmed. The first row for each `encounter_id`
/// wins. The readmission flag starts out `false`.
pub fn clean_encounters(df: &DataFrame) -> Result<Cleaned<Encounter>> {
    let ids = required_column(df, Entity::Encounters, "encounter_id")?;
    let patient_ids = required_column(df, Entity::Encounters, "patient_id")?;
    let start_dates = required_column(df, Entity::Encounters, "start_date")?;
    let types = optional_column(df, "encounter_type")?;
    let facilities = optional_column(df, "facility")?;

    let mut stats = CleaningStats {
        rows_in: df.height(),
        ..CleaningStats::default()
    };
    let mut seen: HashSet<&str> = HashSet::new();
    let mut rows = Vec::new();

    for row in 0..df.height() {
        let start_date = key(&start_dates, row).and_then(parse_date);
        let (Some(encounter_id), Some(patient_id), Some(start_date)) =
            (key(&ids, row), key(&patient_ids, row), start_date)
        else {
            stats.missing_key += 1;
            continue;
        };
        if !seen.insert(encounter_id) {
            stats.duplicates += 1;
            continue;
        }

        rows.push(Encounter {
            encounter_id: encounter_id.to_string(),
            patient_id: patient_id.to_string(),
            start_date,
            encounter_type: clean_lower(types[row].as_deref()),
            facility: clean_text(facilities[row].as_deref()),
            was_readmit: false,
        });
    }

    debug!(entity = %Entity::Encounters, rows_out = rows.len(), ?stats, "cleaned");
    Ok(Cleaned { rows, stats })
}

/// Cleans raw conditions.
///
/// `onset_date` failing to parse becomes null and the row is kept.
/// `condition_code` and `condition_name` are trimmed. Rows without
/// `patient_id` or `condition_code` are dropped, then exact duplicates of an
/// earlier cleaned row are removed.
pub fn clean_conditions(df: &DataFrame) -> Result<Cleaned<Condition>> {
    let patient_ids = required_column(df, Entity::Conditions, "patient_id")?;
    let codes = required_column(df, Entity::Conditions, "condition_code")?;
    let names = optional_column(df, "condition_name")?;
    let onsets = optional_column(df, "onset_date")?;

    let mut stats = CleaningStats {
        rows_in: df.height(),
        ..CleaningStats::default()
    };
    let mut seen: HashSet<Condition> = HashSet::new();
    let mut rows = Vec::new();

    for row in 0..df.height() {
        let code = clean_text(codes[row].as_deref());
        let (Some(patient_id), Some(condition_code)) = (key(&patient_ids, row), code) else {
            stats.missing_key += 1;
            continue;
        };

        let raw_onset = key(&onsets, row);
        let onset_date = raw_onset.and_then(parse_date);
        if raw_onset.is_some() && onset_date.is_none() {
            stats.coerced_to_null += 1;
        }

        let condition = Condition {
            patient_id: patient_id.to_string(),
            condition_code,
            condition_name: clean_text(names[row].as_deref()),
            onset_date,
        };
        if seen.contains(&condition) {
            stats.duplicates += 1;
            continue;
        }
        seen.insert(condition.clone());
        rows.push(condition);
    }

    debug!(entity = %Entity::Conditions, rows_out = rows.len(), ?stats, "cleaned");
    Ok(Cleaned { rows, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hx_common::string_frame;

    fn frame(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
        string_frame(
            columns
                .into_iter()
                .map(|(name, values)| {
                    (
                        name.to_string(),
                        values.iter().map(|v| v.map(str::to_string)).collect(),
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_patients_dedupe_first_wins() {
        let df = frame(vec![
            ("patient_id", vec![Some("P1"), Some("P1"), Some("P2"), None, Some("  ")]),
            ("sex", vec![Some(" F "), Some("M"), Some("M"), Some("F"), Some("F")]),
            ("birth_year", vec![Some("1980"), Some("1990"), Some("n/a"), None, None]),
            ("state", vec![Some("MD "), None, Some(""), None, None]),
        ]);
        let cleaned = clean_patients(&df).unwrap();

        assert_eq!(cleaned.rows.len(), 2);
        assert_eq!(
            cleaned.rows[0],
            Patient {
                patient_id: "P1".to_string(),
                sex: Some("F".to_string()),
                birth_year: Some(1980),
                state: Some("MD".to_string()),
            }
        );
        assert_eq!(cleaned.rows[1].birth_year, None);
        assert_eq!(cleaned.rows[1].state, None);
        assert_eq!(
            cleaned.stats,
            CleaningStats {
                rows_in: 5,
                missing_key: 2,
                duplicates: 1,
                coerced_to_null: 1,
                orphans: 0,
            }
        );
    }

    #[test]
    fn test_patients_missing_descriptive_columns() {
        let df = frame(vec![("patient_id", vec![Some("P1")])]);
        let cleaned = clean_patients(&df).unwrap();
        assert_eq!(cleaned.rows[0].sex, None);
        assert_eq!(cleaned.rows[0].birth_year, None);
    }

    #[test]
    fn test_patients_missing_key_column() {
        let df = frame(vec![("sex", vec![Some("F")])]);
        let err = clean_patients(&df).unwrap_err();
        assert!(matches!(
            err,
            TransformError::MissingColumn { entity: Entity::Patients, ref column } if column == "patient_id"
        ));
    }

    #[test]
    fn test_encounters_drop_and_normalize() {
        let df = frame(vec![
            ("encounter_id", vec![Some("E1"), Some("E2"), Some("E1"), Some("E3"), None]),
            ("patient_id", vec![Some("P1"), Some("P1"), Some("P1"), None, Some("P1")]),
            (
                "start_date",
                vec![
                    Some("2024-01-01"),
                    Some("garbage"),
                    Some("2024-02-01"),
                    Some("2024-01-05"),
                    Some("2024-01-06"),
                ],
            ),
            ("encounter_type", vec![Some(" InPatient "), Some("inpatient"), Some("outpatient"), None, None]),
            ("facility", vec![Some(" Main "), None, None, None, None]),
        ]);
        let cleaned = clean_encounters(&df).unwrap();

        assert_eq!(cleaned.rows.len(), 1);
        let e1 = &cleaned.rows[0];
        assert_eq!(e1.encounter_id, "E1");
        assert_eq!(e1.start_date, date(2024, 1, 1));
        assert_eq!(e1.encounter_type.as_deref(), Some("inpatient"));
        assert_eq!(e1.facility.as_deref(), Some("Main"));
        assert!(!e1.was_readmit);
        assert_eq!(cleaned.stats.missing_key, 3);
        assert_eq!(cleaned.stats.duplicates, 1);
    }

    #[test]
    fn test_encounter_with_bad_date_does_not_claim_id() {
        let df = frame(vec![
            ("encounter_id", vec![Some("E1"), Some("E1")]),
            ("patient_id", vec![Some("P1"), Some("P1")]),
            ("start_date", vec![Some("bad"), Some("2024-03-01")]),
        ]);
        let cleaned = clean_encounters(&df).unwrap();
        assert_eq!(cleaned.rows.len(), 1);
        assert_eq!(cleaned.rows[0].start_date, date(2024, 3, 1));
    }

    #[test]
    fn test_signed_year_dates_are_unparseable() {
        let encounters = frame(vec![
            ("encounter_id", vec![Some("E1"), Some("E2")]),
            ("patient_id", vec![Some("P1"), Some("P1")]),
            ("start_date", vec![Some("-2024-01-15"), Some("2024-01-15")]),
        ]);
        let cleaned = clean_encounters(&encounters).unwrap();
        assert_eq!(cleaned.rows.len(), 1);
        assert_eq!(cleaned.rows[0].encounter_id, "E2");
        assert_eq!(cleaned.stats.missing_key, 1);

        let conditions = frame(vec![
            ("patient_id", vec![Some("P1")]),
            ("condition_code", vec![Some("I10")]),
            ("onset_date", vec![Some("-2024-01-15")]),
        ]);
        let cleaned = clean_conditions(&conditions).unwrap();
        assert_eq!(cleaned.rows.len(), 1);
        assert_eq!(cleaned.rows[0].onset_date, None);
        assert_eq!(cleaned.stats.coerced_to_null, 1);
    }

    #[test]
    fn test_encounters_missing_start_date_column() {
        let df = frame(vec![
            ("encounter_id", vec![Some("E1")]),
            ("patient_id", vec![Some("P1")]),
        ]);
        assert!(matches!(
            clean_encounters(&df),
            Err(TransformError::MissingColumn { entity: Entity::Encounters, .. })
        ));
    }

    #[test]
    fn test_conditions_full_row_dedupe() {
        let df = frame(vec![
            ("patient_id", vec![Some("P1"), Some("P1"), Some("P1"), Some("P1"), None]),
            ("condition_code", vec![Some("E11"), Some(" E11 "), Some("E11"), Some("  "), Some("I10")]),
            (
                "condition_name",
                vec![Some("Diabetes"), Some("Diabetes "), Some("Diabetes"), Some("x"), Some("y")],
            ),
            (
                "onset_date",
                vec![Some("2019-05-02"), Some("2019-05-02"), Some("unknown"), None, None],
            ),
        ]);
        let cleaned = clean_conditions(&df).unwrap();

        assert_eq!(cleaned.rows.len(), 2);
        assert_eq!(cleaned.rows[0].onset_date, Some(date(2019, 5, 2)));
        assert_eq!(cleaned.rows[1].onset_date, None);
        assert_eq!(cleaned.stats.duplicates, 1);
        assert_eq!(cleaned.stats.missing_key, 2);
        assert_eq!(cleaned.stats.coerced_to_null, 1);
    }
}
