//! End-to-end tests of the transform over raw frames.

use std::collections::HashSet;

use chrono::NaiveDate;
use hx_common::string_frame;
use hx_model::{RawTables, ReadmissionRule};
use hx_transform::clean_and_flag;
use polars::prelude::DataFrame;

fn frame(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
    string_frame(
        columns
            .into_iter()
            .map(|(name, values)| {
                (
                    name.to_string(),
                    values
                        .into_iter()
                        .map(|v| (!v.is_empty()).then(|| v.to_string()))
                        .collect(),
                )
            })
            .collect(),
    )
    .unwrap()
}

fn patients(ids: Vec<&str>) -> DataFrame {
    let n = ids.len();
    frame(vec![
        ("patient_id", ids),
        ("sex", vec!["F"; n]),
        ("birth_year", vec!["1970"; n]),
        ("state", vec!["MD"; n]),
    ])
}

fn encounters(rows: Vec<(&str, &str, &str, &str)>) -> DataFrame {
    frame(vec![
        ("encounter_id", rows.iter().map(|r| r.0).collect()),
        ("patient_id", rows.iter().map(|r| r.1).collect()),
        ("start_date", rows.iter().map(|r| r.2).collect()),
        ("encounter_type", rows.iter().map(|r| r.3).collect()),
        ("facility", rows.iter().map(|_| "General").collect()),
    ])
}

fn conditions(rows: Vec<(&str, &str, &str)>) -> DataFrame {
    frame(vec![
        ("patient_id", rows.iter().map(|r| r.0).collect()),
        ("condition_code", rows.iter().map(|r| r.1).collect()),
        ("condition_name", rows.iter().map(|r| r.2).collect()),
        ("onset_date", rows.iter().map(|_| "").collect()),
    ])
}

fn flags_by_id(raw: &RawTables) -> Vec<(String, bool)> {
    let clean = clean_and_flag(raw, &ReadmissionRule::default()).unwrap();
    clean
        .encounters
        .iter()
        .map(|e| (e.encounter_id.clone(), e.was_readmit))
        .collect()
}

#[test]
fn test_three_encounter_scenario() {
    let raw = RawTables {
        patients: patients(vec!["P1"]),
        encounters: encounters(vec![
            ("E1", "P1", "2024-01-01", "inpatient"),
            ("E2", "P1", "2024-01-20", "inpatient"),
            ("E3", "P1", "2024-03-01", "inpatient"),
        ]),
        conditions: conditions(vec![]),
    };
    assert_eq!(
        flags_by_id(&raw),
        vec![
            ("E1".to_string(), true),
            ("E2".to_string(), false),
            ("E3".to_string(), false),
        ]
    );
}

#[test]
fn test_outpatient_never_triggers() {
    let raw = RawTables {
        patients: patients(vec!["P1"]),
        encounters: encounters(vec![
            ("E1", "P1", "2024-01-01", "Inpatient"),
            ("E2", "P1", "2024-01-10", "outpatient"),
        ]),
        conditions: conditions(vec![]),
    };
    assert_eq!(
        flags_by_id(&raw),
        vec![("E1".to_string(), false), ("E2".to_string(), false)]
    );
}

#[test]
fn test_patients_are_isolated() {
    let raw = RawTables {
        patients: patients(vec!["P1", "P2"]),
        encounters: encounters(vec![
            ("E1", "P1", "2024-01-01", "inpatient"),
            ("E2", "P2", "2024-01-05", "inpatient"),
        ]),
        conditions: conditions(vec![]),
    };
    assert_eq!(
        flags_by_id(&raw),
        vec![("E1".to_string(), false), ("E2".to_string(), false)]
    );
}

#[test]
fn test_encounters_sorted_by_patient_then_date() {
    let raw = RawTables {
        patients: patients(vec!["P2", "P1"]),
        encounters: encounters(vec![
            ("E4", "P2", "2024-02-01", "inpatient"),
            ("E3", "P1", "2024-03-01", "outpatient"),
            ("E1", "P1", "2024-01-01", "inpatient"),
            ("E2", "P1", "2024-01-01", "outpatient"),
        ]),
        conditions: conditions(vec![]),
    };
    let ids: Vec<String> = flags_by_id(&raw).into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["E1", "E2", "E3", "E4"]);
}

#[test]
fn test_referential_closure_and_unique_patients() {
    let raw = RawTables {
        patients: patients(vec!["P1", "P1", "P2", ""]),
        encounters: encounters(vec![
            ("E1", "P1", "2024-01-01", "inpatient"),
            ("E2", "P9", "2024-01-02", "inpatient"),
            ("E3", "P2", "not a date", "inpatient"),
        ]),
        conditions: conditions(vec![
            ("P1", "E11", "Diabetes"),
            ("P1", "E11", "Diabetes"),
            ("P9", "I10", "Hypertension"),
        ]),
    };
    let clean = clean_and_flag(&raw, &ReadmissionRule::default()).unwrap();

    let ids: HashSet<&str> = clean.patients.iter().map(|p| p.patient_id.as_str()).collect();
    assert_eq!(ids.len(), clean.patients.len());
    assert_eq!(clean.patients.len(), 2);
    assert!(clean.encounters.iter().all(|e| ids.contains(e.patient_id.as_str())));
    assert!(clean.conditions.iter().all(|c| ids.contains(c.patient_id.as_str())));

    assert_eq!(clean.encounters.len(), 1);
    assert_eq!(clean.conditions.len(), 1);
    assert_eq!(clean.stats.patients.duplicates, 1);
    assert_eq!(clean.stats.patients.missing_key, 1);
    assert_eq!(clean.stats.encounters.orphans, 1);
    assert_eq!(clean.stats.encounters.missing_key, 1);
    assert_eq!(clean.stats.conditions.orphans, 1);
    assert_eq!(clean.stats.conditions.duplicates, 1);
    assert_eq!(clean.stats.encounters.rows_out(), clean.encounters.len());
}

#[test]
fn test_window_is_configurable() {
    let raw = RawTables {
        patients: patients(vec!["P1"]),
        encounters: encounters(vec![
            ("E1", "P1", "2024-01-01", "inpatient"),
            ("E2", "P1", "2024-01-10", "inpatient"),
        ]),
        conditions: conditions(vec![]),
    };
    let rule = ReadmissionRule {
        window_days: 7,
        ..ReadmissionRule::default()
    };
    let clean = clean_and_flag(&raw, &rule).unwrap();
    assert_eq!(clean.readmit_count(), 0);
    assert_eq!(clean.stats.readmission_candidates, 2);
    assert_eq!(
        clean.encounters[0].start_date,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    );
}
