//! Column layouts and row encoding for the clean tables.
//!
//! Dates are stored as ISO `YYYY-MM-DD` text so that SQLite date functions
//! work on them directly; `was_readmit` is a `BOOLEAN` column holding 0/1.

use chrono::NaiveDate;
use hx_model::{Condition, Encounter, Patient};
use hx_store::{ColumnDef, SqlType, Value};

pub const PATIENT_COLUMNS: [ColumnDef; 4] = [
    ColumnDef::new("patient_id", SqlType::Text),
    ColumnDef::new("sex", SqlType::Text),
    ColumnDef::new("birth_year", SqlType::Integer),
    ColumnDef::new("state", SqlType::Text),
];

pub const ENCOUNTER_COLUMNS: [ColumnDef; 6] = [
    ColumnDef::new("encounter_id", SqlType::Text),
    ColumnDef::new("patient_id", SqlType::Text),
    ColumnDef::new("start_date", SqlType::Text),
    ColumnDef::new("encounter_type", SqlType::Text),
    ColumnDef::new("facility", SqlType::Text),
    ColumnDef::new("was_readmit", SqlType::Boolean),
];

pub const CONDITION_COLUMNS: [ColumnDef; 4] = [
    ColumnDef::new("patient_id", SqlType::Text),
    ColumnDef::new("condition_code", SqlType::Text),
    ColumnDef::new("condition_name", SqlType::Text),
    ColumnDef::new("onset_date", SqlType::Text),
];

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn opt_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, text)
}

fn date(value: NaiveDate) -> Value {
    Value::Text(value.format("%Y-%m-%d").to_string())
}

pub fn patient_row(patient: &Patient) -> Vec<Value> {
    vec![
        text(&patient.patient_id),
        opt_text(patient.sex.as_deref()),
        patient
            .birth_year
            .map_or(Value::Null, |year| Value::Integer(i64::from(year))),
        opt_text(patient.state.as_deref()),
    ]
}

pub fn encounter_row(encounter: &Encounter) -> Vec<Value> {
    vec![
        text(&encounter.encounter_id),
        text(&encounter.patient_id),
        date(encounter.start_date),
        opt_text(encounter.encounter_type.as_deref()),
        opt_text(encounter.facility.as_deref()),
        Value::Integer(i64::from(encounter.was_readmit)),
    ]
}

pub fn condition_row(condition: &Condition) -> Vec<Value> {
    vec![
        text(&condition.patient_id),
        text(&condition.condition_code),
        opt_text(condition.condition_name.as_deref()),
        condition.onset_date.map_or(Value::Null, date),
    ]
}
