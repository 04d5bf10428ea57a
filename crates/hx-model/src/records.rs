//! Cleaned entity records.
//!
//! These are the typed rows produced by the cleaning stage and written back to
//! the store by the materializer. Optional fields are `None` when the raw cell
//! was null, blank, or failed coercion.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::report::TransformStats;

/// Access to the patient reference carried by a row.
pub trait HasPatient {
    fn patient_id(&self) -> &str;
}

/// A patient, unique by `patient_id` after cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub patient_id: String,
    pub sex: Option<String>,
    pub birth_year: Option<i32>,
    pub state: Option<String>,
}

/// A dated encounter with its computed readmission flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub encounter_id: String,
    pub patient_id: String,
    pub start_date: NaiveDate,
    /// Trimmed and lower-cased.
    pub encounter_type: Option<String>,
    pub facility: Option<String>,
    pub was_readmit: bool,
}

impl Encounter {
    /// Returns true when the (already lower-cased) type equals `encounter_type`.
    pub fn is_type(&self, encounter_type: &str) -> bool {
        self.encounter_type.as_deref() == Some(encounter_type)
    }
}

/// A diagnosed condition. Rows are unique on every field after cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    pub patient_id: String,
    pub condition_code: String,
    pub condition_name: Option<String>,
    pub onset_date: Option<NaiveDate>,
}

impl HasPatient for Patient {
    fn patient_id(&self) -> &str {
        &self.patient_id
    }
}

impl HasPatient for Encounter {
    fn patient_id(&self) -> &str {
        &self.patient_id
    }
}

impl HasPatient for Condition {
    fn patient_id(&self) -> &str {
        &self.patient_id
    }
}

/// Output of the transform: cleaned, filtered, and flagged records.
#[derive(Debug, Clone, Default)]
pub struct CleanTables {
    pub patients: Vec<Patient>,
    /// Sorted by (`patient_id`, `start_date`), stable on ties.
    pub encounters: Vec<Encounter>,
    pub conditions: Vec<Condition>,
    pub stats: TransformStats,
}

impl CleanTables {
    /// Number of encounters carrying `was_readmit = true`.
    pub fn readmit_count(&self) -> usize {
        self.encounters.iter().filter(|e| e.was_readmit).count()
    }
}
