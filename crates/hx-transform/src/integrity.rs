//! Referential integrity: drop rows whose patient is unknown.

use std::collections::HashSet;

use hx_model::{HasPatient, Patient};

/// Set of cleaned patient ids.
pub fn known_patients(patients: &[Patient]) -> HashSet<&str> {
    patients.iter().map(|p| p.patient_id.as_str()).collect()
}

/// Keeps rows whose `patient_id` is known, preserving order.
///
/// Returns the number of rows removed.
pub fn retain_known<T: HasPatient>(rows: &mut Vec<T>, known: &HashSet<&str>) -> usize {
    let before = rows.len();
    rows.retain(|row| known.contains(row.patient_id()));
    before - rows.len()
}
