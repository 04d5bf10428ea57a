//! Readmission detection.
//!
//! An encounter of the rule's type is flagged when the same patient has
//! another encounter of that type starting strictly later and within the
//! window. Only existence matters: the flag never chains through
//! intermediate encounters, and same-day encounters never flag each other.

use std::collections::HashMap;

use chrono::NaiveDate;
use hx_model::{Encounter, ReadmissionRule};

/// Counts from one detection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadmissionSummary {
    /// Encounters of the rule's type.
    pub candidates: usize,
    /// Encounters flagged as followed by a readmission.
    pub flagged: usize,
}

fn rule_type(rule: &ReadmissionRule) -> String {
    rule.encounter_type.trim().to_lowercase()
}

/// Computes the readmission flag for every encounter, in input order.
///
/// Candidates are grouped by patient and sorted by date; one forward sweep
/// per patient then tracks the first strictly later date, which is the only
/// one that needs to be checked against the window.
pub fn readmission_flags(encounters: &[Encounter], rule: &ReadmissionRule) -> Vec<bool> {
    let kind = rule_type(rule);
    let mut by_patient: HashMap<&str, Vec<(NaiveDate, usize)>> = HashMap::new();
    for (idx, encounter) in encounters.iter().enumerate() {
        if encounter.is_type(&kind) {
            by_patient
                .entry(encounter.patient_id.as_str())
                .or_default()
                .push((encounter.start_date, idx));
        }
    }

    let mut flags = vec![false; encounters.len()];
    for visits in by_patient.values_mut() {
        visits.sort_unstable();
        let mut next = 0;
        for &(date, idx) in visits.iter() {
            while next < visits.len() && visits[next].0 <= date {
                next += 1;
            }
            if let Some(&(later, _)) = visits.get(next) {
                flags[idx] = rule.in_window(date, later);
            }
        }
    }
    flags
}

/// Quadratic reference: checks every pair of encounters directly.
pub fn readmission_flags_pairwise(encounters: &[Encounter], rule: &ReadmissionRule) -> Vec<bool> {
    let kind = rule_type(rule);
    encounters
        .iter()
        .enumerate()
        .map(|(i, e)| {
            e.is_type(&kind)
                && encounters.iter().enumerate().any(|(j, other)| {
                    i != j
                        && other.is_type(&kind)
                        && other.patient_id == e.patient_id
                        && rule.in_window(e.start_date, other.start_date)
                })
        })
        .collect()
}

/// Sets `was_readmit` on every encounter.
pub fn flag_readmissions(encounters: &mut [Encounter], rule: &ReadmissionRule) -> ReadmissionSummary {
    let flags = readmission_flags(encounters, rule);
    let kind = rule_type(rule);
    let mut summary = ReadmissionSummary::default();
    for (encounter, flag) in encounters.iter_mut().zip(flags) {
        if encounter.is_type(&kind) {
            summary.candidates += 1;
        }
        if flag {
            summary.flagged += 1;
        }
        encounter.was_readmit = flag;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encounter(id: &str, patient: &str, date: (i32, u32, u32), kind: &str) -> Encounter {
        Encounter {
            encounter_id: id.to_string(),
            patient_id: patient.to_string(),
            start_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            encounter_type: Some(kind.to_string()),
            facility: None,
            was_readmit: false,
        }
    }

    #[test]
    fn test_window_boundary() {
        let rule = ReadmissionRule::default();
        let day_30 = [
            encounter("E1", "P1", (2024, 1, 1), "inpatient"),
            encounter("E2", "P1", (2024, 1, 31), "inpatient"),
        ];
        assert_eq!(readmission_flags(&day_30, &rule), vec![true, false]);

        let day_31 = [
            encounter("E1", "P1", (2024, 1, 1), "inpatient"),
            encounter("E2", "P1", (2024, 2, 1), "inpatient"),
        ];
        assert_eq!(readmission_flags(&day_31, &rule), vec![false, false]);
    }

    #[test]
    fn test_same_day_never_flags() {
        let rule = ReadmissionRule::default();
        let encounters = [
            encounter("E1", "P1", (2024, 1, 1), "inpatient"),
            encounter("E2", "P1", (2024, 1, 1), "inpatient"),
        ];
        assert_eq!(readmission_flags(&encounters, &rule), vec![false, false]);
    }

    #[test]
    fn test_same_day_pair_followed_by_readmission() {
        let rule = ReadmissionRule::default();
        let encounters = [
            encounter("E1", "P1", (2024, 1, 1), "inpatient"),
            encounter("E2", "P1", (2024, 1, 1), "inpatient"),
            encounter("E3", "P1", (2024, 1, 20), "inpatient"),
        ];
        assert_eq!(readmission_flags(&encounters, &rule), vec![true, true, false]);
    }

    #[test]
    fn test_input_order_is_irrelevant() {
        let rule = ReadmissionRule::default();
        let encounters = [
            encounter("E2", "P1", (2024, 1, 15), "inpatient"),
            encounter("E1", "P1", (2024, 1, 1), "inpatient"),
        ];
        assert_eq!(readmission_flags(&encounters, &rule), vec![false, true]);
    }

    #[test]
    fn test_flag_readmissions_counts() {
        let rule = ReadmissionRule::default();
        let mut encounters = vec![
            encounter("E1", "P1", (2024, 1, 1), "inpatient"),
            encounter("E2", "P1", (2024, 1, 10), "outpatient"),
            encounter("E3", "P1", (2024, 1, 20), "inpatient"),
        ];
        let summary = flag_readmissions(&mut encounters, &rule);
        assert_eq!(summary, ReadmissionSummary { candidates: 2, flagged: 1 });
        assert!(encounters[0].was_readmit);
        assert!(!encounters[1].was_readmit);
    }

    #[test]
    fn test_rule_type_is_case_insensitive() {
        let rule = ReadmissionRule {
            encounter_type: " Inpatient".to_string(),
            ..ReadmissionRule::default()
        };
        let encounters = [
            encounter("E1", "P1", (2024, 1, 1), "inpatient"),
            encounter("E2", "P1", (2024, 1, 2), "inpatient"),
        ];
        assert_eq!(readmission_flags(&encounters, &rule), vec![true, false]);
    }
}
