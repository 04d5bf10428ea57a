//! Transform entry point: clean, enforce integrity, flag readmissions.

use std::time::Instant;

use hx_model::{CleanTables, Encounter, RawTables, ReadmissionRule, TransformStats};
use tracing::{info, info_span};

use crate::clean::{clean_conditions, clean_encounters, clean_patients};
use crate::error::Result;
use crate::integrity::{known_patients, retain_known};
use crate::readmission::flag_readmissions;

/// Orders encounters by (`patient_id`, `start_date`); ties keep input order.
pub fn sort_encounters(encounters: &mut [Encounter]) {
    encounters.sort_by(|a, b| {
        a.patient_id
            .cmp(&b.patient_id)
            .then(a.start_date.cmp(&b.start_date))
    });
}

/// Runs the cleaning, integrity, and readmission stages over raw tables.
///
/// Field-level problems never fail the run; they are counted in the returned
/// statistics. Only a missing key column or a frame failure is an error.
pub fn clean_and_flag(raw: &RawTables, rule: &ReadmissionRule) -> Result<CleanTables> {
    let span = info_span!("transform", window_days = rule.window_days);
    let _guard = span.enter();
    let start = Instant::now();

    let (patients, encounters, conditions) = info_span!("clean").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let patients = clean_patients(&raw.patients)?;
        let encounters = clean_encounters(&raw.encounters)?;
        let conditions = clean_conditions(&raw.conditions)?;
        info!(
            patients = patients.rows.len(),
            encounters = encounters.rows.len(),
            conditions = conditions.rows.len(),
            duration_ms = start.elapsed().as_millis(),
            "cleaning complete"
        );
        Ok((patients, encounters, conditions))
    })?;

    let mut stats = TransformStats {
        patients: patients.stats,
        encounters: encounters.stats,
        conditions: conditions.stats,
        ..TransformStats::default()
    };
    let patients = patients.rows;
    let mut encounters = encounters.rows;
    let mut conditions = conditions.rows;

    info_span!("integrity").in_scope(|| {
        let known = known_patients(&patients);
        stats.encounters.orphans = retain_known(&mut encounters, &known);
        stats.conditions.orphans = retain_known(&mut conditions, &known);
        info!(
            encounter_orphans = stats.encounters.orphans,
            condition_orphans = stats.conditions.orphans,
            "orphan rows removed"
        );
    });

    info_span!("readmission").in_scope(|| {
        let start = Instant::now();
        sort_encounters(&mut encounters);
        let summary = flag_readmissions(&mut encounters, rule);
        stats.readmission_candidates = summary.candidates;
        stats.readmissions = summary.flagged;
        info!(
            candidates = summary.candidates,
            readmissions = summary.flagged,
            duration_ms = start.elapsed().as_millis(),
            "readmissions flagged"
        );
    });

    info!(
        patients = patients.len(),
        encounters = encounters.len(),
        conditions = conditions.len(),
        duration_ms = start.elapsed().as_millis(),
        "transform complete"
    );

    Ok(CleanTables {
        patients,
        encounters,
        conditions,
        stats,
    })
}
