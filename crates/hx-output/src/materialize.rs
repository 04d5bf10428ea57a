//! Writes clean tables, their indexes, and the aggregate views.

use std::time::Instant;

use hx_model::{CleanTables, OutputNames};
use hx_store::Store;
use tracing::{info, info_span};

use crate::error::Result;
use crate::tables::{
    CONDITION_COLUMNS, ENCOUNTER_COLUMNS, PATIENT_COLUMNS, condition_row, encounter_row,
    patient_row,
};
use crate::views::{readmit_month_sql, top_conditions_sql};

/// What the materializer wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// `(table, rows)` in write order.
    pub tables: Vec<(String, usize)>,
    pub indexes: Vec<String>,
    pub views: Vec<String>,
}

/// Replaces the clean tables, ensures their indexes, and redefines both views.
///
/// Everything happens in one transaction: on any failure the store keeps the
/// outputs of the previous run.
pub fn materialize(
    store: &mut Store,
    names: &OutputNames,
    clean: &CleanTables,
) -> Result<MaterializeReport> {
    let span = info_span!("materialize");
    let _guard = span.enter();
    let start = Instant::now();

    let report = store.write(|writer| -> Result<MaterializeReport> {
        let mut report = MaterializeReport::default();

        let rows = writer.replace_table(
            &names.patients,
            &PATIENT_COLUMNS,
            clean.patients.iter().map(patient_row),
        )?;
        report.tables.push((names.patients.clone(), rows));

        let rows = writer.replace_table(
            &names.encounters,
            &ENCOUNTER_COLUMNS,
            clean.encounters.iter().map(encounter_row),
        )?;
        report.tables.push((names.encounters.clone(), rows));

        let rows = writer.replace_table(
            &names.conditions,
            &CONDITION_COLUMNS,
            clean.conditions.iter().map(condition_row),
        )?;
        report.tables.push((names.conditions.clone(), rows));

        let indexes: [(&str, &str, &[&str]); 3] = [
            (&names.patients_index, &names.patients, &["patient_id"]),
            (
                &names.encounters_index,
                &names.encounters,
                &["patient_id", "start_date"],
            ),
            (&names.conditions_index, &names.conditions, &["patient_id"]),
        ];
        for (index, table, columns) in indexes {
            writer.create_index(index, table, columns)?;
            report.indexes.push(index.to_string());
        }

        writer.replace_view(
            &names.readmit_month_view,
            &readmit_month_sql(&names.encounters),
        )?;
        report.views.push(names.readmit_month_view.clone());
        writer.replace_view(
            &names.top_conditions_view,
            &top_conditions_sql(&names.conditions),
        )?;
        report.views.push(names.top_conditions_view.clone());

        Ok(report)
    })?;

    info!(
        tables = report.tables.len(),
        indexes = report.indexes.len(),
        views = report.views.len(),
        duration_ms = start.elapsed().as_millis(),
        "outputs materialized"
    );
    Ok(report)
}
