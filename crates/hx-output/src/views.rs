//! Aggregate view definitions and typed readers.

use chrono::NaiveDate;
use hx_model::OutputNames;
use hx_store::{Store, quote_ident};
use serde::Serialize;

use crate::error::{OutputError, Result};

/// One row of the monthly readmission-rate view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadmitMonth {
    pub month_start: NaiveDate,
    /// Fraction of the month's encounters flagged `was_readmit`, in `[0, 1]`.
    pub readmit_rate: f64,
}

/// One row of the top-conditions view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopCondition {
    pub condition_name: Option<String>,
    /// Distinct patients with this condition.
    pub patients: u64,
}

/// `SELECT` for the monthly readmission rate over the encounters table.
pub fn readmit_month_sql(encounters_table: &str) -> String {
    format!(
        "WITH fe AS (\
           SELECT date(strftime('%Y-%m-01', start_date)) AS month_start, \
                  CASE WHEN was_readmit THEN 1.0 ELSE 0.0 END AS readmit \
           FROM {} \
         ) \
         SELECT month_start, AVG(readmit) AS readmit_rate \
         FROM fe \
         GROUP BY month_start \
         ORDER BY month_start",
        quote_ident(encounters_table)
    )
}

/// `SELECT` for distinct patients per condition name, most common first.
pub fn top_conditions_sql(conditions_table: &str) -> String {
    format!(
        "SELECT condition_name, COUNT(DISTINCT patient_id) AS patients \
         FROM {} \
         GROUP BY condition_name \
         ORDER BY patients DESC, condition_name",
        quote_ident(conditions_table)
    )
}

/// Reads the monthly readmission view in month order.
pub fn read_readmit_month(store: &Store, names: &OutputNames) -> Result<Vec<ReadmitMonth>> {
    let view = &names.readmit_month_view;
    let rows: Vec<(String, f64)> = store.query_map(
        &format!(
            "SELECT month_start, readmit_rate FROM {} ORDER BY month_start",
            quote_ident(view)
        ),
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    rows.into_iter()
        .map(|(month, readmit_rate)| {
            let month_start = NaiveDate::parse_from_str(&month, "%Y-%m-%d").map_err(|_| {
                OutputError::InvalidViewValue {
                    view: view.clone(),
                    column: "month_start",
                    value: month.clone(),
                }
            })?;
            Ok(ReadmitMonth {
                month_start,
                readmit_rate,
            })
        })
        .collect()
}

/// Reads the top-conditions view, most common first.
pub fn read_top_conditions(store: &Store, names: &OutputNames) -> Result<Vec<TopCondition>> {
    let view = &names.top_conditions_view;
    let rows: Vec<(Option<String>, i64)> = store.query_map(
        &format!(
            "SELECT condition_name, patients FROM {} ORDER BY patients DESC, condition_name",
            quote_ident(view)
        ),
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    rows.into_iter()
        .map(|(condition_name, patients)| {
            let patients = u64::try_from(patients).map_err(|_| OutputError::InvalidViewValue {
                view: view.clone(),
                column: "patients",
                value: patients.to_string(),
            })?;
            Ok(TopCondition {
                condition_name,
                patients,
            })
        })
        .collect()
}
