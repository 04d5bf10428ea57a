//! Output materialization for the health readmission pipeline.
//!
//! Writes the clean tables back to the store and defines two reporting views:
//! - `vw_readmit_month(month_start, readmit_rate)`: monthly mean of `was_readmit`
//! - `vw_top_conditions(condition_name, patients)`: distinct patients per condition
//!
//! Both views carry the configured output prefix.

mod error;
mod materialize;
mod tables;
mod views;

pub use error::{OutputError, Result};
pub use materialize::{MaterializeReport, materialize};
pub use tables::{CONDITION_COLUMNS, ENCOUNTER_COLUMNS, PATIENT_COLUMNS};
pub use views::{
    ReadmitMonth, TopCondition, read_readmit_month, read_top_conditions, readmit_month_sql,
    top_conditions_sql,
};
