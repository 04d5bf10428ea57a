//! Stage runners shared by the `load`, `transform`, `run` and `report` commands.

use std::time::Instant;

use anyhow::{Context, Result};
use hx_ingest::{LoadReport, load_raw_tables, read_raw_tables};
use hx_model::{CleanTables, PipelineConfig};
use hx_output::{ReadmitMonth, TopCondition, materialize, read_readmit_month, read_top_conditions};
use hx_store::Store;
use hx_transform::clean_and_flag;
use tracing::{info, info_span, trace};

use crate::logging::redact_value;
use crate::types::{RunResult, TransformOutcome};

/// Opens (creating if needed) the configured store.
pub fn open_store(config: &PipelineConfig) -> Result<Store> {
    Store::open(&config.store_location)
        .with_context(|| format!("open store {}", config.store_location.display()))
}

/// Loads the raw CSV extracts into the raw tables.
pub fn load_stage(store: &mut Store, config: &PipelineConfig) -> Result<LoadReport> {
    let span = info_span!("load_stage", raw_dir = %config.raw_data_dir.display());
    span.in_scope(|| -> Result<LoadReport> {
        let start = Instant::now();
        let report = load_raw_tables(store, &config.raw_data_dir, &config.source_table_names)
            .with_context(|| format!("load raw data from {}", config.raw_data_dir.display()))?;
        info!(
            tables = report.tables.len(),
            rows = report.total_rows(),
            duration_ms = start.elapsed().as_millis(),
            "load stage complete"
        );
        Ok(report)
    })
}

/// Reads the raw tables, cleans them, flags readmissions, and writes the outputs.
pub fn transform_stage(store: &mut Store, config: &PipelineConfig) -> Result<TransformOutcome> {
    let span = info_span!("transform_stage", store = %config.store_location.display());
    span.in_scope(|| -> Result<TransformOutcome> {
        let start = Instant::now();
        let raw = read_raw_tables(store, &config.source_table_names)
            .context("read raw tables")?;

        let clean = clean_and_flag(&raw, &config.readmission).context("clean raw tables")?;
        log_readmissions(&clean);

        let names = config.output_names();
        let materialized = materialize(store, &names, &clean).context("write outputs")?;
        info!(
            readmissions = clean.stats.readmissions,
            candidates = clean.stats.readmission_candidates,
            duration_ms = start.elapsed().as_millis(),
            "transform stage complete"
        );
        Ok(TransformOutcome {
            stats: clean.stats,
            materialized,
        })
    })
}

fn log_readmissions(clean: &CleanTables) {
    for encounter in clean.encounters.iter().filter(|e| e.was_readmit) {
        trace!(
            patient_id = redact_value(&encounter.patient_id),
            encounter_id = redact_value(&encounter.encounter_id),
            start_date = %encounter.start_date,
            "readmission flagged"
        );
    }
}

/// Runs the load and/or transform stages against one store.
pub fn run_pipeline(config: &PipelineConfig, load: bool, transform: bool) -> Result<RunResult> {
    let mut store = open_store(config)?;
    let mut result = RunResult {
        store_location: config.store_location.clone(),
        ..RunResult::default()
    };
    if load {
        result.load = Some(load_stage(&mut store, config)?);
    }
    if transform {
        result.transform = Some(transform_stage(&mut store, config)?);
    }
    Ok(result)
}

/// Rows of both reporting views.
///
/// Opens the store read-only, so a wrong `--db` path leaves nothing behind.
pub fn read_views(config: &PipelineConfig) -> Result<(Vec<ReadmitMonth>, Vec<TopCondition>)> {
    let store = Store::open_read_only(&config.store_location)
        .with_context(|| format!("open store {}", config.store_location.display()))?;
    let names = config.output_names();
    let months = read_readmit_month(&store, &names)
        .with_context(|| format!("read view {}", names.readmit_month_view))?;
    let top = read_top_conditions(&store, &names)
        .with_context(|| format!("read view {}", names.top_conditions_view))?;
    Ok((months, top))
}
