//! CDI extraction flow: probe, fall back, choose a value type, write CSV.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::Result;
use crate::query::{FINAL_COLUMNS, FINAL_ORDER, SocrataQuery, since_and_type_filter, since_filter};
use crate::select::{choose_data_value_type, data_value_type_counts};
use crate::source::{CdiRecord, CdiSource};
use crate::writer::write_records_csv;

/// Years subtracted from `since` when the first probe comes back empty.
pub const FALLBACK_YEARS: i32 = 2;

/// Rows written when both probes are empty.
pub const UNFILTERED_LIMIT: u32 = 1000;

/// Parameters of one extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Two-letter state abbreviation (`locationabbr`).
    pub state: String,
    /// Earliest `yearstart` to include.
    pub since: i32,
    /// Output CSV path.
    pub out: PathBuf,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            state: "MD".to_string(),
            since: 2020,
            out: PathBuf::from("data_raw/cdi.csv"),
        }
    }
}

/// How the written rows were selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// Rows filtered by year and, when one was found, by value type.
    Filtered {
        since: i32,
        data_value_type: Option<String>,
    },
    /// Both probes were empty; a sample of unfiltered rows was written.
    Unfiltered,
}

/// Summary of a completed extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    pub rows: usize,
    pub outcome: ExtractOutcome,
    pub path: PathBuf,
}

fn probe(source: &dyn CdiSource, state: &str, since: i32) -> Result<Vec<CdiRecord>> {
    source.fetch(&SocrataQuery::new(state).with_filter(since_filter(since)))
}

/// Runs the extract against `source` and writes the chosen rows to `options.out`.
pub fn extract_cdi(source: &dyn CdiSource, options: &ExtractOptions) -> Result<ExtractReport> {
    let state = options.state.trim().to_uppercase();
    let mut since = options.since;
    let mut recent = probe(source, &state, since)?;

    if recent.is_empty() {
        let fallback = since - FALLBACK_YEARS;
        warn!(state = %state, since, fallback, "no rows for start year, widening window");
        since = fallback;
        recent = probe(source, &state, since)?;
    }

    if recent.is_empty() {
        warn!(state = %state, limit = UNFILTERED_LIMIT, "still no rows, writing unfiltered sample");
        let sample = source.fetch(&SocrataQuery::new(&state).with_limit(UNFILTERED_LIMIT))?;
        let rows = write_records_csv(&options.out, &sample)?;
        return Ok(ExtractReport {
            rows,
            outcome: ExtractOutcome::Unfiltered,
            path: options.out.clone(),
        });
    }

    for (value, count) in data_value_type_counts(&recent) {
        info!(datavaluetype = %value, count, "found datavaluetype");
    }
    let chosen = choose_data_value_type(&recent);
    let filter = match &chosen {
        Some(value) => {
            info!(datavaluetype = %value, "using datavaluetype");
            since_and_type_filter(since, value)
        }
        None => {
            warn!("no datavaluetype values found, keeping all types");
            since_filter(since)
        }
    };

    let query = SocrataQuery::new(&state)
        .with_filter(filter)
        .with_select(FINAL_COLUMNS)
        .with_order(FINAL_ORDER);
    let rows = write_records_csv(&options.out, &source.fetch(&query)?)?;
    info!(rows, path = %options.out.display(), "final filtered rows written");

    Ok(ExtractReport {
        rows,
        outcome: ExtractOutcome::Filtered {
            since,
            data_value_type: chosen,
        },
        path: options.out.clone(),
    })
}
