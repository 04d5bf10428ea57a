use hx_ingest::LoadReport;
use hx_model::TransformStats;
use hx_output::MaterializeReport;

/// Outcome of the transform stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutcome {
    pub stats: TransformStats,
    pub materialized: MaterializeReport,
}

/// Result of a `load`, `transform` or `run` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    pub store_location: std::path::PathBuf,
    pub load: Option<LoadReport>,
    pub transform: Option<TransformOutcome>,
}
