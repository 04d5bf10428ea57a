use anyhow::{Context, Result};
use hx_cli::config::{ConfigOverrides, apply_overrides, load_config};
use hx_extract::{CdiClient, ExtractOptions, ExtractReport, extract_cdi};
use hx_model::PipelineConfig;
use tracing::info_span;

use crate::cli::{Cli, ExtractArgs, LoadArgs, TransformArgs};

/// Builds the effective configuration: file (or defaults), then CLI flags.
pub fn resolve_config(
    cli: &Cli,
    load: Option<&LoadArgs>,
    transform: Option<&TransformArgs>,
) -> Result<PipelineConfig> {
    let config = load_config(cli.config.as_deref())?;
    let overrides = ConfigOverrides {
        store_location: cli.db.clone(),
        raw_data_dir: load.and_then(|args| args.raw_dir.clone()),
        output_table_prefix: transform.and_then(|args| args.prefix.clone()),
        window_days: transform.and_then(|args| args.window_days),
    };
    Ok(apply_overrides(config, &overrides))
}

pub fn run_extract(args: &ExtractArgs) -> Result<ExtractReport> {
    let span = info_span!("extract", state = %args.state, since = args.since);
    let _guard = span.enter();
    let client = CdiClient::from_env().context("build CDI client")?;
    let options = ExtractOptions {
        state: args.state.clone(),
        since: args.since,
        out: args.out.clone(),
    };
    extract_cdi(&client, &options).context("extract CDI data")
}
