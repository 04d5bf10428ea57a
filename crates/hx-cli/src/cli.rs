//! CLI argument definitions for the `hx` pipeline.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "hx",
    version,
    about = "Health readmission pipeline - load, clean, and flag 30-day readmissions",
    long_about = "Load raw patient, encounter, and condition extracts into a SQLite store,\n\
                  clean them, flag 30-day inpatient readmissions, and publish clean tables\n\
                  plus reporting views."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// SQLite store path (overrides the config file).
    #[arg(long = "db", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Pipeline configuration file (TOML).
    #[arg(long = "config", value_name = "TOML", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient identifiers in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch a chronic disease indicator slice into a CSV file.
    Extract(ExtractArgs),

    /// Load raw CSV extracts into the store.
    Load(LoadArgs),

    /// Clean raw tables, flag readmissions, and write outputs.
    Transform(TransformArgs),

    /// Load, then transform.
    Run(RunArgs),

    /// Print the reporting views.
    Report,
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Output CSV path.
    #[arg(long = "out", value_name = "PATH", default_value = "data_raw/cdi.csv")]
    pub out: PathBuf,

    /// Two-letter state abbreviation.
    #[arg(long = "state", default_value = "MD")]
    pub state: String,

    /// Earliest start year to include.
    #[arg(long = "since", default_value_t = 2020)]
    pub since: i32,
}

#[derive(Args, Default)]
pub struct LoadArgs {
    /// Directory containing patients.csv, encounters.csv, and conditions.csv.
    #[arg(long = "raw-dir", value_name = "DIR")]
    pub raw_dir: Option<PathBuf>,
}

#[derive(Args, Default)]
pub struct TransformArgs {
    /// Prefix for output table, index, and view names.
    #[arg(long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Readmission window in days.
    #[arg(long = "window-days", value_name = "DAYS")]
    pub window_days: Option<u32>,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    #[command(flatten)]
    pub transform: TransformArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
