//! Health readmission pipeline CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use hx_cli::logging::{LogConfig, LogFormat, init_logging};
use hx_cli::pipeline::{read_views, run_pipeline};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{resolve_config, run_extract};
use crate::summary::{print_extract_summary, print_report, print_run_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Extract(args) => run_extract(args).map(|report| print_extract_summary(&report)),
        Command::Load(args) => resolve_config(&cli, Some(args), None)
            .and_then(|config| run_pipeline(&config, true, false))
            .map(|result| print_run_summary(&result)),
        Command::Transform(args) => resolve_config(&cli, None, Some(args))
            .and_then(|config| run_pipeline(&config, false, true))
            .map(|result| print_run_summary(&result)),
        Command::Run(args) => resolve_config(&cli, Some(&args.load), Some(&args.transform))
            .and_then(|config| run_pipeline(&config, true, true))
            .map(|result| print_run_summary(&result)),
        Command::Report => resolve_config(&cli, None, None)
            .and_then(|config| read_views(&config))
            .map(|(months, top)| print_report(&months, &top)),
    };
    let exit_code = match outcome {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
