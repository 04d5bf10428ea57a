//! Pipeline configuration loading.
//!
//! Settings come from an optional TOML file and are then overridden by CLI
//! flags. A missing `--config` means built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hx_model::PipelineConfig;

/// CLI values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub store_location: Option<PathBuf>,
    pub raw_data_dir: Option<PathBuf>,
    pub output_table_prefix: Option<String>,
    pub window_days: Option<u32>,
}

/// Parses a pipeline configuration from TOML text.
pub fn parse_config(text: &str) -> Result<PipelineConfig> {
    toml::from_str(text).context("invalid pipeline configuration")
}

/// Reads the config file at `path`, or returns defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("parse config {}", path.display()))
}

/// Applies CLI overrides on top of a loaded configuration.
pub fn apply_overrides(mut config: PipelineConfig, overrides: &ConfigOverrides) -> PipelineConfig {
    if let Some(path) = &overrides.store_location {
        config.store_location = path.clone();
    }
    if let Some(dir) = &overrides.raw_data_dir {
        config.raw_data_dir = dir.clone();
    }
    if let Some(prefix) = &overrides.output_table_prefix {
        config.output_table_prefix = prefix.clone();
    }
    if let Some(days) = overrides.window_days {
        config.readmission.window_days = days;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
            output_table_prefix = "demo_"

            [source_table_names]
            encounters = "encounters_2024"

            [readmission]
            window_days = 14
            "#,
        )
        .unwrap();

        assert_eq!(config.output_table_prefix, "demo_");
        assert_eq!(config.source_table_names.encounters, "encounters_2024");
        assert_eq!(config.source_table_names.patients, "patients");
        assert_eq!(config.readmission.window_days, 14);
        assert_eq!(config.readmission.encounter_type, "inpatient");
        assert_eq!(config.store_location, PathBuf::from("data/health.db"));
    }

    #[test]
    fn test_unknown_keys_are_ignored_and_types_checked() {
        assert!(parse_config("extra = 1").is_ok());
        assert!(parse_config("[readmission]\nwindow_days = \"thirty\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store_location = \"tmp/x.db\"").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.store_location, PathBuf::from("tmp/x.db"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_config(Some(Path::new("does/not/exist.toml"))).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }

    #[test]
    fn test_overrides_win() {
        let config = apply_overrides(
            PipelineConfig::default(),
            &ConfigOverrides {
                store_location: Some(PathBuf::from("other.db")),
                window_days: Some(7),
                ..ConfigOverrides::default()
            },
        );
        assert_eq!(config.store_location, PathBuf::from("other.db"));
        assert_eq!(config.readmission.window_days, 7);
        assert_eq!(config.raw_data_dir, PathBuf::from("data_raw"));
        assert_eq!(config.output_table_prefix, "");
    }
}
