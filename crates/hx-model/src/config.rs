//! Pipeline configuration.
//!
//! A [`PipelineConfig`] is passed explicitly into every stage entry point; no
//! stage reads process-wide state. All fields have defaults so a partial TOML
//! file only needs the keys it overrides:
//!
//! ```toml
//! store_location = "data/health.db"
//! output_table_prefix = "demo_"
//!
//! [source_table_names]
//! encounters = "encounters_2024"
//!
//! [readmission]
//! window_days = 30
//! ```

use std::path::PathBuf;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::raw::Entity;

/// Default SQLite database path.
pub const DEFAULT_STORE_LOCATION: &str = "data/health.db";

/// Default directory holding the raw CSV extracts.
pub const DEFAULT_RAW_DATA_DIR: &str = "data_raw";

/// Configuration for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Path of the SQLite store.
    pub store_location: PathBuf,
    /// Directory containing `patients.csv`, `encounters.csv`, `conditions.csv`.
    pub raw_data_dir: PathBuf,
    /// Names of the raw tables in the store.
    pub source_table_names: SourceTableNames,
    /// Prepended to every derived table, index, and view name.
    pub output_table_prefix: String,
    pub readmission: ReadmissionRule,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            store_location: PathBuf::from(DEFAULT_STORE_LOCATION),
            raw_data_dir: PathBuf::from(DEFAULT_RAW_DATA_DIR),
            source_table_names: SourceTableNames::default(),
            output_table_prefix: String::new(),
            readmission: ReadmissionRule::default(),
        }
    }
}

impl PipelineConfig {
    /// Names of every object the materializer writes.
    pub fn output_names(&self) -> OutputNames {
        OutputNames::with_prefix(&self.output_table_prefix)
    }
}

/// Raw table names, one per entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceTableNames {
    pub patients: String,
    pub encounters: String,
    pub conditions: String,
}

impl Default for SourceTableNames {
    fn default() -> Self {
        Self {
            patients: Entity::Patients.as_str().to_string(),
            encounters: Entity::Encounters.as_str().to_string(),
            conditions: Entity::Conditions.as_str().to_string(),
        }
    }
}

impl SourceTableNames {
    /// Raw table name for an entity.
    pub fn get(&self, entity: Entity) -> &str {
        match entity {
            Entity::Patients => &self.patients,
            Entity::Encounters => &self.encounters,
            Entity::Conditions => &self.conditions,
        }
    }
}

/// Names of the derived tables, indexes, and views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    pub patients: String,
    pub encounters: String,
    pub conditions: String,
    pub patients_index: String,
    pub encounters_index: String,
    pub conditions_index: String,
    pub readmit_month_view: String,
    pub top_conditions_view: String,
}

impl OutputNames {
    /// Builds `<prefix><entity>_clean` tables, `<prefix>ix_*` indexes, and
    /// `<prefix>vw_*` views.
    pub fn with_prefix(prefix: &str) -> Self {
        let table = |entity: Entity| format!("{prefix}{}_clean", entity.as_str());
        Self {
            patients: table(Entity::Patients),
            encounters: table(Entity::Encounters),
            conditions: table(Entity::Conditions),
            patients_index: format!("{prefix}ix_patients_clean_pid"),
            encounters_index: format!("{prefix}ix_enc_clean_pid_date"),
            conditions_index: format!("{prefix}ix_conds_clean_pid"),
            readmit_month_view: format!("{prefix}vw_readmit_month"),
            top_conditions_view: format!("{prefix}vw_top_conditions"),
        }
    }

    /// Clean table name for an entity.
    pub fn table(&self, entity: Entity) -> &str {
        match entity {
            Entity::Patients => &self.patients,
            Entity::Encounters => &self.encounters,
            Entity::Conditions => &self.conditions,
        }
    }
}

impl Default for OutputNames {
    fn default() -> Self {
        Self::with_prefix("")
    }
}

/// The 30-day readmission business rule.
///
/// An encounter of `encounter_type` is a readmission when another encounter of
/// the same type and patient starts strictly after it and no later than
/// `window_days` days after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadmissionRule {
    pub window_days: u32,
    /// Compared against the lower-cased encounter type.
    pub encounter_type: String,
}

impl Default for ReadmissionRule {
    fn default() -> Self {
        Self {
            window_days: 30,
            encounter_type: "inpatient".to_string(),
        }
    }
}

impl ReadmissionRule {
    /// Last day (inclusive) of the window opened by `start`.
    ///
    /// Returns `None` only when the window runs past the representable range.
    pub fn window_end(&self, start: NaiveDate) -> Option<NaiveDate> {
        start.checked_add_days(Days::new(u64::from(self.window_days)))
    }

    /// True when `later` falls inside the window opened by `start`.
    pub fn in_window(&self, start: NaiveDate, later: NaiveDate) -> bool {
        if later <= start {
            return false;
        }
        match self.window_end(start) {
            Some(end) => later <= end,
            None => true,
        }
    }
}
