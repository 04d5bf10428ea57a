//! Per-stage counts collected during a transform run.

use serde::{Deserialize, Serialize};

/// Row accounting for one entity through the cleaning stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningStats {
    /// Rows read from the raw table.
    pub rows_in: usize,
    /// Rows dropped because a required key was absent or unparseable.
    pub missing_key: usize,
    /// Rows dropped as duplicates.
    pub duplicates: usize,
    /// Optional fields that failed coercion and were set to null.
    pub coerced_to_null: usize,
    /// Rows dropped because their patient is unknown.
    pub orphans: usize,
}

impl CleaningStats {
    /// Rows that survived every filter.
    pub fn rows_out(&self) -> usize {
        self.rows_in
            .saturating_sub(self.missing_key)
            .saturating_sub(self.duplicates)
            .saturating_sub(self.orphans)
    }
}

/// Statistics for a complete transform run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformStats {
    pub patients: CleaningStats,
    pub encounters: CleaningStats,
    pub conditions: CleaningStats,
    /// Encounters of the readmission type that were considered.
    pub readmission_candidates: usize,
    /// Encounters flagged `was_readmit`.
    pub readmissions: usize,
}
