//! Raw tables as read from the relational store.

use std::fmt;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// The three source entities the pipeline ingests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Patients,
    Encounters,
    Conditions,
}

impl Entity {
    /// All entities in load order (patients first).
    pub const ALL: [Entity; 3] = [Entity::Patients, Entity::Encounters, Entity::Conditions];

    /// Canonical lower-case name, also the default raw table and CSV file stem.
    pub fn as_str(self) -> &'static str {
        match self {
            Entity::Patients => "patients",
            Entity::Encounters => "encounters",
            Entity::Conditions => "conditions",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw input frames, one per entity.
///
/// Every column is text (nullable) and column names are lower-cased by the
/// reader, so lookups downstream can use the canonical names directly.
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub patients: DataFrame,
    pub encounters: DataFrame,
    pub conditions: DataFrame,
}

impl RawTables {
    /// Returns the frame for an entity.
    pub fn get(&self, entity: Entity) -> &DataFrame {
        match entity {
            Entity::Patients => &self.patients,
            Entity::Encounters => &self.encounters,
            Entity::Conditions => &self.conditions,
        }
    }

    /// Row counts in entity order, used for logging.
    pub fn row_counts(&self) -> [(Entity, usize); 3] {
        Entity::ALL.map(|entity| (entity, self.get(entity).height()))
    }
}
