//! Data model types for the health readmission pipeline.
//!
//! This crate provides the types shared by every pipeline stage:
//! - **Records**: typed `Patient`, `Encounter` and `Condition` rows produced by cleaning
//! - **Raw tables**: the all-text frames pulled from the relational store
//! - **Configuration**: store location, table names, and the readmission rule
//! - **Reports**: per-stage counts surfaced in the run summary
//!
//! # Module Organization
//!
//! - [`records`]: Cleaned entity records
//! - [`raw`]: Raw (untyped) tables and entity names
//! - [`config`]: Pipeline configuration
//! - [`report`]: Cleaning and transform statistics

pub mod config;
pub mod raw;
pub mod records;
pub mod report;

pub use config::{OutputNames, PipelineConfig, ReadmissionRule, SourceTableNames};
pub use raw::{Entity, RawTables};
pub use records::{CleanTables, Condition, Encounter, HasPatient, Patient};
pub use report::{CleaningStats, TransformStats};
