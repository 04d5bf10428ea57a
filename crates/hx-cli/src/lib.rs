//! Library surface of the `hx` command-line tool.
//!
//! The binary owns argument parsing and terminal output; the stage runners,
//! configuration loading, and logging setup live here so integration tests
//! can drive them directly.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
