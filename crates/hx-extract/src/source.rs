//! Source abstraction for CDI rows.

use serde_json::{Map, Value};

use crate::error::Result;
use crate::query::SocrataQuery;

/// One CDI row as returned by the API: column name to JSON value.
pub type CdiRecord = Map<String, Value>;

/// Anything that can answer a [`SocrataQuery`].
///
/// Implemented by [`CdiClient`](crate::CdiClient) over HTTP; tests use an
/// in-memory source.
pub trait CdiSource {
    fn fetch(&self, query: &SocrataQuery) -> Result<Vec<CdiRecord>>;
}
