//! Cell-level normalization functions.
//!
//! Every function here is total: a value that cannot be normalized yields
//! `None` rather than an error.

pub mod date;
pub mod numeric;
pub mod text;

pub use date::{format_date, parse_date};
pub use numeric::{parse_numeric, parse_year};
pub use text::{clean_lower, clean_text};
