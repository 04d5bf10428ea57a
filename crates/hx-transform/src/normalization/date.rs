//! Date parsing for raw date cells.
//!
//! Only the calendar date is kept; any time of day is discarded.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Years the store's date functions understand.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

const DATE_FORMATS: [&str; 3] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y", // US: 01/15/2024
];

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a date from the accepted formats.
///
/// Returns `None` for blank or unrecognized values, for impossible dates
/// such as `2024-02-30`, and for years outside `1..=9999` (including signed
/// years like `-2024-01-15`).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_any(value.trim()).filter(|date| YEAR_RANGE.contains(&date.year()))
}

fn parse_any(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }

    if let Some(date) = parse_compact(value) {
        return Some(date);
    }

    for fmt in &DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }

    for fmt in &DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    None
}

/// `YYYYMMDD`.
fn parse_compact(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse().ok()?;
    let month = value[4..6].parse().ok()?;
    let day = value[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format a date as ISO 8601 `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
