//! Numeric coercion.

/// Parse a string value to `f64`.
///
/// Handles common numeric formats:
/// - Standard numbers: "123", "-45.67"
/// - Thousands separators: "1,980"
/// - Whitespace: "  123  "
/// - Scientific notation: "1.98e3"
///
/// Returns `None` if the value cannot be parsed or is not finite.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned = trimmed
        .replace(',', "")
        .replace(' ', "")
        .replace('\u{a0}', "");

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a year: any finite number with an integral value in `i32` range.
///
/// `"1980"` and `"1980.0"` both give `Some(1980)`; `"1980.5"` gives `None`.
pub fn parse_year(value: &str) -> Option<i32> {
    let number = parse_numeric(value)?;
    if number.fract() != 0.0 || number < f64::from(i32::MIN) || number > f64::from(i32::MAX) {
        return None;
    }
    Some(number as i32)
}
