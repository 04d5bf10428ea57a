//! Text cleanup.

/// Trims a value; blank values become `None`.
pub fn clean_text(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trims and lower-cases a value; blank values become `None`.
pub fn clean_lower(value: Option<&str>) -> Option<String> {
    clean_text(value).map(|v| v.to_lowercase())
}
