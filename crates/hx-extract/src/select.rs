//! Choosing which `datavaluetype` to extract.

use std::collections::HashMap;

use serde_json::Value;

use crate::source::CdiRecord;

const TYPE_COLUMN: &str = "datavaluetype";

/// Distinct `datavaluetype` values with their row counts, most frequent first.
///
/// Values are trimmed; nulls and blanks are skipped. Equal counts are ordered
/// by value so the result is deterministic.
pub fn data_value_type_counts(records: &[CdiRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        let value = match record.get(TYPE_COLUMN) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Null) | None => continue,
            Some(other) => other.to_string(),
        };
        if !value.is_empty() {
            *counts.entry(value).or_default() += 1;
        }
    }
    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Picks the most frequent type mentioning "crude", else the most frequent type.
pub fn choose_data_value_type(records: &[CdiRecord]) -> Option<String> {
    let counts = data_value_type_counts(records);
    let crude = counts
        .iter()
        .find(|(value, _)| value.to_lowercase().contains("crude"));
    crude.or_else(|| counts.first()).map(|(value, _)| value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(types: &[Value]) -> Vec<CdiRecord> {
        types
            .iter()
            .map(|t| {
                let mut record = CdiRecord::new();
                record.insert(TYPE_COLUMN.to_string(), t.clone());
                record
            })
            .collect()
    }

    #[test]
    fn test_prefers_crude() {
        let recs = records(&[
            json!("Age-adjusted Prevalence"),
            json!("Age-adjusted Prevalence"),
            json!("Crude Prevalence "),
            json!("Number"),
        ]);
        assert_eq!(
            choose_data_value_type(&recs),
            Some("Crude Prevalence".to_string())
        );
    }

    #[test]
    fn test_falls_back_to_most_common() {
        let recs = records(&[json!("Number"), json!("Mean"), json!("Number"), json!(null)]);
        assert_eq!(choose_data_value_type(&recs), Some("Number".to_string()));
    }

    #[test]
    fn test_counts_tie_break_by_name() {
        let recs = records(&[json!("b"), json!("a"), json!("  ")]);
        assert_eq!(
            data_value_type_counts(&recs),
            vec![("a".to_string(), 1), ("b".to_string(), 1)]
        );
    }

    #[test]
    fn test_no_types() {
        assert_eq!(choose_data_value_type(&[]), None);
    }
}
