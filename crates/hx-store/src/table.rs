//! All-text table representation.

/// A table whose every cell is nullable text.
///
/// This is the shape raw extracts take on their way into the store and the
/// shape the raw reader hands back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl TextTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Values of one column, in row order.
    pub fn column_values(&self, idx: usize) -> Vec<Option<String>> {
        self.rows
            .iter()
            .map(|row| row.get(idx).cloned().flatten())
            .collect()
    }
}
