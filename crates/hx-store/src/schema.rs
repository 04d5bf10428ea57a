//! Column declarations and identifier quoting.

use std::fmt;

/// Declared SQLite column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Integer,
    Real,
    /// Stored as integer 0/1, SQLite's native boolean representation.
    Boolean,
}

impl SqlType {
    pub fn as_sql(self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Boolean => "BOOLEAN",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A named, typed column of a table being created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
}

impl ColumnDef {
    pub const fn new(name: &'static str, sql_type: SqlType) -> Self {
        Self { name, sql_type }
    }
}

/// Quotes an identifier for use in SQL text.
///
/// Embedded double quotes are doubled, so any table or column name is safe.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Renders `"a" TEXT, "b" INTEGER` for a CREATE TABLE statement.
pub(crate) fn column_list<'a, I>(columns: I) -> String
where
    I: IntoIterator<Item = (&'a str, SqlType)>,
{
    columns
        .into_iter()
        .map(|(name, sql_type)| format!("{} {}", quote_ident(name), sql_type))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("patients"), "\"patients\"");
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn test_column_list() {
        let rendered = column_list([
            ("patient_id", SqlType::Text),
            ("was_readmit", SqlType::Boolean),
        ]);
        assert_eq!(rendered, "\"patient_id\" TEXT, \"was_readmit\" BOOLEAN");
    }
}
