//! Schema definitions for memdb
//!
//! This module defines table schemas and column metadata. Columns are
//! addressed by position; names are only a case-insensitive lookup key.

use super::types::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column definition in a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,
    /// Data type
    pub data_type: DataType,
}

impl ColumnDefinition {
    /// Create a new column definition
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Table schema - the table name and its ordered columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name as written in CREATE TABLE
    table_name: String,
    /// Ordered list of columns, fixed at creation
    columns: Vec<ColumnDefinition>,
}

impl TableSchema {
    /// Create a schema from a list of columns
    pub fn new(table_name: impl Into<String>, columns: Vec<ColumnDefinition>) -> Self {
        Self {
            table_name: table_name.into(),
            columns,
        }
    }

    /// Get the table name
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Get all columns
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Get number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get column index by name. Case-insensitive; the first match wins.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.columns
            .iter()
            .position(|c| c.name.to_lowercase() == name)
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

impl fmt::Display for TableSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.data_type))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} ({})", self.table_name, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> TableSchema {
        TableSchema::new(
            "Users",
            vec![
                ColumnDefinition::new("id", DataType::Int),
                ColumnDefinition::new("Name", DataType::Varchar(100)),
                ColumnDefinition::new("name", DataType::Varchar(5)),
            ],
        )
    }

    #[test]
    fn test_schema_creation() {
        let schema = users();

        assert_eq!(schema.table_name(), "Users");
        assert_eq!(schema.column_count(), 3);
        assert_eq!(schema.column_names(), vec!["id", "Name", "name"]);
    }

    #[test]
    fn test_column_lookup_is_case_insensitive_first_match() {
        let schema = users();

        assert_eq!(schema.column_index("ID"), Some(0));
        assert_eq!(schema.column_index("name"), Some(1));
        assert_eq!(schema.column_index("NAME"), Some(1));
        assert_eq!(schema.column_index("email"), None);
    }

    #[test]
    fn test_column_lookup_folds_non_ascii_case() {
        let schema = TableSchema::new(
            "t",
            vec![
                ColumnDefinition::new("xÉ", DataType::Int),
                ColumnDefinition::new("Straße", DataType::Varchar(5)),
            ],
        );

        assert_eq!(schema.column_index("Xé"), Some(0));
        assert_eq!(schema.column_index("XÉ"), Some(0));
        assert_eq!(schema.column_index("STRASSE"), None);
        assert_eq!(schema.column_index("straße"), Some(1));
    }

    #[test]
    fn test_schema_display() {
        let schema = TableSchema::new(
            "t",
            vec![
                ColumnDefinition::new("a", DataType::Int),
                ColumnDefinition::new("b", DataType::Varchar(10)),
            ],
        );
        assert_eq!(schema.to_string(), "t (a INT, b VARCHAR(10))");
    }
}
