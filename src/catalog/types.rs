//! Data types for memdb
//!
//! This module defines the SQL data types supported by the database.

use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL Data Types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// 64-bit signed integer
    Int,
    /// Variable-length character string with max length
    Varchar(usize),
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Int => write!(f, "INT"),
            DataType::Varchar(n) => write!(f, "VARCHAR({})", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_display() {
        assert_eq!(DataType::Int.to_string(), "INT");
        assert_eq!(DataType::Varchar(10).to_string(), "VARCHAR(10)");
    }

    #[test]
    fn test_type_equality() {
        assert_eq!(DataType::Varchar(5), DataType::Varchar(5));
        assert_ne!(DataType::Varchar(5), DataType::Varchar(6));
        assert_ne!(DataType::Int, DataType::Varchar(5));
    }
}
