//! Row and Value types for memdb
//!
//! This module defines how data values are represented in memory and how
//! literal text from a statement is converted to and compared with them.

use crate::catalog::{ColumnDefinition, DataType};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A value in the database
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Integer value (64-bit)
    Int(i64),
    /// String value
    Text(String),
}

impl Value {
    /// Convert literal text to the column's declared type
    ///
    /// INT requires a base-10 integer. VARCHAR(n) accepts text of at most `n`
    /// characters and stores it unchanged.
    pub fn coerce(column: &ColumnDefinition, text: &str) -> Result<Value> {
        match column.data_type {
            DataType::Int => text
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| Error::InvalidInteger {
                    column: column.name.clone(),
                    value: text.to_string(),
                }),
            DataType::Varchar(max) => {
                if text.chars().count() > max {
                    return Err(Error::ValueTooLong {
                        column: column.name.clone(),
                        max,
                        value: text.to_string(),
                    });
                }
                Ok(Value::Text(text.to_string()))
            }
        }
    }

    /// Compare this stored value against literal text from a WHERE clause
    ///
    /// Integers compare numerically and require the literal to be an integer;
    /// strings compare lexically on the raw text.
    pub fn compare_literal(&self, column: &str, literal: &str) -> Result<Ordering> {
        match self {
            Value::Int(v) => {
                let rhs = literal
                    .parse::<i64>()
                    .map_err(|_| Error::NonNumericComparison {
                        column: column.to_string(),
                        value: literal.to_string(),
                    })?;
                Ok(v.cmp(&rhs))
            }
            Value::Text(s) => Ok(s.as_str().cmp(literal)),
        }
    }

    /// Try to convert to i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Text(_) => None,
        }
    }

    /// Try to convert to string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Int(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// A row in a table, positionally aligned with the schema's columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Values in this row
    values: Vec<Value>,
}

impl Row {
    /// Create a new row from values
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Get a value by index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Set a value by index
    pub fn set(&mut self, index: usize, value: Value) {
        if index < self.values.len() {
            self.values[index] = value;
        }
    }

    /// Get all values
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Project specific columns
    pub fn project(&self, indices: &[usize]) -> Row {
        let values = indices
            .iter()
            .filter_map(|&i| self.values.get(i).cloned())
            .collect();
        Row::new(values)
    }
}

impl FromIterator<Value> for Row {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Row::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
