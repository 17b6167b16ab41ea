//! SQL Abstract Syntax Tree (AST)
//!
//! This module defines the AST nodes for SQL statements. Literal values are
//! kept as raw text; the table converts them against its schema.

use crate::catalog::ColumnDefinition;
use std::fmt;

/// A SQL statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// CREATE TABLE statement
    CreateTable(CreateTableStatement),
    /// INSERT statement
    Insert(InsertStatement),
    /// UPDATE statement
    Update(UpdateStatement),
    /// SELECT statement
    Select(SelectStatement),
}

impl Statement {
    /// Whether executing this statement can change the database
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Statement::Select(_))
    }
}

/// CREATE TABLE statement
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    /// Table name
    pub table_name: String,
    /// Column definitions
    pub columns: Vec<ColumnDefinition>,
}

/// INSERT statement
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// Target table name
    pub table_name: String,
    /// Literal text of each value, in column order
    pub values: Vec<String>,
}

/// SELECT statement
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    /// Select list
    pub columns: Projection,
    /// FROM table
    pub table_name: String,
    /// WHERE clause
    pub where_clause: Option<WhereClause>,
}

/// The select list
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// All columns (*)
    Wildcard,
    /// Named columns, in the order written
    Columns(Vec<String>),
}

/// UPDATE statement
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    /// Target table name
    pub table_name: String,
    /// SET clause (column = value pairs)
    pub assignments: Vec<Assignment>,
    /// WHERE clause
    pub where_clause: Option<WhereClause>,
}

/// Column assignment (for UPDATE)
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Column name
    pub column: String,
    /// Literal text of the new value
    pub value: String,
}

/// WHERE clause
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub condition: Condition,
}

/// A row predicate. Only single comparisons exist; there are no AND/OR connectives.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `column operator literal`
    Comparison {
        left: String,
        op: ComparisonOperator,
        right: String,
    },
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl ComparisonOperator {
    /// Apply the operator to the outcome of comparing the left side with the right side
    pub fn matches(&self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::*;
        match self {
            ComparisonOperator::Eq => ordering == Equal,
            ComparisonOperator::Neq => ordering != Equal,
            ComparisonOperator::Gt => ordering == Greater,
            ComparisonOperator::Lt => ordering == Less,
            ComparisonOperator::Gte => ordering != Less,
            ComparisonOperator::Lte => ordering != Greater,
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOperator::Eq => write!(f, "="),
            ComparisonOperator::Neq => write!(f, "<>"),
            ComparisonOperator::Gt => write!(f, ">"),
            ComparisonOperator::Lt => write!(f, "<"),
            ComparisonOperator::Gte => write!(f, ">="),
            ComparisonOperator::Lte => write!(f, "<="),
        }
    }
}
