//! Error types for memdb
//!
//! Two families of failure reach the caller: syntax errors raised while
//! parsing, and semantic errors raised by the database and table layer.
//! Snapshot I/O errors live here too but never come out of the SQL core.

use thiserror::Error;

/// The main error type for memdb
#[derive(Error, Debug)]
pub enum Error {
    // ========== Syntax Errors ==========
    #[error("Syntax error: {expected}. Got: {found}")]
    Syntax { expected: String, found: String },

    #[error("Syntax error: unknown statement. Got: {0}")]
    UnknownStatement(String),

    #[error("Syntax error: unknown data type. Got: {0}")]
    UnknownDataType(String),

    #[error("Syntax error: VARCHAR length must be a positive integer. Got: {0}")]
    InvalidLength(String),

    // ========== Catalog Errors ==========
    #[error("Catalog error: table '{0}' already exists")]
    TableAlreadyExists(String),

    #[error("Catalog error: table '{0}' does not exist")]
    TableNotFound(String),

    #[error("Catalog error: column '{0}' not found in table '{1}'")]
    ColumnNotFound(String, String),

    // ========== Type Errors ==========
    #[error("Type error: expected {expected} values, got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("Type error: column '{column}' is VARCHAR({max}) but value '{value}' is too long")]
    ValueTooLong {
        column: String,
        max: usize,
        value: String,
    },

    #[error("Type error: column '{column}' is INT but value '{value}' is not an integer")]
    InvalidInteger { column: String, value: String },

    #[error("Type error: cannot compare INT column '{column}' with non-numeric value '{value}'")]
    NonNumericComparison { column: String, value: String },

    // ========== Snapshot Errors ==========
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error was raised by the parser rather than by execution
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Error::Syntax { .. }
                | Error::UnknownStatement(_)
                | Error::UnknownDataType(_)
                | Error::InvalidLength(_)
        )
    }
}

/// Result type alias for memdb operations
pub type Result<T> = std::result::Result<T, Error>;
