//! memdb - A minimal in-memory SQL engine written in Rust
//!
//! This library provides:
//! - SQL parsing (lexer, parser, AST)
//! - Typed, schema-validated tables over a pluggable row store
//! - A database registry that executes CREATE TABLE, INSERT, SELECT and UPDATE
//! - A JSON snapshot of schemas and row counts

pub mod catalog;
pub mod config;
pub mod error;
pub mod executor;
pub mod sql;
pub mod storage;

pub use error::{Error, Result};
pub use executor::{Database, QueryResult};
