//! Statement execution module
//!
//! This module contains the database registry and result types.

pub mod database;
pub mod result;

pub use database::Database;
pub use result::QueryResult;
