//! Storage module
//!
//! This module contains the storage components:
//! - Rows and values
//! - The storage engine abstraction and its in-memory implementation
//! - Tables (schema + storage)
//! - Snapshot files

pub mod engine;
pub mod row;
pub mod snapshot;
pub mod table;

pub use engine::{AllRows, Identity, InMemoryStorageEngine, RowFilter, RowUpdater, StorageEngine};
pub use row::{Row, Value};
pub use snapshot::{Snapshot, TableSnapshot};
pub use table::Table;
