//! Snapshot file for memdb
//!
//! A snapshot records each table's schema and row count as JSON. Row
//! contents are not saved, so a restored database has the right tables but
//! they are empty.

use crate::catalog::TableSchema;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One table in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub schema: TableSchema,
    pub row_count: usize,
}

/// Serializable summary of a database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Tables in creation order
    pub tables: Vec<TableSnapshot>,
}

impl Snapshot {
    /// Save snapshot to disk
    pub fn save_to_disk(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        tracing::debug!(path = %path.as_ref().display(), tables = self.tables.len(), "saved snapshot");
        Ok(())
    }

    /// Load snapshot from disk. A missing file yields `None`.
    pub fn load_from_disk(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let json = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&json)?;
        tracing::debug!(path = %path.display(), tables = snapshot.tables.len(), "loaded snapshot");
        Ok(Some(snapshot))
    }
}
