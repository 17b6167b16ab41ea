//! Storage engine abstraction
//!
//! A storage engine is a row store with no knowledge of SQL. Callers select
//! rows with a [`RowFilter`] and rewrite them with a [`RowUpdater`]; the
//! table layer supplies implementations that understand the schema.

use super::row::Row;
use crate::error::Result;
use std::fmt;

/// Predicate over a single row
pub trait RowFilter {
    fn matches(&self, row: &Row) -> Result<bool>;
}

/// Filter that matches every row
#[derive(Debug, Clone, Copy, Default)]
pub struct AllRows;

impl RowFilter for AllRows {
    fn matches(&self, _row: &Row) -> Result<bool> {
        Ok(true)
    }
}

/// Transform producing the replacement for an existing row
pub trait RowUpdater {
    fn apply(&self, row: &Row) -> Result<Row>;
}

/// Updater that returns the row unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl RowUpdater for Identity {
    fn apply(&self, row: &Row) -> Result<Row> {
        Ok(row.clone())
    }
}

/// Physical row store behind a table
///
/// `update` and `delete` process rows one at a time in storage order. If the
/// filter or updater fails on a row, the error is returned and rows already
/// processed keep their new state.
pub trait StorageEngine: fmt::Debug {
    /// Append a row
    fn insert(&mut self, row: Row);

    /// Return copies of all rows accepted by `filter`, in storage order
    fn scan(&self, filter: &dyn RowFilter) -> Result<Vec<Row>>;

    /// Replace every row accepted by `filter` with `updater`'s output; returns the count replaced
    fn update(&mut self, filter: &dyn RowFilter, updater: &dyn RowUpdater) -> Result<usize>;

    /// Remove every row accepted by `filter`; returns the count removed
    fn delete(&mut self, filter: &dyn RowFilter) -> Result<usize>;

    /// Number of rows currently stored
    fn row_count(&self) -> usize;
}

/// Storage engine backed by an ordered in-memory list
#[derive(Debug, Default)]
pub struct InMemoryStorageEngine {
    rows: Vec<Row>,
}

impl InMemoryStorageEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageEngine for InMemoryStorageEngine {
    fn insert(&mut self, row: Row) {
        self.rows.push(row);
    }

    fn scan(&self, filter: &dyn RowFilter) -> Result<Vec<Row>> {
        let mut result = Vec::new();
        for row in &self.rows {
            if filter.matches(row)? {
                result.push(row.clone());
            }
        }
        Ok(result)
    }

    fn update(&mut self, filter: &dyn RowFilter, updater: &dyn RowUpdater) -> Result<usize> {
        let mut updated = 0;
        for row in self.rows.iter_mut() {
            if filter.matches(row)? {
                *row = updater.apply(row)?;
                updated += 1;
            }
        }
        Ok(updated)
    }

    fn delete(&mut self, filter: &dyn RowFilter) -> Result<usize> {
        let before = self.rows.len();
        let mut kept = Vec::with_capacity(before);
        let mut rows = std::mem::take(&mut self.rows).into_iter();

        while let Some(row) = rows.next() {
            match filter.matches(&row) {
                Ok(true) => {}
                Ok(false) => kept.push(row),
                Err(e) => {
                    // Keep the failing row and everything after it
                    kept.push(row);
                    kept.extend(rows);
                    self.rows = kept;
                    return Err(e);
                }
            }
        }

        self.rows = kept;
        Ok(before - self.rows.len())
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }
}
