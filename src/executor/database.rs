//! Database - the table registry and statement dispatcher
//!
//! Table names are unique ignoring case. The registry keeps tables in
//! creation order so listings and snapshots are stable.

use indexmap::IndexMap;

use super::result::QueryResult;
use crate::catalog::TableSchema;
use crate::error::{Error, Result};
use crate::sql::ast::*;
use crate::sql::Parser;
use crate::storage::{Snapshot, Table, TableSnapshot};

/// In-memory database: owns every table
#[derive(Debug, Default)]
pub struct Database {
    /// Tables keyed by lower-cased name
    tables: IndexMap<String, Table>,
}

impl Database {
    /// Create a new empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the tables recorded in a snapshot. Tables come back empty.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let mut db = Self::new();
        for entry in snapshot.tables {
            db.register(entry.schema)?;
        }
        Ok(db)
    }

    /// Summarize schemas and row counts for the snapshot file
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tables: self
                .tables
                .values()
                .map(|t| TableSnapshot {
                    schema: t.schema().clone(),
                    row_count: t.row_count(),
                })
                .collect(),
        }
    }

    /// Lex, parse and execute one SQL statement
    pub fn run_sql(&mut self, sql: &str) -> Result<QueryResult> {
        let stmt = Parser::new(sql).parse()?;
        self.execute(stmt)
    }

    /// Execute a parsed statement
    pub fn execute(&mut self, stmt: Statement) -> Result<QueryResult> {
        match stmt {
            Statement::CreateTable(create) => {
                self.create_table(&create)?;
                Ok(QueryResult::with_message(format!(
                    "Table '{}' created",
                    create.table_name
                )))
            }
            Statement::Insert(insert) => {
                let count = self.insert_data(&insert)?;
                Ok(QueryResult::with_affected_rows(
                    count,
                    format!("{} row(s) inserted", count),
                ))
            }
            Statement::Select(select) => self.select(&select),
            Statement::Update(update) => {
                let count = self.update(&update)?;
                Ok(QueryResult::with_affected_rows(
                    count,
                    format!("{} row(s) updated", count),
                ))
            }
        }
    }

    /// Create a table; fails if the name is taken in any letter case
    pub fn create_table(&mut self, stmt: &CreateTableStatement) -> Result<()> {
        let schema = TableSchema::new(stmt.table_name.clone(), stmt.columns.clone());
        self.register(schema)?;

        tracing::info!(
            table = %stmt.table_name,
            columns = stmt.columns.len(),
            "created table"
        );
        Ok(())
    }

    /// Insert the statement's single VALUES tuple; returns the number of rows inserted
    pub fn insert_data(&mut self, stmt: &InsertStatement) -> Result<usize> {
        let table = self.table_mut(&stmt.table_name)?;
        table.insert_row(&stmt.values)?;

        tracing::info!(table = %stmt.table_name, rows = table.row_count(), "inserted row");
        Ok(1)
    }

    /// Run a SELECT and project the matching rows
    pub fn select(&self, stmt: &SelectStatement) -> Result<QueryResult> {
        let table = self.get_table(&stmt.table_name)?;
        let rows = table.select(stmt.where_clause.as_ref())?;
        let schema = table.schema();

        let result = match &stmt.columns {
            Projection::Wildcard => QueryResult::with_rows(
                schema.column_names().into_iter().map(String::from).collect(),
                rows,
            ),
            Projection::Columns(names) => {
                let indices = names
                    .iter()
                    .map(|name| table.column_index(name))
                    .collect::<Result<Vec<_>>>()?;
                let columns = indices
                    .iter()
                    .map(|&i| schema.columns()[i].name.clone())
                    .collect();
                let rows = rows.iter().map(|row| row.project(&indices)).collect();
                QueryResult::with_rows(columns, rows)
            }
        };

        tracing::debug!(table = %stmt.table_name, rows = result.rows.len(), "selected rows");
        Ok(result)
    }

    /// Run an UPDATE; returns the number of rows changed
    pub fn update(&mut self, stmt: &UpdateStatement) -> Result<usize> {
        let table = self.table_mut(&stmt.table_name)?;
        let count = table.update(&stmt.assignments, stmt.where_clause.as_ref())?;

        tracing::info!(table = %stmt.table_name, rows = count, "updated rows");
        Ok(count)
    }

    /// Check if a table exists
    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(&normalize(name))
    }

    /// Get a table by name
    pub fn get_table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(&normalize(name))
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    /// Table names as written at creation, in creation order
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.values().map(|t| t.name()).collect()
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(&normalize(name))
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    fn register(&mut self, schema: TableSchema) -> Result<()> {
        let key = normalize(schema.table_name());
        if self.tables.contains_key(&key) {
            return Err(Error::TableAlreadyExists(schema.table_name().to_string()));
        }

        self.tables.insert(key, Table::new(schema));
        Ok(())
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}
