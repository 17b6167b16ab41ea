//! Table storage for memdb
//!
//! This module binds a schema to a storage engine. Literal text from
//! statements is validated and converted here, and WHERE clauses are turned
//! into row filters the engine can evaluate.

use super::engine::{AllRows, InMemoryStorageEngine, RowFilter, RowUpdater, StorageEngine};
use super::row::{Row, Value};
use crate::catalog::TableSchema;
use crate::error::{Error, Result};
use crate::sql::ast::{Assignment, ComparisonOperator, Condition, WhereClause};

/// A table combining schema and storage
#[derive(Debug)]
pub struct Table {
    /// Column layout, fixed at creation
    schema: TableSchema,
    /// Row storage
    storage: Box<dyn StorageEngine>,
}

impl Table {
    /// Create a new empty table backed by in-memory storage
    pub fn new(schema: TableSchema) -> Self {
        Self::with_storage(schema, Box::new(InMemoryStorageEngine::new()))
    }

    /// Create a table over a specific storage engine
    pub fn with_storage(schema: TableSchema, storage: Box<dyn StorageEngine>) -> Self {
        Self { schema, storage }
    }

    /// Get table name
    pub fn name(&self) -> &str {
        self.schema.table_name()
    }

    /// Get table schema
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Number of stored rows
    pub fn row_count(&self) -> usize {
        self.storage.row_count()
    }

    /// One-line description used by the shell's `.schema` command
    pub fn describe(&self) -> String {
        format!("{} -- {} row(s)", self.schema, self.row_count())
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.schema
            .column_index(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string(), self.name().to_string()))
    }

    /// Insert one row given the literal text of each value, in column order
    ///
    /// Either every value converts and the row is stored, or nothing is stored.
    pub fn insert_row(&mut self, values: &[String]) -> Result<()> {
        if values.len() != self.schema.column_count() {
            return Err(Error::ColumnCountMismatch {
                expected: self.schema.column_count(),
                actual: values.len(),
            });
        }

        let row = self
            .schema
            .columns()
            .iter()
            .zip(values)
            .map(|(column, text)| Value::coerce(column, text))
            .collect::<Result<Row>>()?;

        self.storage.insert(row);
        Ok(())
    }

    /// Return all rows, or the rows matching `where_clause`
    pub fn select(&self, where_clause: Option<&WhereClause>) -> Result<Vec<Row>> {
        match where_clause {
            Some(clause) => self.storage.scan(&self.filter_for(clause)?),
            None => self.storage.scan(&AllRows),
        }
    }

    /// Apply `assignments` to all rows, or the rows matching `where_clause`
    ///
    /// Each row is rewritten on a copy that replaces the original only when
    /// every assignment converted. Rows are independent: a failure leaves
    /// rows updated earlier in the same call in their new state.
    pub fn update(
        &mut self,
        assignments: &[Assignment],
        where_clause: Option<&WhereClause>,
    ) -> Result<usize> {
        let updater = self.updater_for(assignments)?;
        match where_clause {
            Some(clause) => {
                let filter = self.filter_for(clause)?;
                self.storage.update(&filter, &updater)
            }
            None => self.storage.update(&AllRows, &updater),
        }
    }

    /// Build a row filter for a WHERE clause, resolving its column now
    fn filter_for(&self, clause: &WhereClause) -> Result<ComparisonFilter> {
        match &clause.condition {
            Condition::Comparison { left, op, right } => Ok(ComparisonFilter {
                index: self.column_index(left)?,
                column: left.clone(),
                op: *op,
                literal: right.clone(),
            }),
        }
    }

    fn updater_for(&self, assignments: &[Assignment]) -> Result<AssignmentUpdater> {
        let targets = assignments
            .iter()
            .map(|a| Ok((self.column_index(&a.column)?, a.value.clone())))
            .collect::<Result<Vec<_>>>()?;

        Ok(AssignmentUpdater {
            schema: self.schema.clone(),
            targets,
        })
    }
}

/// `column op literal`, evaluated against a row's stored value
struct ComparisonFilter {
    index: usize,
    column: String,
    op: ComparisonOperator,
    literal: String,
}

impl RowFilter for ComparisonFilter {
    fn matches(&self, row: &Row) -> Result<bool> {
        match row.get(self.index) {
            Some(value) => {
                let ordering = value.compare_literal(&self.column, &self.literal)?;
                Ok(self.op.matches(ordering))
            }
            None => Ok(false),
        }
    }
}

/// SET clause with columns already resolved to positions
struct AssignmentUpdater {
    schema: TableSchema,
    targets: Vec<(usize, String)>,
}

impl RowUpdater for AssignmentUpdater {
    fn apply(&self, row: &Row) -> Result<Row> {
        let mut updated = row.clone();
        for (index, text) in &self.targets {
            let value = Value::coerce(&self.schema.columns()[*index], text)?;
            updated.set(*index, value);
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColumnDefinition, DataType};

    fn create_test_table() -> Table {
        let schema = TableSchema::new(
            "t",
            vec![
                ColumnDefinition::new("a", DataType::Int),
                ColumnDefinition::new("b", DataType::Varchar(10)),
            ],
        );
        Table::new(schema)
    }

    fn values(a: &str, b: &str) -> Vec<String> {
        vec![a.to_string(), b.to_string()]
    }

    fn where_clause(left: &str, op: ComparisonOperator, right: &str) -> WhereClause {
        WhereClause {
            condition: Condition::Comparison {
                left: left.to_string(),
                op,
                right: right.to_string(),
            },
        }
    }

    fn assign(column: &str, value: &str) -> Assignment {
        Assignment {
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_table_insert() {
        let mut table = create_test_table();

        table.insert_row(&values("5", "hello")).unwrap();
        assert_eq!(table.row_count(), 1);

        let rows = table.select(None).unwrap();
        assert_eq!(
            rows[0].values(),
            &[Value::Int(5), Value::Text("hello".to_string())]
        );
    }

    #[test]
    fn test_table_insert_rejects_bad_values() {
        let mut table = create_test_table();

        assert!(matches!(
            table.insert_row(&values("abc", "hello")),
            Err(Error::InvalidInteger { .. })
        ));
        assert!(matches!(
            table.insert_row(&values("5", "this string is far too long for ten chars")),
            Err(Error::ValueTooLong { .. })
        ));
        assert!(matches!(
            table.insert_row(&["5".to_string()]),
            Err(Error::ColumnCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_table_select_where() {
        let mut table = create_test_table();
        for (a, b) in [("1", "one"), ("3", "three"), ("4", "four"), ("10", "ten")] {
            table.insert_row(&values(a, b)).unwrap();
        }

        let gt = table
            .select(Some(&where_clause("a", ComparisonOperator::Gt, "3")))
            .unwrap();
        let gte = table
            .select(Some(&where_clause("A", ComparisonOperator::Gte, "4")))
            .unwrap();
        assert_eq!(gt.len(), 2);
        assert_eq!(gt, gte);

        let text = table
            .select(Some(&where_clause("b", ComparisonOperator::Lt, "p")))
            .unwrap();
        assert_eq!(text.len(), 2); // "one", "four"
    }

    #[test]
    fn test_table_select_where_errors() {
        let mut table = create_test_table();
        table.insert_row(&values("1", "one")).unwrap();

        assert!(matches!(
            table.select(Some(&where_clause("c", ComparisonOperator::Eq, "1"))),
            Err(Error::ColumnNotFound(..))
        ));
        assert!(matches!(
            table.select(Some(&where_clause("a", ComparisonOperator::Eq, "one"))),
            Err(Error::NonNumericComparison { .. })
        ));
    }

    #[test]
    fn test_table_update() {
        let mut table = create_test_table();
        for (a, b) in [("5", "p"), ("6", "q"), ("5", "r")] {
            table.insert_row(&values(a, b)).unwrap();
        }

        let clause = where_clause("a", ComparisonOperator::Eq, "5");
        let assignments = [assign("b", "x")];

        assert_eq!(table.update(&assignments, Some(&clause)).unwrap(), 2);
        let after_first = table.select(None).unwrap();
        assert_eq!(table.update(&assignments, Some(&clause)).unwrap(), 2);
        assert_eq!(table.select(None).unwrap(), after_first);

        let b: Vec<_> = after_first
            .iter()
            .map(|r| r.get(1).unwrap().to_string())
            .collect();
        assert_eq!(b, vec!["x", "q", "x"]);

        assert_eq!(table.update(&[assign("a", "7")], None).unwrap(), 3);
        assert_eq!(
            table
                .select(Some(&where_clause("a", ComparisonOperator::Eq, "7")))
                .unwrap()
                .len(),
            3
        );
    }

    #[test]
    fn test_table_update_is_atomic_per_row() {
        let mut table = create_test_table();
        table.insert_row(&values("1", "keep")).unwrap();

        let result = table.update(&[assign("b", "new"), assign("a", "oops")], None);
        assert!(matches!(result, Err(Error::InvalidInteger { .. })));

        let rows = table.select(None).unwrap();
        assert_eq!(rows[0].get(1), Some(&Value::Text("keep".to_string())));
    }

    #[test]
    fn test_table_update_unknown_column() {
        let mut table = create_test_table();
        table.insert_row(&values("1", "one")).unwrap();

        assert!(matches!(
            table.update(&[assign("missing", "1")], None),
            Err(Error::ColumnNotFound(..))
        ));
    }
}
