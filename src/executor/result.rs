//! Statement results and their text rendering

use crate::storage::Row;
use serde::Serialize;

/// Query result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// Column names
    pub columns: Vec<String>,
    /// Result rows
    pub rows: Vec<Row>,
    /// Number of affected rows (for INSERT/UPDATE)
    pub affected_rows: usize,
    /// Message
    pub message: Option<String>,
}

impl QueryResult {
    /// Create a result with a message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            affected_rows: 0,
            message: Some(message.into()),
        }
    }

    /// Create a result with affected rows count
    pub fn with_affected_rows(count: usize, message: impl Into<String>) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            affected_rows: count,
            message: Some(message.into()),
        }
    }

    /// Create a result holding rows
    pub fn with_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            affected_rows: 0,
            message: None,
        }
    }

    /// Format the result for display: a message, or rows as an ASCII table
    pub fn render(&self) -> String {
        if let Some(message) = &self.message {
            return format!("{}\n", message);
        }

        // Calculate column widths
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (i, value) in row.values().iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(value.to_string().chars().count());
                }
            }
        }

        let separator: String = widths
            .iter()
            .map(|w| "-".repeat(*w + 2))
            .collect::<Vec<_>>()
            .join("+");
        let separator = format!("+{}+\n", separator);

        let mut output = String::new();

        // Header
        output.push_str(&separator);
        let header: String = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!(" {:^width$} ", c, width = *w))
            .collect::<Vec<_>>()
            .join("|");
        output.push_str(&format!("|{}|\n", header));
        output.push_str(&separator);

        // Rows
        for row in &self.rows {
            let line: String = row
                .values()
                .iter()
                .zip(&widths)
                .map(|(v, w)| format!(" {:>width$} ", v.to_string(), width = *w))
                .collect::<Vec<_>>()
                .join("|");
            output.push_str(&format!("|{}|\n", line));
        }

        if !self.rows.is_empty() {
            output.push_str(&separator);
        }

        output.push_str(&format!("{} row(s) returned\n", self.rows.len()));
        output
    }
}
