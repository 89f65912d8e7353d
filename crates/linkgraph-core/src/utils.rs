//! Shared serialization helpers used by the exporters and the verifier report.

use crate::{Error, Result};

/// Generic JSON serialization with consistent error handling
/// Works with any type that implements Serialize (including slices)
pub fn to_json_string<T: serde::Serialize + ?Sized>(data: &T, context: &str) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(|e| Error::serialization(context, e.to_string()))
}

/// Quote a CSV field, doubling embedded quotes
pub fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Generic CSV serialization builder
/// Use the CSVBuilder fluent API to construct and export CSV data
pub struct CSVBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CSVBuilder {
    /// Create a new CSV with headers
    pub fn new(headers: Vec<&str>) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row whose fields are all quoted
    pub fn add_quoted_row(mut self, values: &[&str]) -> Self {
        self.rows
            .push(values.iter().map(|value| csv_quote(value)).collect());
        self
    }

    /// Build the CSV string, one line per row, no trailing newline
    pub fn build(self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(self.headers.join(","));
        lines.extend(self.rows.into_iter().map(|row| row.join(",")));
        lines.join("\n")
    }
}
