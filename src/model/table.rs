//! Flat table rebuilt from tabular lines.

use super::{is_sheet_marker, split_cells};

/// A single header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names (empty when the table is empty)
    pub header: Vec<String>,

    /// Data rows; may be ragged
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a table from lines.
    ///
    /// Sheet markers are skipped. The first remaining line becomes the header
    /// and every later line a data row. When either the header or the data
    /// rows are missing the result is an empty table.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut content = lines
            .iter()
            .map(AsRef::as_ref)
            .filter(|line| !is_sheet_marker(line));

        let Some(header) = content.next() else {
            return Self::new();
        };
        let rows: Vec<Vec<String>> = content.map(split_cells).collect();
        if rows.is_empty() {
            return Self::new();
        }

        Self {
            header: split_cells(header),
            rows,
        }
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the widest row's column count, header included.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }
}
