//! Global search stage.
//!
//! A row matches when any filterable, field-backed column's text contains the
//! query, ignoring case. Computed columns are invisible to search: it works
//! on raw field values, not rendered output.

use crate::column::ColumnSet;
use crate::record::Record;

/// A normalized search query.
///
/// A query that is empty after trimming matches everything. Otherwise the
/// query is lowercased as typed (inner and outer spaces included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: Option<String>,
}

impl SearchQuery {
    /// Normalizes raw input.
    pub fn new(raw: &str) -> Self {
        let needle = if raw.trim().is_empty() {
            None
        } else {
            Some(raw.to_lowercase())
        };
        SearchQuery { needle }
    }

    /// Returns `true` if this query lets every row through.
    pub fn is_empty(&self) -> bool {
        self.needle.is_none()
    }

    /// Case-insensitive substring test against one haystack.
    pub fn matches_text(&self, haystack: &str) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => haystack.to_lowercase().contains(needle.as_str()),
        }
    }

    /// Tests one row against every filterable column.
    pub fn matches_row<T: Record>(&self, columns: &ColumnSet<T>, row: &T) -> bool {
        if self.is_empty() {
            return true;
        }
        columns
            .filterable()
            .any(|col| self.matches_text(&col.raw_value(row).to_text()))
    }
}

/// Keeps the rows matching `query`, preserving order.
pub fn search_rows<'r, T: Record>(
    columns: &ColumnSet<T>,
    rows: Vec<&'r T>,
    query: &SearchQuery,
) -> Vec<&'r T> {
    if query.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| query.matches_row(columns, *row))
        .collect()
}
