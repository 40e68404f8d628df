//! In-memory tabular representation of merged CSV rows.

use csv::StringRecord;

/// A single data row. Field order matches the table header.
pub type Row = StringRecord;

/// An ordered header plus ordered rows.
///
/// Invariant: every row has exactly the header's column count, in the
/// header's column order. The loader enforces this at merge time; the
/// table never repairs it.
#[derive(Debug, Clone)]
pub struct RecordTable {
    headers: StringRecord,
    rows: Vec<Row>,
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::new(StringRecord::new())
    }
}

impl RecordTable {
    /// Creates a table with the given header and no rows.
    pub fn new(headers: StringRecord) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// The canonical empty table: zero columns, zero rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows (the header does not count).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True if the table carries a schema. A directory with zero CSV
    /// files loads into a table with no columns at all.
    pub fn has_columns(&self) -> bool {
        self.headers.len() > 0
    }

    /// Appends a row. The caller guarantees the field count matches.
    pub fn push(&mut self, row: Row) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    /// Position of `name` in the header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Resolves `names` to header positions, in order.
    ///
    /// Returns every unresolvable name at once so callers can report the
    /// full list rather than just the first miss.
    pub fn key_indices(&self, names: &[String]) -> Result<Vec<usize>, Vec<String>> {
        let mut indices = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name) {
                Some(idx) => indices.push(idx),
                None => missing.push(name.clone()),
            }
        }
        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(missing)
        }
    }
}
