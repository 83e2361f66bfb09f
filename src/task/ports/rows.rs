//! Row-source contract for bulk import.
//!
//! Spreadsheet parsing lives outside this crate; the import service
//! consumes any finite iterator of [`ImportRow`] values. The sequence is
//! lazy and not restartable; row position is the only identity a row
//! has, and it is what error strings reference.

use std::collections::HashMap;

/// One candidate record from an external row source.
///
/// Column names are matched case-insensitively, mirroring how operators'
/// spreadsheets arrive with arbitrary header casing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRow {
    values: HashMap<String, String>,
}

impl ImportRow {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column value. Later writes to the same case-insensitive
    /// column name win.
    #[must_use]
    pub fn with_column(mut self, column: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.values
            .insert(column.as_ref().to_lowercase(), value.into());
        self
    }

    /// Looks up a column value case-insensitively.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(&column.to_lowercase()).map(String::as_str)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for ImportRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |row, (column, value)| {
                row.with_column(column, value)
            })
    }
}
