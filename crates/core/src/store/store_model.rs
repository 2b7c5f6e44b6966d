use std::collections::HashMap;

use crate::errors::StoreError;

/// One data row keyed by header name.
pub type Record = HashMap<String, String>;

/// Zero-based position of a data row, as returned by `get_all_records`.
/// Shifts after a delete.
pub type RowIndex = usize;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A typed row that maps to and from a header-keyed record.
pub trait SheetRow: Sized {
    /// Headers that must be present for the table to hold this row.
    fn required_headers() -> &'static [&'static str];

    fn from_record(table: &str, record: &Record) -> StoreResult<Self>;

    /// Cell text for `column`, `None` when this row has nothing for it.
    fn cell_value(&self, column: &str) -> Option<String>;
}

/// Read a cell whose header must exist. Blank cells come back as empty strings.
pub fn required_cell(table: &str, record: &Record, column: &str) -> StoreResult<String> {
    record
        .get(column)
        .map(|value| value.trim().to_string())
        .ok_or_else(|| StoreError::column_not_found(table, column))
}

/// Read a cell that may be missing or blank.
pub fn optional_cell(record: &Record, column: &str) -> Option<String> {
    record
        .get(column)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Lay out a row in the table's own header order.
pub fn row_values<R: SheetRow>(row: &R, headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .map(|header| row.cell_value(header).unwrap_or_default())
        .collect()
}

/// Fail fast when a table is missing a header the row type depends on.
pub fn ensure_headers<R: SheetRow>(table: &str, headers: &[String]) -> StoreResult<()> {
    for required in R::required_headers() {
        if !headers.iter().any(|h| h == required) {
            return Err(StoreError::column_not_found(table, required));
        }
    }
    Ok(())
}
