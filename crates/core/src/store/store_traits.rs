use async_trait::async_trait;

use super::store_model::{Record, RowIndex, StoreResult};

/// Row-oriented access to a remote tabular store.
///
/// Each table has a header row followed by data rows. Every call is a
/// separate remote round trip; there are no transactions across calls.
#[async_trait]
pub trait RecordStoreTrait: Send + Sync {
    /// Header names of `table`, in column order.
    async fn headers(&self, table: &str) -> StoreResult<Vec<String>>;

    /// Every data row of `table`, keyed by header, in row order.
    async fn get_all_records(&self, table: &str) -> StoreResult<Vec<Record>>;

    /// Append a row. `values` are in header order.
    async fn append_row(&self, table: &str, values: Vec<String>) -> StoreResult<()>;

    /// Index of the first row whose `column` equals `value` exactly.
    async fn find_row(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> StoreResult<Option<RowIndex>>;

    async fn delete_row(&self, table: &str, index: RowIndex) -> StoreResult<()>;

    async fn update_cell(
        &self,
        table: &str,
        index: RowIndex,
        column: &str,
        value: &str,
    ) -> StoreResult<()>;
}
