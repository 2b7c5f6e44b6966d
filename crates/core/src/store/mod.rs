//! Record store contract, typed table access and the retry decorator.

mod retry;
mod store_model;
mod store_traits;
mod tables;

pub use retry::{backoff_with_jitter, RetryingRecordStore};
pub use store_model::*;
pub use store_traits::RecordStoreTrait;
pub use tables::InventoryTables;
