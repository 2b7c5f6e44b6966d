//! In-memory implementation of the inventory record store.
//!
//! Tables behave like a spreadsheet tab: a header row followed by data rows
//! addressed by zero-based position. Failures can be queued per operation to
//! exercise retry and crash-recovery paths.

mod failures;
mod memory_store;

pub use failures::StoreOp;
pub use memory_store::MemoryRecordStore;
