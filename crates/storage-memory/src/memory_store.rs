use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use log::debug;

use blume_core::constants::{ARCHIVE_HEADERS, DEVICE_HEADERS, FAULT_HEADERS, PENDING_HEADERS};
use blume_core::errors::StoreError;
use blume_core::settings::TableNames;
use blume_core::store::{Record, RecordStoreTrait, RowIndex, StoreResult};

use crate::failures::{take_failure, InjectedFailure, StoreOp};

#[derive(Debug, Clone, Default)]
struct MemoryTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MemoryTable {
    fn column(&self, table: &str, column: &str) -> StoreResult<usize> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| StoreError::column_not_found(table, column))
    }

    fn check_index(&self, table: &str, index: RowIndex) -> StoreResult<()> {
        if index >= self.rows.len() {
            return Err(StoreError::RowOutOfRange {
                table: table.to_string(),
                index,
            });
        }
        Ok(())
    }

    fn record(&self, row: &[String]) -> Record {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), row.get(i).cloned().unwrap_or_default()))
            .collect()
    }
}

#[derive(Debug, Default)]
struct StoreState {
    tables: HashMap<String, MemoryTable>,
    failures: Vec<InjectedFailure>,
    calls: HashMap<StoreOp, usize>,
}

/// Record store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    state: Mutex<StoreState>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with the four inventory tables created under `names`.
    pub fn with_inventory_tables(names: &TableNames) -> Self {
        let store = Self::new();
        store.create_table(&names.devices, &DEVICE_HEADERS);
        store.create_table(&names.faults, &FAULT_HEADERS);
        store.create_table(&names.archive, &ARCHIVE_HEADERS);
        store.create_table(&names.pending, &PENDING_HEADERS);
        store
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Create or replace `name` with an empty table.
    pub fn create_table(&self, name: &str, headers: &[&str]) {
        self.state().tables.insert(
            name.to_string(),
            MemoryTable {
                headers: headers.iter().map(|h| h.to_string()).collect(),
                rows: Vec::new(),
            },
        );
    }

    /// Copy of every data row in `table`, keyed by header.
    pub fn rows(&self, table: &str) -> Vec<Record> {
        let state = self.state();
        state
            .tables
            .get(table)
            .map(|t| t.rows.iter().map(|row| t.record(row)).collect())
            .unwrap_or_default()
    }

    /// Fail the next `op` on any table without applying it.
    pub fn fail_next(&self, op: StoreOp, error: StoreError) {
        self.inject(op, None, error, false);
    }

    /// Fail the next `op` on `table` without applying it.
    pub fn fail_next_on(&self, op: StoreOp, table: &str, error: StoreError) {
        self.inject(op, Some(table), error, false);
    }

    /// Apply the next `op` on `table` and then report `error`, the way a
    /// connection drop after the server committed looks to the caller.
    pub fn fail_after_apply_on(&self, op: StoreOp, table: &str, error: StoreError) {
        self.inject(op, Some(table), error, true);
    }

    fn inject(&self, op: StoreOp, table: Option<&str>, error: StoreError, after_apply: bool) {
        self.state().failures.push(InjectedFailure {
            op,
            table: table.map(str::to_string),
            error,
            after_apply,
        });
    }

    /// Number of times `op` was called, failed calls included.
    pub fn call_count(&self, op: StoreOp) -> usize {
        self.state().calls.get(&op).copied().unwrap_or(0)
    }

    /// Run one store call against the locked state, honouring injected failures.
    fn call<T>(
        &self,
        op: StoreOp,
        table: &str,
        apply: impl FnOnce(&mut MemoryTable) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut state = self.state();
        *state.calls.entry(op).or_insert(0) += 1;

        let failure = take_failure(&mut state.failures, op, table);
        if let Some(failure) = &failure {
            if !failure.after_apply {
                debug!("Injected {:?} failure on '{}': {}", op, table, failure.error);
                return Err(failure.error.clone());
            }
        }

        let memory_table = state
            .tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        let result = apply(memory_table)?;

        match failure {
            Some(failure) => {
                debug!(
                    "Injected {:?} failure on '{}' after apply: {}",
                    op, table, failure.error
                );
                Err(failure.error)
            }
            None => Ok(result),
        }
    }
}

#[async_trait]
impl RecordStoreTrait for MemoryRecordStore {
    async fn headers(&self, table: &str) -> StoreResult<Vec<String>> {
        self.call(StoreOp::Headers, table, |t| Ok(t.headers.clone()))
    }

    async fn get_all_records(&self, table: &str) -> StoreResult<Vec<Record>> {
        self.call(StoreOp::GetAllRecords, table, |t| {
            Ok(t.rows.iter().map(|row| t.record(row)).collect())
        })
    }

    async fn append_row(&self, table: &str, values: Vec<String>) -> StoreResult<()> {
        self.call(StoreOp::AppendRow, table, |t| {
            let mut row = values;
            row.resize(t.headers.len(), String::new());
            t.rows.push(row);
            Ok(())
        })
    }

    async fn find_row(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> StoreResult<Option<RowIndex>> {
        self.call(StoreOp::FindRow, table, |t| {
            let col = t.column(table, column)?;
            Ok(t.rows
                .iter()
                .position(|row| row.get(col).is_some_and(|cell| cell == value)))
        })
    }

    async fn delete_row(&self, table: &str, index: RowIndex) -> StoreResult<()> {
        self.call(StoreOp::DeleteRow, table, |t| {
            t.check_index(table, index)?;
            t.rows.remove(index);
            Ok(())
        })
    }

    async fn update_cell(
        &self,
        table: &str,
        index: RowIndex,
        column: &str,
        value: &str,
    ) -> StoreResult<()> {
        self.call(StoreOp::UpdateCell, table, |t| {
            let col = t.column(table, column)?;
            t.check_index(table, index)?;
            let row = &mut t.rows[index];
            if row.len() <= col {
                row.resize(col + 1, String::new());
            }
            row[col] = value.to_string();
            Ok(())
        })
    }
}
