//! Typed access to the four inventory tables over a `RecordStoreTrait`.

use std::sync::Arc;

use log::debug;

use crate::constants::{COL_BLUME_ID, COL_TICKET_ID};
use crate::devices::Device;
use crate::faults::{FaultTicket, PendingArchive, ResolvedTicket};
use crate::settings::TableNames;

use super::store_model::{ensure_headers, row_values, RowIndex, SheetRow, StoreResult};
use super::store_traits::RecordStoreTrait;

#[derive(Clone)]
pub struct InventoryTables {
    store: Arc<dyn RecordStoreTrait>,
    names: TableNames,
}

impl InventoryTables {
    pub fn new(store: Arc<dyn RecordStoreTrait>, names: TableNames) -> Self {
        Self { store, names }
    }

    pub fn names(&self) -> &TableNames {
        &self.names
    }

    async fn load<R: SheetRow>(&self, table: &str) -> StoreResult<Vec<R>> {
        let records = self.store.get_all_records(table).await?;
        debug!("Loaded {} row(s) from '{}'", records.len(), table);
        records
            .iter()
            .filter(|record| record.values().any(|v| !v.trim().is_empty()))
            .map(|record| R::from_record(table, record))
            .collect()
    }

    async fn append<R: SheetRow>(&self, table: &str, row: &R) -> StoreResult<()> {
        let headers = self.store.headers(table).await?;
        ensure_headers::<R>(table, &headers)?;
        self.store
            .append_row(table, row_values(row, &headers))
            .await
    }

    /// Row index of the first row whose trimmed `column` cell equals `value`,
    /// matching how `load` reads rows. Tries the store's exact match first.
    async fn find(&self, table: &str, column: &str, value: &str) -> StoreResult<Option<RowIndex>> {
        let value = value.trim();
        if let Some(index) = self.store.find_row(table, column, value).await? {
            return Ok(Some(index));
        }
        let records = self.store.get_all_records(table).await?;
        Ok(records
            .iter()
            .position(|record| record.get(column).is_some_and(|cell| cell.trim() == value)))
    }

    pub async fn load_devices(&self) -> StoreResult<Vec<Device>> {
        self.load(&self.names.devices).await
    }

    pub async fn load_faults(&self) -> StoreResult<Vec<FaultTicket>> {
        self.load(&self.names.faults).await
    }

    pub async fn load_archive(&self) -> StoreResult<Vec<ResolvedTicket>> {
        self.load(&self.names.archive).await
    }

    pub async fn load_pending(&self) -> StoreResult<Vec<PendingArchive>> {
        self.load(&self.names.pending).await
    }

    pub async fn append_device(&self, device: &Device) -> StoreResult<()> {
        self.append(&self.names.devices, device).await
    }

    pub async fn append_fault(&self, fault: &FaultTicket) -> StoreResult<()> {
        self.append(&self.names.faults, fault).await
    }

    pub async fn append_archive(&self, ticket: &ResolvedTicket) -> StoreResult<()> {
        self.append(&self.names.archive, ticket).await
    }

    pub async fn append_pending(&self, entry: &PendingArchive) -> StoreResult<()> {
        self.append(&self.names.pending, entry).await
    }

    pub async fn find_device(&self, blume_id: &str) -> StoreResult<Option<RowIndex>> {
        self.find(&self.names.devices, COL_BLUME_ID, blume_id).await
    }

    pub async fn find_fault(&self, ticket_id: &str) -> StoreResult<Option<RowIndex>> {
        self.find(&self.names.faults, COL_TICKET_ID, ticket_id).await
    }

    pub async fn find_archive(&self, ticket_id: &str) -> StoreResult<Option<RowIndex>> {
        self.find(&self.names.archive, COL_TICKET_ID, ticket_id).await
    }

    pub async fn find_pending(&self, ticket_id: &str) -> StoreResult<Option<RowIndex>> {
        self.find(&self.names.pending, COL_TICKET_ID, ticket_id).await
    }

    pub async fn delete_fault(&self, index: RowIndex) -> StoreResult<()> {
        self.store.delete_row(&self.names.faults, index).await
    }

    pub async fn delete_pending(&self, index: RowIndex) -> StoreResult<()> {
        self.store.delete_row(&self.names.pending, index).await
    }

    pub async fn update_device_cell(
        &self,
        index: RowIndex,
        column: &str,
        value: &str,
    ) -> StoreResult<()> {
        self.store
            .update_cell(&self.names.devices, index, column, value)
            .await
    }

    /// Load a device by exact Blume ID.
    pub async fn get_device(&self, blume_id: &str) -> StoreResult<Option<Device>> {
        Ok(self
            .load_devices()
            .await?
            .into_iter()
            .find(|d| d.blume_id == blume_id))
    }

    /// Every ticket ID currently present in the active, archive and journal tables.
    pub async fn all_ticket_ids(&self) -> StoreResult<Vec<String>> {
        let mut ids: Vec<String> = Vec::new();
        for table in [&self.names.faults, &self.names.archive, &self.names.pending] {
            let records = self.store.get_all_records(table).await?;
            ids.extend(
                records
                    .into_iter()
                    .filter_map(|mut record| record.remove(COL_TICKET_ID)),
            );
        }
        Ok(ids)
    }
}
