use log::debug;

use crate::errors::{Result, ValidationError};
use crate::store::InventoryTables;

use super::search_join::{device_history, search_devices};
use super::search_model::{DeviceSearchResult, HistoryEvent};

pub struct SearchService {
    tables: InventoryTables,
}

impl SearchService {
    pub fn new(tables: InventoryTables) -> Self {
        Self { tables }
    }

    pub async fn search_device(&self, query: &str) -> Result<Vec<DeviceSearchResult>> {
        let devices = self.tables.load_devices().await?;
        let faults = self.tables.load_faults().await?;
        let results = search_devices(&devices, &faults, query);
        debug!("Search '{}' matched {} device(s)", query.trim(), results.len());
        Ok(results)
    }

    pub async fn get_device_history(&self, blume_id: &str) -> Result<Vec<HistoryEvent>> {
        let blume_id = blume_id.trim();
        let device = self
            .tables
            .get_device(blume_id)
            .await?
            .ok_or_else(|| ValidationError::DeviceNotFound(blume_id.to_string()))?;
        let faults = self.tables.load_faults().await?;
        let archive = self.tables.load_archive().await?;
        Ok(device_history(&device, &faults, &archive))
    }
}
