use std::sync::Arc;

use log::{debug, info};

use crate::constants::{COL_CURRENT_STATUS, COL_LAST_SERVICE};
use crate::errors::{Result, ValidationError};
use crate::store::InventoryTables;
use crate::utils::KeyedLocks;

use super::devices_model::{Device, NewDevice};
use super::devices_validation::{require, validate_new_device};

pub struct DeviceService {
    tables: InventoryTables,
    device_locks: Arc<KeyedLocks>,
}

impl DeviceService {
    pub fn new(tables: InventoryTables, device_locks: Arc<KeyedLocks>) -> Self {
        Self {
            tables,
            device_locks,
        }
    }

    /// Register a device. The Blume ID must not already be in the device table.
    pub async fn add_device(&self, input: NewDevice) -> Result<Device> {
        let device = validate_new_device(&input)?;
        let _guard = self.device_locks.lock(&device.blume_id).await;

        let existing = self.tables.load_devices().await?;
        if existing.iter().any(|d| d.blume_id == device.blume_id) {
            return Err(ValidationError::DuplicateBlumeId(device.blume_id).into());
        }

        self.tables.append_device(&device).await?;
        info!(
            "Registered device {} ({}, serial {})",
            device.blume_id, device.item_category, device.serial_number
        );
        Ok(device)
    }

    pub async fn get_device(&self, blume_id: &str) -> Result<Device> {
        let blume_id = blume_id.trim();
        self.tables
            .get_device(blume_id)
            .await?
            .ok_or_else(|| ValidationError::DeviceNotFound(blume_id.to_string()).into())
    }

    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        Ok(self.tables.load_devices().await?)
    }

    /// Overwrite the device's `Current Status` cell.
    pub async fn update_device_status(&self, blume_id: &str, status: &str) -> Result<()> {
        let blume_id = blume_id.trim();
        let status = require("Current Status", status)?;
        let _guard = self.device_locks.lock(blume_id).await;

        let index = self
            .tables
            .find_device(blume_id)
            .await?
            .ok_or_else(|| ValidationError::DeviceNotFound(blume_id.to_string()))?;
        self.tables
            .update_device_cell(index, COL_CURRENT_STATUS, &status)
            .await?;
        info!("Device {} status set to '{}'", blume_id, status);
        Ok(())
    }
}

/// Stamp `Last Service` on a device. Returns false when the device row is gone.
///
/// Callers hold the device lock.
pub(crate) async fn write_last_service(
    tables: &InventoryTables,
    blume_id: &str,
    date: &str,
) -> Result<bool> {
    match tables.find_device(blume_id).await? {
        Some(index) => {
            tables
                .update_device_cell(index, COL_LAST_SERVICE, date)
                .await?;
            debug!("Device {} last service set to {}", blume_id, date);
            Ok(true)
        }
        None => Ok(false),
    }
}
