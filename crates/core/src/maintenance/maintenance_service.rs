use std::sync::Arc;

use log::debug;

use crate::errors::{Result, ValidationError};
use crate::store::InventoryTables;
use crate::utils::ClockTrait;

use super::maintenance_calculator::{classify_service, fleet_stats};
use super::maintenance_model::{FleetStats, MaintenanceStatus};

pub struct MaintenanceService {
    tables: InventoryTables,
    clock: Arc<dyn ClockTrait>,
    threshold_days: i64,
}

impl MaintenanceService {
    pub fn new(
        tables: InventoryTables,
        clock: Arc<dyn ClockTrait>,
        threshold_days: i64,
    ) -> Result<Self> {
        if threshold_days < 1 {
            return Err(ValidationError::InvalidThreshold(threshold_days).into());
        }
        Ok(Self {
            tables,
            clock,
            threshold_days,
        })
    }

    pub fn threshold_days(&self) -> i64 {
        self.threshold_days
    }

    pub async fn get_maintenance_status(&self, blume_id: &str) -> Result<MaintenanceStatus> {
        let blume_id = blume_id.trim();
        let device = self
            .tables
            .get_device(blume_id)
            .await?
            .ok_or_else(|| ValidationError::DeviceNotFound(blume_id.to_string()))?;

        let status = classify_service(
            device.last_service_date.as_deref(),
            self.clock.today(),
            self.threshold_days,
        );
        debug!("Maintenance status for {}: {:?}", blume_id, status);
        Ok(status)
    }

    pub async fn get_fleet_stats(&self) -> Result<FleetStats> {
        let devices = self.tables.load_devices().await?;
        let faults = self.tables.load_faults().await?;
        Ok(fleet_stats(
            &devices,
            &faults,
            self.clock.today(),
            self.threshold_days,
        ))
    }
}
