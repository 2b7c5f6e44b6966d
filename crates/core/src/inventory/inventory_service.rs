use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};

use crate::devices::{Device, DeviceService, NewDevice};
use crate::errors::Result;
use crate::faults::{FaultService, OpenTicket, RecoveryReport};
use crate::maintenance::{FleetStats, MaintenanceService, MaintenanceStatus};
use crate::search::{DeviceSearchResult, HistoryEvent, SearchService};
use crate::settings::InventorySettings;
use crate::store::{InventoryTables, RecordStoreTrait, RetryingRecordStore};
use crate::utils::{ClockTrait, KeyedLocks};

/// Operations the presentation layer calls.
#[async_trait]
pub trait InventoryServiceTrait: Send + Sync {
    async fn add_device(&self, device: NewDevice) -> Result<Device>;

    async fn get_device(&self, blume_id: &str) -> Result<Device>;

    async fn update_device_status(&self, blume_id: &str, status: &str) -> Result<()>;

    /// Open a fault and return the new ticket ID.
    async fn report_fault(&self, blume_id: &str, status: &str, notes: &str) -> Result<String>;

    /// Archive an active ticket as resolved. `Ok(false)` if it is not active.
    async fn archive_resolved_ticket(&self, ticket_id: &str, tech_notes: &str) -> Result<bool>;

    /// Record a routine inspection. `Ok(false)` if the device is unknown.
    async fn mark_as_inspected(&self, blume_id: &str, technician: &str) -> Result<bool>;

    async fn search_device(&self, query: &str) -> Result<Vec<DeviceSearchResult>>;

    async fn get_device_history(&self, blume_id: &str) -> Result<Vec<HistoryEvent>>;

    async fn get_fleet_stats(&self) -> Result<FleetStats>;

    async fn get_maintenance_status(&self, blume_id: &str) -> Result<MaintenanceStatus>;

    async fn list_open_tickets(&self) -> Result<Vec<OpenTicket>>;

    async fn recover_pending_archives(&self) -> Result<RecoveryReport>;
}

/// Wires the inventory services over one record store.
pub struct InventoryService {
    settings: InventorySettings,
    device_service: Arc<DeviceService>,
    fault_service: Arc<FaultService>,
    maintenance_service: Arc<MaintenanceService>,
    search_service: Arc<SearchService>,
}

impl InventoryService {
    /// Build the services. Store calls go through a `RetryingRecordStore`
    /// configured from `settings.retry`.
    pub fn new(
        store: Arc<dyn RecordStoreTrait>,
        settings: InventorySettings,
        clock: Arc<dyn ClockTrait>,
    ) -> Result<Self> {
        settings.validate()?;

        let store: Arc<dyn RecordStoreTrait> =
            Arc::new(RetryingRecordStore::new(store, settings.retry));
        let tables = InventoryTables::new(store, settings.tables.clone());
        let device_locks = Arc::new(KeyedLocks::new());

        Ok(Self {
            device_service: Arc::new(DeviceService::new(
                tables.clone(),
                Arc::clone(&device_locks),
            )),
            fault_service: Arc::new(FaultService::new(
                tables.clone(),
                Arc::clone(&clock),
                device_locks,
            )),
            maintenance_service: Arc::new(MaintenanceService::new(
                tables.clone(),
                clock,
                settings.maintenance_threshold_days,
            )?),
            search_service: Arc::new(SearchService::new(tables)),
            settings,
        })
    }

    /// Build the services and finish any archive moves interrupted by a crash.
    pub async fn start(
        store: Arc<dyn RecordStoreTrait>,
        settings: InventorySettings,
        clock: Arc<dyn ClockTrait>,
    ) -> Result<Self> {
        let service = Self::new(store, settings, clock)?;
        let report = service.fault_service.recover_pending_archives().await?;
        if report.completed > 0 {
            warn!(
                "Finished {} of {} pending archive(s): {} archived, {} removed from active",
                report.completed, report.pending, report.archived, report.removed_from_active
            );
        }
        info!(
            "Inventory ready (devices: '{}', faults: '{}', archive: '{}')",
            service.settings.tables.devices,
            service.settings.tables.faults,
            service.settings.tables.archive
        );
        Ok(service)
    }

    pub fn settings(&self) -> &InventorySettings {
        &self.settings
    }

    pub fn device_service(&self) -> Arc<DeviceService> {
        Arc::clone(&self.device_service)
    }

    pub fn fault_service(&self) -> Arc<FaultService> {
        Arc::clone(&self.fault_service)
    }

    pub fn maintenance_service(&self) -> Arc<MaintenanceService> {
        Arc::clone(&self.maintenance_service)
    }

    pub fn search_service(&self) -> Arc<SearchService> {
        Arc::clone(&self.search_service)
    }
}

#[async_trait]
impl InventoryServiceTrait for InventoryService {
    async fn add_device(&self, device: NewDevice) -> Result<Device> {
        self.device_service.add_device(device).await
    }

    async fn get_device(&self, blume_id: &str) -> Result<Device> {
        self.device_service.get_device(blume_id).await
    }

    async fn update_device_status(&self, blume_id: &str, status: &str) -> Result<()> {
        self.device_service
            .update_device_status(blume_id, status)
            .await
    }

    async fn report_fault(&self, blume_id: &str, status: &str, notes: &str) -> Result<String> {
        self.fault_service
            .report_fault(blume_id, status, notes)
            .await
    }

    async fn archive_resolved_ticket(&self, ticket_id: &str, tech_notes: &str) -> Result<bool> {
        self.fault_service
            .archive_resolved_ticket(ticket_id, tech_notes)
            .await
    }

    async fn mark_as_inspected(&self, blume_id: &str, technician: &str) -> Result<bool> {
        self.fault_service
            .mark_as_inspected(blume_id, technician)
            .await
    }

    async fn search_device(&self, query: &str) -> Result<Vec<DeviceSearchResult>> {
        self.search_service.search_device(query).await
    }

    async fn get_device_history(&self, blume_id: &str) -> Result<Vec<HistoryEvent>> {
        self.search_service.get_device_history(blume_id).await
    }

    async fn get_fleet_stats(&self) -> Result<FleetStats> {
        self.maintenance_service.get_fleet_stats().await
    }

    async fn get_maintenance_status(&self, blume_id: &str) -> Result<MaintenanceStatus> {
        self.maintenance_service
            .get_maintenance_status(blume_id)
            .await
    }

    async fn list_open_tickets(&self) -> Result<Vec<OpenTicket>> {
        self.fault_service.list_open_tickets().await
    }

    async fn recover_pending_archives(&self) -> Result<RecoveryReport> {
        self.fault_service.recover_pending_archives().await
    }
}
