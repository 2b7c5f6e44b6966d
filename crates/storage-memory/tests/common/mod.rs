#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;

use blume_core::devices::NewDevice;
use blume_core::settings::{InventorySettings, RetryPolicy};
use blume_core::utils::FixedClock;
use blume_core::{InventoryService, InventoryServiceTrait};
use blume_storage_memory::MemoryRecordStore;

pub const DEVICES: &str = "Devices";
pub const FAULTS: &str = "Active Faults";
pub const ARCHIVE: &str = "Resolved Tickets";
pub const PENDING: &str = "Pending Archive";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
}

/// Retries without sleeping so failure tests stay fast.
pub fn settings() -> InventorySettings {
    InventorySettings {
        retry: RetryPolicy {
            max_attempts: 3,
            base_delay_ms: 0,
            max_delay_ms: 0,
        },
        ..InventorySettings::default()
    }
}

pub struct Harness {
    pub store: Arc<MemoryRecordStore>,
    pub service: InventoryService,
}

pub fn harness() -> Harness {
    let settings = settings();
    let store = Arc::new(MemoryRecordStore::with_inventory_tables(&settings.tables));
    let service =
        InventoryService::new(store.clone(), settings, Arc::new(FixedClock(today()))).unwrap();
    Harness { store, service }
}

pub fn headset(blume_id: &str) -> NewDevice {
    NewDevice::new(blume_id, "VR Headset (HTC Vive)", "SN-12345", "2024-01-01")
}

impl Harness {
    pub async fn add(&self, blume_id: &str) {
        self.service.add_device(headset(blume_id)).await.unwrap();
    }

    /// Overwrite a device's `Last Service` cell directly in the store.
    pub async fn set_last_service(&self, blume_id: &str, date: &str) {
        use blume_core::store::RecordStoreTrait;

        let index = self
            .store
            .find_row(DEVICES, "Blume ID", blume_id)
            .await
            .unwrap()
            .unwrap();
        self.store
            .update_cell(DEVICES, index, "Last Service", date)
            .await
            .unwrap();
    }

    pub fn ticket_ids(&self, table: &str) -> Vec<String> {
        self.store
            .rows(table)
            .into_iter()
            .map(|row| row["Ticket ID"].clone())
            .collect()
    }
}
