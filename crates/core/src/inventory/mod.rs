//! Entry point wiring the inventory services together.

mod inventory_service;

pub use inventory_service::{InventoryService, InventoryServiceTrait};
