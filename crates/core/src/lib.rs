//! Inventory core for the Blume device fleet.
//!
//! Devices, fault tickets and the resolved-ticket archive live as rows in a
//! remote tabular store reached through [`store::RecordStoreTrait`]. The
//! services here register devices, move tickets through their lifecycle,
//! compute maintenance status and join devices with their tickets for search.

pub mod constants;
pub mod devices;
pub mod errors;
pub mod faults;
pub mod inventory;
pub mod maintenance;
pub mod search;
pub mod settings;
pub mod store;
pub mod utils;

pub use errors::{Error, Result};
pub use inventory::{InventoryService, InventoryServiceTrait};
