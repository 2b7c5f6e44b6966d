//! Device registry: registration, lookup and status updates.

mod devices_model;
mod devices_service;
mod devices_validation;

pub use devices_model::*;
pub use devices_service::DeviceService;
pub(crate) use devices_service::write_last_service;
pub use devices_validation::{is_valid_blume_id, validate_new_device};
pub(crate) use devices_validation::require;
