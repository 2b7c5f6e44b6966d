//! Service staleness per device and fleet health aggregates.

mod maintenance_calculator;
mod maintenance_model;
mod maintenance_service;

pub use maintenance_calculator::{classify_service, fleet_stats};
pub use maintenance_model::*;
pub use maintenance_service::MaintenanceService;
