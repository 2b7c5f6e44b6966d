//! Device search and per-device history.

mod search_join;
mod search_model;
mod search_service;

pub use search_join::{device_history, search_devices};
pub use search_model::*;
pub use search_service::SearchService;
