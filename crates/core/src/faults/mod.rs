//! Fault tickets: reporting, resolution, inspection and archive recovery.

mod faults_model;
mod faults_service;
mod ticket_allocator;

pub use faults_model::*;
pub use faults_service::FaultService;
pub use ticket_allocator::{format_ticket_id, leading_number, next_ticket_id, TicketAllocator};
