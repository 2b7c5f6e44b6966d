use std::collections::HashSet;

use chrono::NaiveDate;

use crate::devices::Device;
use crate::faults::FaultTicket;
use crate::utils::time_utils::{days_between, parse_date};

use super::maintenance_model::{FleetStats, MaintenanceStatus};

/// Classify a last-service cell against `today`.
///
/// A delta of `threshold_days` or more is overdue. Service dates in the
/// future count as current.
pub fn classify_service(
    last_service: Option<&str>,
    today: NaiveDate,
    threshold_days: i64,
) -> MaintenanceStatus {
    let Some(raw) = last_service.map(str::trim).filter(|s| !s.is_empty()) else {
        return MaintenanceStatus::NoServiceHistory;
    };
    let Some(serviced) = parse_date(raw) else {
        return MaintenanceStatus::Unknown;
    };

    let days = days_between(serviced, today);
    if days >= threshold_days {
        MaintenanceStatus::Overdue { days }
    } else {
        MaintenanceStatus::UpToDate { days }
    }
}

/// Bucket every device as broken, overdue or healthy.
///
/// Faults that reference unknown devices are ignored.
pub fn fleet_stats(
    devices: &[Device],
    active_faults: &[FaultTicket],
    today: NaiveDate,
    threshold_days: i64,
) -> FleetStats {
    let faulted: HashSet<&str> = active_faults.iter().map(|f| f.blume_id.as_str()).collect();

    let mut stats = FleetStats::default();
    for device in devices {
        if faulted.contains(device.blume_id.as_str()) {
            stats.broken += 1;
            continue;
        }
        let status = classify_service(device.last_service_date.as_deref(), today, threshold_days);
        if status.is_current() {
            stats.healthy += 1;
        } else {
            stats.overdue += 1;
        }
    }
    stats
}
