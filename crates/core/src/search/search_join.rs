//! Joins between the device table and the ticket tables.

use crate::devices::Device;
use crate::faults::{FaultTicket, ResolutionStatus, ResolvedTicket};

use super::search_model::{DeviceSearchResult, HistoryEvent, HistoryEventKind, IssueView};

/// Devices whose ID equals `query` or that have an active fault whose status
/// contains it, both case-insensitively. A matching device carries all of its
/// active faults, not only the ones that matched.
///
/// An empty query matches every device with at least one active fault.
pub fn search_devices(
    devices: &[Device],
    active_faults: &[FaultTicket],
    query: &str,
) -> Vec<DeviceSearchResult> {
    let needle = query.trim().to_lowercase();

    devices
        .iter()
        .filter_map(|device| {
            let faults: Vec<&FaultTicket> = active_faults
                .iter()
                .filter(|f| f.blume_id == device.blume_id)
                .collect();

            let id_match = device.blume_id.to_lowercase() == needle;
            let fault_match = faults
                .iter()
                .any(|f| f.device_status.to_lowercase().contains(&needle));

            (id_match || fault_match).then(|| DeviceSearchResult {
                device: device.clone(),
                issues: faults.into_iter().map(IssueView::from).collect(),
            })
        })
        .collect()
}

/// Timeline for one device, newest first.
///
/// Dates are compared as stored text, which orders correctly because every
/// date is written as `YYYY-MM-DD`. Events on the same day keep origin,
/// active, archive order.
pub fn device_history(
    device: &Device,
    active_faults: &[FaultTicket],
    archive: &[ResolvedTicket],
) -> Vec<HistoryEvent> {
    let mut events = vec![HistoryEvent {
        date: device.originated_date.clone(),
        kind: HistoryEventKind::Origin,
        ticket_id: None,
        title: format!("Registered ({})", device.item_category),
        notes: Some(format!("Serial {}", device.serial_number)),
        color: HistoryEventKind::Origin.color(),
    }];

    events.extend(
        active_faults
            .iter()
            .filter(|f| f.blume_id == device.blume_id)
            .map(|f| HistoryEvent {
                date: f.issue_date.clone(),
                kind: HistoryEventKind::Active,
                ticket_id: Some(f.ticket_id.clone()),
                title: format!("ACTIVE: {}", f.device_status),
                notes: non_empty(&f.issue_notes),
                color: HistoryEventKind::Active.color(),
            }),
    );

    events.extend(
        archive
            .iter()
            .filter(|r| r.blume_id == device.blume_id)
            .map(|r| {
                let kind = match r.resolution_status {
                    ResolutionStatus::Resolved => HistoryEventKind::Resolved,
                    ResolutionStatus::Inspected => HistoryEventKind::Inspected,
                };
                HistoryEvent {
                    date: r.resolved_date.clone(),
                    kind,
                    ticket_id: Some(r.ticket_id.clone()),
                    title: format!("{}: {}", kind.as_str(), r.device_status),
                    notes: non_empty(&r.tech_notes),
                    color: kind.color(),
                }
            }),
    );

    events.sort_by(|a, b| b.date.cmp(&a.date));
    events
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
