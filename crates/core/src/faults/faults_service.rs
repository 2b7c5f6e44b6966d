use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{info, warn};

use crate::constants::{INSPECTION_DEVICE_STATUS, INSPECTION_ISSUE_NOTES};
use crate::devices::{require, write_last_service};
use crate::errors::{Result, ValidationError};
use crate::store::InventoryTables;
use crate::utils::time_utils::format_date;
use crate::utils::{ClockTrait, KeyedLocks};

use super::faults_model::{
    FaultTicket, OpenTicket, PendingArchive, RecoveryReport, ResolutionStatus, ResolvedTicket,
};
use super::ticket_allocator::TicketAllocator;

#[derive(Debug, Default, Clone, Copy)]
struct ArchiveProgress {
    archived: bool,
    removed_from_active: bool,
}

/// Open, resolve and inspect tickets across the active and archive tables.
///
/// Moving a ticket to the archive is journaled in the pending table first:
/// journal, append archive row, delete active row, clear journal. Each step
/// checks what is already there, so the sequence can be replayed from any
/// point by `recover_pending_archives`.
pub struct FaultService {
    tables: InventoryTables,
    clock: Arc<dyn ClockTrait>,
    allocator: TicketAllocator,
    device_locks: Arc<KeyedLocks>,
    ticket_locks: KeyedLocks,
}

impl FaultService {
    pub fn new(
        tables: InventoryTables,
        clock: Arc<dyn ClockTrait>,
        device_locks: Arc<KeyedLocks>,
    ) -> Self {
        Self {
            allocator: TicketAllocator::new(tables.clone()),
            tables,
            clock,
            device_locks,
            ticket_locks: KeyedLocks::new(),
        }
    }

    fn today(&self) -> String {
        format_date(self.clock.today())
    }

    /// Open a fault against an existing device and return its ticket ID.
    pub async fn report_fault(
        &self,
        blume_id: &str,
        device_status: &str,
        issue_notes: &str,
    ) -> Result<String> {
        let blume_id = require("Blume ID", blume_id)?;
        let device_status = require("Device Status", device_status)?;

        if self.tables.get_device(&blume_id).await?.is_none() {
            return Err(ValidationError::DeviceNotFound(blume_id).into());
        }

        let _allocation = self.allocator.lock().await;
        let ticket_id = self.allocator.next_ticket_id().await?;
        let fault = FaultTicket {
            ticket_id: ticket_id.clone(),
            blume_id,
            issue_date: self.today(),
            device_status,
            issue_notes: issue_notes.trim().to_string(),
        };
        self.tables.append_fault(&fault).await?;

        info!(
            "Fault {} reported on {}: {}",
            fault.ticket_id, fault.blume_id, fault.device_status
        );
        Ok(ticket_id)
    }

    /// Move an active ticket to the archive as resolved.
    ///
    /// Returns `Ok(false)` when no active ticket has this ID.
    pub async fn archive_resolved_ticket(&self, ticket_id: &str, tech_notes: &str) -> Result<bool> {
        let ticket_id = require("Ticket ID", ticket_id)?;
        let tech_notes = require("Tech Notes", tech_notes)?;
        let _guard = self.ticket_locks.lock(&ticket_id).await;

        let Some(fault) = self
            .tables
            .load_faults()
            .await?
            .into_iter()
            .find(|f| f.ticket_id == ticket_id)
        else {
            return Ok(false);
        };

        let entry = match self
            .tables
            .load_pending()
            .await?
            .into_iter()
            .find(|p| p.ticket_id == ticket_id)
        {
            Some(existing) => existing,
            None => {
                let entry = PendingArchive {
                    ticket_id: ticket_id.clone(),
                    resolution_status: ResolutionStatus::Resolved,
                    tech_notes,
                    resolved_date: self.today(),
                };
                self.tables.append_pending(&entry).await?;
                entry
            }
        };

        self.complete_archive(&fault, &entry).await?;
        self.stamp_service(&fault.blume_id, &entry.resolved_date)
            .await?;

        info!("Ticket {} resolved and archived", ticket_id);
        Ok(true)
    }

    /// Log a routine inspection straight to the archive and reset the device's
    /// service clock. Returns `Ok(false)` when the device does not exist.
    pub async fn mark_as_inspected(&self, blume_id: &str, technician: &str) -> Result<bool> {
        let blume_id = require("Blume ID", blume_id)?;
        let _device = self.device_locks.lock(&blume_id).await;

        if self.tables.get_device(&blume_id).await?.is_none() {
            return Ok(false);
        }

        let today = self.today();
        let tech_notes = match technician.trim() {
            "" => "Routine inspection".to_string(),
            name => format!("Inspected by {}", name),
        };

        let ticket_id = {
            let _allocation = self.allocator.lock().await;
            let ticket_id = self.allocator.next_ticket_id().await?;
            let record = ResolvedTicket {
                ticket_id: ticket_id.clone(),
                blume_id: blume_id.clone(),
                issue_date: today.clone(),
                device_status: INSPECTION_DEVICE_STATUS.to_string(),
                issue_notes: INSPECTION_ISSUE_NOTES.to_string(),
                resolution_status: ResolutionStatus::Inspected,
                tech_notes,
                resolved_date: today.clone(),
            };
            self.tables.append_archive(&record).await?;
            ticket_id
        };

        write_last_service(&self.tables, &blume_id, &today).await?;
        info!("Device {} inspected ({})", blume_id, ticket_id);
        Ok(true)
    }

    /// Finish every archive move left in the journal.
    pub async fn recover_pending_archives(&self) -> Result<RecoveryReport> {
        let pending = self.tables.load_pending().await?;
        let mut report = RecoveryReport {
            pending: pending.len(),
            ..RecoveryReport::default()
        };

        let mut seen: HashSet<String> = HashSet::new();
        for entry in pending {
            if !seen.insert(entry.ticket_id.clone()) {
                continue;
            }
            let _guard = self.ticket_locks.lock(&entry.ticket_id).await;

            let fault = self
                .tables
                .load_faults()
                .await?
                .into_iter()
                .find(|f| f.ticket_id == entry.ticket_id);

            match fault {
                Some(fault) => {
                    let progress = self.complete_archive(&fault, &entry).await?;
                    if progress.archived {
                        report.archived += 1;
                    }
                    if progress.removed_from_active {
                        report.removed_from_active += 1;
                    }
                    self.stamp_service(&fault.blume_id, &entry.resolved_date)
                        .await?;
                    if progress.archived || progress.removed_from_active {
                        report.completed += 1;
                        warn!("Recovered interrupted archive of ticket {}", entry.ticket_id);
                    }
                }
                None => {
                    // Only the service stamp and the journal delete remain.
                    let archived = self
                        .tables
                        .load_archive()
                        .await?
                        .into_iter()
                        .find(|r| r.ticket_id == entry.ticket_id);
                    match archived {
                        Some(archived) => {
                            self.stamp_service(&archived.blume_id, &entry.resolved_date)
                                .await?;
                        }
                        None => warn!(
                            "Journal entry for {} has neither an active nor an archived row",
                            entry.ticket_id
                        ),
                    }
                    self.clear_journal(&entry.ticket_id).await?;
                    info!("Cleared stale journal entry for ticket {}", entry.ticket_id);
                }
            }
        }

        Ok(report)
    }

    /// Every active ticket with its device, in active-table order.
    pub async fn list_open_tickets(&self) -> Result<Vec<OpenTicket>> {
        let devices: HashMap<String, _> = self
            .tables
            .load_devices()
            .await?
            .into_iter()
            .map(|d| (d.blume_id.clone(), d))
            .collect();

        Ok(self
            .tables
            .load_faults()
            .await?
            .into_iter()
            .map(|ticket| {
                let device = devices.get(&ticket.blume_id);
                OpenTicket {
                    item_category: device.map(|d| d.item_category.clone()),
                    serial_number: device.map(|d| d.serial_number.clone()),
                    ticket,
                }
            })
            .collect())
    }

    async fn complete_archive(
        &self,
        fault: &FaultTicket,
        entry: &PendingArchive,
    ) -> Result<ArchiveProgress> {
        let mut progress = ArchiveProgress::default();

        if self.tables.find_archive(&fault.ticket_id).await?.is_none() {
            let archived = ResolvedTicket::from_fault(
                fault,
                entry.resolution_status,
                entry.tech_notes.clone(),
                entry.resolved_date.clone(),
            );
            self.tables.append_archive(&archived).await?;
            progress.archived = true;
        }

        while let Some(index) = self.tables.find_fault(&fault.ticket_id).await? {
            self.tables.delete_fault(index).await?;
            progress.removed_from_active = true;
        }

        self.clear_journal(&fault.ticket_id).await?;
        Ok(progress)
    }

    async fn clear_journal(&self, ticket_id: &str) -> Result<()> {
        while let Some(index) = self.tables.find_pending(ticket_id).await? {
            self.tables.delete_pending(index).await?;
        }
        Ok(())
    }

    async fn stamp_service(&self, blume_id: &str, date: &str) -> Result<()> {
        let _device = self.device_locks.lock(blume_id).await;
        if !write_last_service(&self.tables, blume_id, date).await? {
            warn!(
                "Device {} no longer exists; last service not updated",
                blume_id
            );
        }
        Ok(())
    }
}
