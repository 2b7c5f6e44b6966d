use serde::{Deserialize, Serialize};

use crate::constants::{
    COL_BLUME_ID, COL_DEVICE_STATUS, COL_ISSUE_DATE, COL_ISSUE_NOTES, COL_RESOLUTION_STATUS,
    COL_RESOLVED_DATE, COL_TECH_NOTES, COL_TICKET_ID,
};
use crate::store::{required_cell, Record, SheetRow, StoreResult};

/// An open fault, stored in the active table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultTicket {
    pub ticket_id: String,
    pub blume_id: String,
    pub issue_date: String,
    pub device_status: String,
    pub issue_notes: String,
}

/// How an archived ticket was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionStatus {
    Resolved,
    Inspected,
}

impl ResolutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resolved => "Resolved",
            Self::Inspected => "Inspected",
        }
    }

    /// Parse a stored cell. Anything that is not an inspection counts as a repair.
    pub fn from_cell(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("inspected") {
            Self::Inspected
        } else {
            Self::Resolved
        }
    }
}

impl std::fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closed ticket in the archive table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTicket {
    pub ticket_id: String,
    pub blume_id: String,
    pub issue_date: String,
    pub device_status: String,
    pub issue_notes: String,
    pub resolution_status: ResolutionStatus,
    pub tech_notes: String,
    pub resolved_date: String,
}

impl ResolvedTicket {
    pub fn from_fault(
        fault: &FaultTicket,
        resolution_status: ResolutionStatus,
        tech_notes: impl Into<String>,
        resolved_date: impl Into<String>,
    ) -> Self {
        Self {
            ticket_id: fault.ticket_id.clone(),
            blume_id: fault.blume_id.clone(),
            issue_date: fault.issue_date.clone(),
            device_status: fault.device_status.clone(),
            issue_notes: fault.issue_notes.clone(),
            resolution_status,
            tech_notes: tech_notes.into(),
            resolved_date: resolved_date.into(),
        }
    }
}

/// Journal entry for an archive move that has started but not finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingArchive {
    pub ticket_id: String,
    pub resolution_status: ResolutionStatus,
    pub tech_notes: String,
    pub resolved_date: String,
}

/// Outcome of replaying the pending-archive journal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryReport {
    /// Journal rows examined.
    pub pending: usize,
    /// Archive rows written during recovery.
    pub archived: usize,
    /// Active rows removed during recovery.
    pub removed_from_active: usize,
    /// Entries where recovery wrote an archive row or removed an active row.
    pub completed: usize,
}

/// An open ticket joined with its device, for the repair queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenTicket {
    pub ticket: FaultTicket,
    pub item_category: Option<String>,
    pub serial_number: Option<String>,
}

impl SheetRow for FaultTicket {
    fn required_headers() -> &'static [&'static str] {
        &[
            COL_TICKET_ID,
            COL_BLUME_ID,
            COL_ISSUE_DATE,
            COL_DEVICE_STATUS,
            COL_ISSUE_NOTES,
        ]
    }

    fn from_record(table: &str, record: &Record) -> StoreResult<Self> {
        Ok(Self {
            ticket_id: required_cell(table, record, COL_TICKET_ID)?,
            blume_id: required_cell(table, record, COL_BLUME_ID)?,
            issue_date: required_cell(table, record, COL_ISSUE_DATE)?,
            device_status: required_cell(table, record, COL_DEVICE_STATUS)?,
            issue_notes: required_cell(table, record, COL_ISSUE_NOTES)?,
        })
    }

    fn cell_value(&self, column: &str) -> Option<String> {
        match column {
            COL_TICKET_ID => Some(self.ticket_id.clone()),
            COL_BLUME_ID => Some(self.blume_id.clone()),
            COL_ISSUE_DATE => Some(self.issue_date.clone()),
            COL_DEVICE_STATUS => Some(self.device_status.clone()),
            COL_ISSUE_NOTES => Some(self.issue_notes.clone()),
            _ => None,
        }
    }
}

impl SheetRow for ResolvedTicket {
    fn required_headers() -> &'static [&'static str] {
        &[
            COL_TICKET_ID,
            COL_BLUME_ID,
            COL_ISSUE_DATE,
            COL_DEVICE_STATUS,
            COL_ISSUE_NOTES,
            COL_RESOLUTION_STATUS,
            COL_TECH_NOTES,
            COL_RESOLVED_DATE,
        ]
    }

    fn from_record(table: &str, record: &Record) -> StoreResult<Self> {
        Ok(Self {
            ticket_id: required_cell(table, record, COL_TICKET_ID)?,
            blume_id: required_cell(table, record, COL_BLUME_ID)?,
            issue_date: required_cell(table, record, COL_ISSUE_DATE)?,
            device_status: required_cell(table, record, COL_DEVICE_STATUS)?,
            issue_notes: required_cell(table, record, COL_ISSUE_NOTES)?,
            resolution_status: ResolutionStatus::from_cell(&required_cell(
                table,
                record,
                COL_RESOLUTION_STATUS,
            )?),
            tech_notes: required_cell(table, record, COL_TECH_NOTES)?,
            resolved_date: required_cell(table, record, COL_RESOLVED_DATE)?,
        })
    }

    fn cell_value(&self, column: &str) -> Option<String> {
        match column {
            COL_TICKET_ID => Some(self.ticket_id.clone()),
            COL_BLUME_ID => Some(self.blume_id.clone()),
            COL_ISSUE_DATE => Some(self.issue_date.clone()),
            COL_DEVICE_STATUS => Some(self.device_status.clone()),
            COL_ISSUE_NOTES => Some(self.issue_notes.clone()),
            COL_RESOLUTION_STATUS => Some(self.resolution_status.as_str().to_string()),
            COL_TECH_NOTES => Some(self.tech_notes.clone()),
            COL_RESOLVED_DATE => Some(self.resolved_date.clone()),
            _ => None,
        }
    }
}

impl SheetRow for PendingArchive {
    fn required_headers() -> &'static [&'static str] {
        &[
            COL_TICKET_ID,
            COL_RESOLUTION_STATUS,
            COL_TECH_NOTES,
            COL_RESOLVED_DATE,
        ]
    }

    fn from_record(table: &str, record: &Record) -> StoreResult<Self> {
        Ok(Self {
            ticket_id: required_cell(table, record, COL_TICKET_ID)?,
            resolution_status: ResolutionStatus::from_cell(&required_cell(
                table,
                record,
                COL_RESOLUTION_STATUS,
            )?),
            tech_notes: required_cell(table, record, COL_TECH_NOTES)?,
            resolved_date: required_cell(table, record, COL_RESOLVED_DATE)?,
        })
    }

    fn cell_value(&self, column: &str) -> Option<String> {
        match column {
            COL_TICKET_ID => Some(self.ticket_id.clone()),
            COL_RESOLUTION_STATUS => Some(self.resolution_status.as_str().to_string()),
            COL_TECH_NOTES => Some(self.tech_notes.clone()),
            COL_RESOLVED_DATE => Some(self.resolved_date.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_status_parses_leniently() {
        assert_eq!(ResolutionStatus::from_cell(" inspected "), ResolutionStatus::Inspected);
        assert_eq!(ResolutionStatus::from_cell("Resolved"), ResolutionStatus::Resolved);
        assert_eq!(ResolutionStatus::from_cell("Fixed"), ResolutionStatus::Resolved);
    }

    #[test]
    fn archive_row_carries_fault_fields() {
        let fault = FaultTicket {
            ticket_id: "ID-00007".to_string(),
            blume_id: "B-0001".to_string(),
            issue_date: "2024-02-01".to_string(),
            device_status: "Tracking error".to_string(),
            issue_notes: "drifts left".to_string(),
        };
        let archived =
            ResolvedTicket::from_fault(&fault, ResolutionStatus::Resolved, "recalibrated", "2024-02-03");
        assert_eq!(archived.cell_value(COL_TICKET_ID).as_deref(), Some("ID-00007"));
        assert_eq!(archived.cell_value(COL_RESOLUTION_STATUS).as_deref(), Some("Resolved"));
        assert_eq!(archived.cell_value(COL_ISSUE_NOTES).as_deref(), Some("drifts left"));
        assert_eq!(archived.cell_value("Unknown"), None);
    }
}
