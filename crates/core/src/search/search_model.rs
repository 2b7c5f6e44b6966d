use serde::{Deserialize, Serialize};

use crate::devices::Device;
use crate::faults::FaultTicket;
use crate::maintenance::StatusColor;

/// An active fault as shown next to its device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueView {
    pub ticket_id: String,
    pub issue_date: String,
    pub status: String,
    pub notes: String,
}

impl From<&FaultTicket> for IssueView {
    fn from(fault: &FaultTicket) -> Self {
        Self {
            ticket_id: fault.ticket_id.clone(),
            issue_date: fault.issue_date.clone(),
            status: fault.device_status.clone(),
            notes: fault.issue_notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSearchResult {
    #[serde(flatten)]
    pub device: Device,
    pub issues: Vec<IssueView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryEventKind {
    Origin,
    Active,
    Resolved,
    Inspected,
}

impl HistoryEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Origin => "ORIGIN",
            Self::Active => "ACTIVE",
            Self::Resolved => "RESOLVED",
            Self::Inspected => "INSPECTED",
        }
    }

    pub fn color(&self) -> StatusColor {
        match self {
            Self::Origin => StatusColor::Blue,
            Self::Active => StatusColor::Red,
            Self::Resolved | Self::Inspected => StatusColor::Green,
        }
    }
}

/// One entry on a device timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    pub date: String,
    pub kind: HistoryEventKind,
    pub ticket_id: Option<String>,
    pub title: String,
    pub notes: Option<String>,
    pub color: StatusColor,
}
