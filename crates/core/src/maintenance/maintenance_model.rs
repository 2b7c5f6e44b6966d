use serde::{Deserialize, Serialize};

/// Colour hint handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Green,
    Yellow,
    Red,
    Blue,
    Gray,
}

/// Service state of one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaintenanceStatus {
    NoServiceHistory,
    Overdue { days: i64 },
    UpToDate { days: i64 },
    /// The stored service date does not parse.
    Unknown,
}

impl MaintenanceStatus {
    pub fn label(&self) -> String {
        match self {
            Self::NoServiceHistory => "No Service History".to_string(),
            Self::Overdue { days } => format!("Maintenance Overdue ({} days)", days),
            Self::UpToDate { .. } => "Up to Date".to_string(),
            Self::Unknown => "Status Unknown".to_string(),
        }
    }

    pub fn color_hint(&self) -> StatusColor {
        match self {
            Self::Overdue { .. } => StatusColor::Yellow,
            Self::UpToDate { .. } => StatusColor::Green,
            Self::NoServiceHistory | Self::Unknown => StatusColor::Gray,
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, Self::Overdue { .. })
    }

    /// Current service that does not need attention.
    pub fn is_current(&self) -> bool {
        matches!(self, Self::UpToDate { .. })
    }
}

/// Fleet-wide health buckets. Every device lands in exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    /// Devices with at least one active fault.
    pub broken: usize,
    /// No active fault, but service is stale, missing or unreadable.
    pub overdue: usize,
    pub healthy: usize,
}

impl FleetStats {
    pub fn total(&self) -> usize {
        self.broken + self.overdue + self.healthy
    }

    /// Healthy share of the fleet as a truncated percentage.
    pub fn health_percentage(&self) -> Option<u8> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some(((self.healthy * 100) / total) as u8)
    }

    pub fn health_color(&self) -> Option<StatusColor> {
        self.health_percentage().map(|score| match score {
            91..=100 => StatusColor::Green,
            71..=90 => StatusColor::Yellow,
            _ => StatusColor::Red,
        })
    }
}
