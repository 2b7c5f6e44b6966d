//! Table layout and well-known values shared across the inventory.

/// Default table names in the record store.
pub const DEFAULT_DEVICE_TABLE: &str = "Devices";
pub const DEFAULT_FAULT_TABLE: &str = "Active Faults";
pub const DEFAULT_ARCHIVE_TABLE: &str = "Resolved Tickets";
pub const DEFAULT_PENDING_TABLE: &str = "Pending Archive";

/// Device table headers.
pub const COL_BLUME_ID: &str = "Blume ID";
pub const COL_ITEM_CATEGORY: &str = "Item Category";
pub const COL_SERIAL_NUMBER: &str = "Serial Number";
pub const COL_ORIGINATED_DATE: &str = "Originated Date";
pub const COL_LAST_SERVICE: &str = "Last Service";
pub const COL_CURRENT_STATUS: &str = "Current Status";

/// Fault and archive table headers.
pub const COL_TICKET_ID: &str = "Ticket ID";
pub const COL_ISSUE_DATE: &str = "Issue Date";
pub const COL_DEVICE_STATUS: &str = "Device Status";
pub const COL_ISSUE_NOTES: &str = "Issue Notes";
pub const COL_RESOLUTION_STATUS: &str = "Resolution Status";
pub const COL_TECH_NOTES: &str = "Tech Notes";
pub const COL_RESOLVED_DATE: &str = "Resolved Date";

pub const DEVICE_HEADERS: [&str; 6] = [
    COL_BLUME_ID,
    COL_ITEM_CATEGORY,
    COL_SERIAL_NUMBER,
    COL_ORIGINATED_DATE,
    COL_LAST_SERVICE,
    COL_CURRENT_STATUS,
];

pub const FAULT_HEADERS: [&str; 5] = [
    COL_TICKET_ID,
    COL_BLUME_ID,
    COL_ISSUE_DATE,
    COL_DEVICE_STATUS,
    COL_ISSUE_NOTES,
];

pub const ARCHIVE_HEADERS: [&str; 8] = [
    COL_TICKET_ID,
    COL_BLUME_ID,
    COL_ISSUE_DATE,
    COL_DEVICE_STATUS,
    COL_ISSUE_NOTES,
    COL_RESOLUTION_STATUS,
    COL_TECH_NOTES,
    COL_RESOLVED_DATE,
];

pub const PENDING_HEADERS: [&str; 4] = [
    COL_TICKET_ID,
    COL_RESOLUTION_STATUS,
    COL_TECH_NOTES,
    COL_RESOLVED_DATE,
];

/// Storage format for every date cell.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Ticket IDs look like `ID-00042`.
pub const TICKET_ID_PREFIX: &str = "ID-";
pub const TICKET_ID_WIDTH: usize = 5;

/// Days since last service at which a device becomes overdue.
pub const DEFAULT_MAINTENANCE_THRESHOLD_DAYS: i64 = 180;

pub const MIN_SERIAL_LENGTH: usize = 4;

pub const ITEM_CATEGORIES: [&str; 4] = [
    "VR Headset (HTC Vive)",
    "External Battery Pack",
    "Left Hand Remote",
    "Right Hand Remote",
];

pub const FAULT_STATUSES: [&str; 3] = ["Physical damage", "Tracking error", "Software Error"];

pub const DEVICE_STATUSES: [&str; 3] = ["In Use", "Deployed", "In Repair"];
pub const DEFAULT_DEVICE_STATUS: &str = "In Use";

/// Synthetic fields written for routine inspections.
pub const INSPECTION_DEVICE_STATUS: &str = "Routine Inspection";
pub const INSPECTION_ISSUE_NOTES: &str = "Scheduled maintenance check";
