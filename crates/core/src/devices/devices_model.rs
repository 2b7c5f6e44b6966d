use serde::{Deserialize, Serialize};

use crate::constants::{
    COL_BLUME_ID, COL_CURRENT_STATUS, COL_ITEM_CATEGORY, COL_LAST_SERVICE, COL_ORIGINATED_DATE,
    COL_SERIAL_NUMBER,
};
use crate::store::{optional_cell, required_cell, Record, SheetRow, StoreResult};

/// A registered Blume unit.
///
/// Dates are kept as stored text (`YYYY-MM-DD`); rows edited by hand in the
/// store may hold values that do not parse, and callers decide how to treat them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub blume_id: String,
    pub item_category: String,
    pub serial_number: String,
    pub originated_date: String,
    pub last_service_date: Option<String>,
    pub current_status: Option<String>,
}

/// Input for registering a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    pub blume_id: String,
    pub item_category: String,
    pub serial_number: String,
    pub originated_date: String,
    pub status: Option<String>,
}

impl NewDevice {
    pub fn new(
        blume_id: impl Into<String>,
        item_category: impl Into<String>,
        serial_number: impl Into<String>,
        originated_date: impl Into<String>,
    ) -> Self {
        Self {
            blume_id: blume_id.into(),
            item_category: item_category.into(),
            serial_number: serial_number.into(),
            originated_date: originated_date.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

impl SheetRow for Device {
    fn required_headers() -> &'static [&'static str] {
        &[
            COL_BLUME_ID,
            COL_ITEM_CATEGORY,
            COL_SERIAL_NUMBER,
            COL_ORIGINATED_DATE,
        ]
    }

    fn from_record(table: &str, record: &Record) -> StoreResult<Self> {
        Ok(Self {
            blume_id: required_cell(table, record, COL_BLUME_ID)?,
            item_category: required_cell(table, record, COL_ITEM_CATEGORY)?,
            serial_number: required_cell(table, record, COL_SERIAL_NUMBER)?,
            originated_date: required_cell(table, record, COL_ORIGINATED_DATE)?,
            last_service_date: optional_cell(record, COL_LAST_SERVICE),
            current_status: optional_cell(record, COL_CURRENT_STATUS),
        })
    }

    fn cell_value(&self, column: &str) -> Option<String> {
        match column {
            COL_BLUME_ID => Some(self.blume_id.clone()),
            COL_ITEM_CATEGORY => Some(self.item_category.clone()),
            COL_SERIAL_NUMBER => Some(self.serial_number.clone()),
            COL_ORIGINATED_DATE => Some(self.originated_date.clone()),
            COL_LAST_SERVICE => self.last_service_date.clone(),
            COL_CURRENT_STATUS => self.current_status.clone(),
            _ => None,
        }
    }
}
