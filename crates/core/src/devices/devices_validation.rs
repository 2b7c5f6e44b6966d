//! Input checks applied before a device row is written.

use crate::constants::{DEFAULT_DEVICE_STATUS, MIN_SERIAL_LENGTH};
use crate::errors::ValidationError;
use crate::utils::time_utils::{format_date, parse_date};

use super::devices_model::{Device, NewDevice};

/// Barcode-safe IDs: ASCII letters, digits and '-'.
pub fn is_valid_blume_id(blume_id: &str) -> bool {
    !blume_id.is_empty()
        && blume_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

pub fn require(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

pub fn validate_blume_id(value: &str) -> Result<String, ValidationError> {
    let blume_id = require("Blume ID", value)?;
    if !is_valid_blume_id(&blume_id) {
        return Err(ValidationError::InvalidBlumeId(blume_id));
    }
    Ok(blume_id)
}

/// Parse a date and return it zero-padded, so stored dates sort as text.
pub fn validate_date(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let date = require(field, value)?;
    match parse_date(&date) {
        Some(parsed) => Ok(format_date(parsed)),
        None => Err(ValidationError::InvalidDate(date)),
    }
}

/// Normalise and check a registration. The result has no service history yet.
pub fn validate_new_device(input: &NewDevice) -> Result<Device, ValidationError> {
    let blume_id = validate_blume_id(&input.blume_id)?;
    let item_category = require("Item Category", &input.item_category)?;
    let serial_number = require("Serial Number", &input.serial_number)?;
    if serial_number.chars().count() < MIN_SERIAL_LENGTH {
        return Err(ValidationError::SerialTooShort(serial_number));
    }
    let originated_date = validate_date("Originated Date", &input.originated_date)?;
    let current_status = match input.status.as_deref().map(str::trim) {
        Some(status) if !status.is_empty() => status.to_string(),
        _ => DEFAULT_DEVICE_STATUS.to_string(),
    };

    Ok(Device {
        blume_id,
        item_category,
        serial_number,
        originated_date,
        last_service_date: None,
        current_status: Some(current_status),
    })
}
