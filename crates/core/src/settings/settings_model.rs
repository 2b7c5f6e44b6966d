use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ARCHIVE_TABLE, DEFAULT_DEVICE_TABLE, DEFAULT_FAULT_TABLE,
    DEFAULT_MAINTENANCE_THRESHOLD_DAYS, DEFAULT_PENDING_TABLE,
};
use crate::errors::{Error, Result};

const ENV_DEVICE_TABLE: &str = "BLUME_DEVICE_TABLE";
const ENV_FAULT_TABLE: &str = "BLUME_FAULT_TABLE";
const ENV_ARCHIVE_TABLE: &str = "BLUME_ARCHIVE_TABLE";
const ENV_PENDING_TABLE: &str = "BLUME_PENDING_TABLE";
const ENV_THRESHOLD_DAYS: &str = "BLUME_MAINTENANCE_THRESHOLD_DAYS";
const ENV_RETRY_MAX_ATTEMPTS: &str = "BLUME_RETRY_MAX_ATTEMPTS";
const ENV_RETRY_BASE_DELAY_MS: &str = "BLUME_RETRY_BASE_DELAY_MS";

/// Names of the four tables in the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableNames {
    pub devices: String,
    pub faults: String,
    pub archive: String,
    pub pending: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            devices: DEFAULT_DEVICE_TABLE.to_string(),
            faults: DEFAULT_FAULT_TABLE.to_string(),
            archive: DEFAULT_ARCHIVE_TABLE.to_string(),
            pending: DEFAULT_PENDING_TABLE.to_string(),
        }
    }
}

impl TableNames {
    fn all(&self) -> [&str; 4] {
        [&self.devices, &self.faults, &self.archive, &self.pending]
    }
}

/// Retry behaviour for transient store failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetryPolicy {
    /// Total attempts including the first. `1` disables retry.
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 250,
            max_delay_ms: 4_000,
        }
    }
}

impl RetryPolicy {
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventorySettings {
    pub tables: TableNames,
    pub maintenance_threshold_days: i64,
    pub retry: RetryPolicy,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            tables: TableNames::default(),
            maintenance_threshold_days: DEFAULT_MAINTENANCE_THRESHOLD_DAYS,
            retry: RetryPolicy::default(),
        }
    }
}

impl InventorySettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Defaults overlaid with any `BLUME_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut settings = Self::default();
        if let Some(v) = get(ENV_DEVICE_TABLE) {
            settings.tables.devices = v;
        }
        if let Some(v) = get(ENV_FAULT_TABLE) {
            settings.tables.faults = v;
        }
        if let Some(v) = get(ENV_ARCHIVE_TABLE) {
            settings.tables.archive = v;
        }
        if let Some(v) = get(ENV_PENDING_TABLE) {
            settings.tables.pending = v;
        }
        if let Some(v) = get(ENV_THRESHOLD_DAYS) {
            settings.maintenance_threshold_days = parse_env(ENV_THRESHOLD_DAYS, &v)?;
        }
        if let Some(v) = get(ENV_RETRY_MAX_ATTEMPTS) {
            settings.retry.max_attempts = parse_env(ENV_RETRY_MAX_ATTEMPTS, &v)?;
        }
        if let Some(v) = get(ENV_RETRY_BASE_DELAY_MS) {
            settings.retry.base_delay_ms = parse_env(ENV_RETRY_BASE_DELAY_MS, &v)?;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let names = self.tables.all();
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(Error::Settings("table names must not be blank".to_string()));
            }
            if names[..i].contains(name) {
                return Err(Error::Settings(format!(
                    "table '{}' is configured more than once",
                    name
                )));
            }
        }
        if self.maintenance_threshold_days < 1 {
            return Err(Error::Settings(format!(
                "maintenanceThresholdDays must be at least 1, got {}",
                self.maintenance_threshold_days
            )));
        }
        if self.retry.max_attempts == 0 {
            return Err(Error::Settings(
                "retry.maxAttempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| Error::Settings(format!("{} has invalid value '{}'", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_valid() {
        let settings = InventorySettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.maintenance_threshold_days, 180);
        assert_eq!(settings.tables.archive, "Resolved Tickets");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings =
            InventorySettings::from_json_str(r#"{"maintenanceThresholdDays": 90}"#).unwrap();
        assert_eq!(settings.maintenance_threshold_days, 90);
        assert_eq!(settings.tables, TableNames::default());
        assert_eq!(settings.retry, RetryPolicy::default());
    }

    #[test]
    fn rejects_zero_threshold_and_duplicate_tables() {
        assert!(InventorySettings::from_json_str(r#"{"maintenanceThresholdDays": 0}"#).is_err());
        let dup = r#"{"tables": {"devices": "Sheet1", "faults": "Sheet1"}}"#;
        assert!(matches!(
            InventorySettings::from_json_str(dup),
            Err(Error::Settings(msg)) if msg.contains("Sheet1")
        ));
    }

    #[test]
    fn env_overlay_applies_and_validates() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("BLUME_DEVICE_TABLE", "Sheet1"),
            ("BLUME_MAINTENANCE_THRESHOLD_DAYS", "30"),
            ("BLUME_RETRY_MAX_ATTEMPTS", " 5 "),
        ]);
        let settings =
            InventorySettings::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(settings.tables.devices, "Sheet1");
        assert_eq!(settings.maintenance_threshold_days, 30);
        assert_eq!(settings.retry.max_attempts, 5);

        let bad = InventorySettings::from_lookup(|k| {
            (k == "BLUME_MAINTENANCE_THRESHOLD_DAYS").then(|| "soon".to_string())
        });
        assert!(matches!(bad, Err(Error::Settings(_))));
    }
}
