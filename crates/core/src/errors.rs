//! Error types for the inventory core.

use thiserror::Error;

/// Result type alias for inventory operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for every inventory operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller supplied bad input or referenced something that does not exist.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The backing record store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// Input and referential errors. Surfaced synchronously and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid Blume ID '{0}': only letters, digits and '-' are allowed")]
    InvalidBlumeId(String),

    #[error("Serial number '{0}' is too short")]
    SerialTooShort(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Blume ID '{0}' already exists")]
    DuplicateBlumeId(String),

    #[error("Device '{0}' not found")]
    DeviceNotFound(String),

    #[error("Maintenance threshold must be at least one day, got {0}")]
    InvalidThreshold(i64),
}

/// Retry policy class for store failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreRetryClass {
    Retryable,
    Permanent,
}

/// Failures raised by a record store backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The remote store could not be reached or failed mid-request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The remote store rejected the request because of its quota.
    #[error("Store rate limited: {0}")]
    RateLimited(String),

    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    #[error("Row {index} out of range in table '{table}'")]
    RowOutOfRange { table: String, index: usize },

    #[error("Malformed row in table '{table}': {message}")]
    MalformedRow { table: String, message: String },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited(message.into())
    }

    pub fn column_not_found(table: &str, column: &str) -> Self {
        Self::ColumnNotFound {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    /// Map an HTTP-like status returned by a remote backend.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            429 => Self::RateLimited(message),
            408 | 500..=599 => Self::Unavailable(message),
            _ => Self::Unavailable(format!("status {}: {}", status, message)),
        }
    }

    /// Classify error for retry policy.
    pub fn retry_class(&self) -> StoreRetryClass {
        match self {
            Self::Unavailable(_) | Self::RateLimited(_) => StoreRetryClass::Retryable,
            Self::TableNotFound(_)
            | Self::ColumnNotFound { .. }
            | Self::RowOutOfRange { .. }
            | Self::MalformedRow { .. } => StoreRetryClass::Permanent,
        }
    }

    /// True when the store refused the request before applying it.
    pub fn is_rejected_before_apply(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }
}
