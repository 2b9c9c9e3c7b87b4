//! Error types for schedule loading and the boundary capabilities.

use thiserror::Error;

/// Rejected schedule configuration.
///
/// Fatal at load time: a widget must not render availability from a config
/// that failed validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The input string was not valid JSON, or a field had the wrong shape.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("slotDurationMinutes must be positive")]
    ZeroSlotDuration,

    #[error("weekday {0} out of range (expected 0-6, Sunday = 0)")]
    WeekdayOutOfRange(u8),

    #[error("minNoticeHours must be a finite non-negative number, got {0}")]
    InvalidNoticeHours(f64),

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// Busy-interval source failure.
///
/// Recovered locally by degrading to "no known conflicts"; never fatal and
/// never shown to the booker.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("calendar source unreachable: {0}")]
    Unreachable(String),

    #[error("calendar source returned malformed data: {0}")]
    Malformed(String),
}

/// Notification relay failure.
///
/// The booking is not complete and the slot is not claimed; the caller should
/// offer the booker a retry.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("notification rejected by provider: {0}")]
    Rejected(String),

    #[error("notification transport failed: {0}")]
    Transport(String),
}
