//! Busy-interval source capability.
//!
//! The engine never loads calendar data itself: the composing application
//! injects a [`CalendarSource`] and the widget refreshes through it. A failed
//! fetch degrades to "no known conflicts" so booking keeps working while the
//! operator gets a warning in the logs.

use async_trait::async_trait;
use chrono::{Days, NaiveDateTime};
use tracing::warn;

use crate::config::ScheduleConfig;
use crate::conflict::BusyInterval;
use crate::error::SourceError;

/// External calendar collaborator: reports reserved periods inside a window.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Busy intervals overlapping `[window_start, window_end)`, resolved to
    /// absolute timestamps. All-day versus timed events are the
    /// implementation's concern; the engine only ever sees intervals.
    async fn fetch_busy(
        &self,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Result<Vec<BusyInterval>, SourceError>;
}

/// The window the widget asks the source for: now through the end of the
/// advance-booking window.
pub fn booking_window(
    config: &ScheduleConfig,
    now: NaiveDateTime,
) -> (NaiveDateTime, NaiveDateTime) {
    let end = now
        .checked_add_days(Days::new(config.max_advance_booking_days as u64))
        .unwrap_or(NaiveDateTime::MAX);
    (now, end)
}

/// Refresh busy intervals for the booking window, failing open.
///
/// Returns an empty list when the external calendar is disabled in the
/// config (the source is not even called) and on source failure, which is
/// logged for the operator; the booker never sees it.
pub async fn refresh_busy(
    source: &dyn CalendarSource,
    config: &ScheduleConfig,
    now: NaiveDateTime,
) -> Vec<BusyInterval> {
    if !config.external_calendar.enabled {
        return Vec::new();
    }
    let (window_start, window_end) = booking_window(config, now);
    match source.fetch_busy(window_start, window_end).await {
        Ok(busy) => busy,
        Err(err) => {
            warn!("calendar refresh failed, continuing without conflicts: {err}");
            Vec::new()
        }
    }
}
