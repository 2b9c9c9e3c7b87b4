//! Notification capability and the submit flow.
//!
//! The core never talks to a concrete relay; the composing application
//! injects a [`Notifier`]. The one hard rule of the flow: a claim is written
//! only after the notifier confirms success, so a failed relay never
//! corrupts the claim map.

use async_trait::async_trait;
use tracing::error;

use crate::error::NotifyError;
use crate::session::{BookingRecord, BookingSession};

/// Booking relay: delivers a booking record to whoever should hear about it.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, record: &BookingRecord) -> Result<(), NotifyError>;
}

/// Fallback used when no provider is configured: accepts every record
/// without delivering it anywhere.
#[derive(Debug, Default)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn send(&self, _record: &BookingRecord) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Submit a booking: relay the record, then claim the slot.
///
/// On failure the session is untouched and the error comes back so the UI
/// can offer a retry.
pub async fn submit_booking(
    session: &mut BookingSession,
    notifier: &dyn Notifier,
    record: BookingRecord,
) -> Result<(), NotifyError> {
    if let Err(err) = notifier.send(&record).await {
        error!("booking notification failed: {err}");
        return Err(err);
    }
    session.claim(record);
    Ok(())
}
