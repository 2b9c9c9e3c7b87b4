//! Conflict testing against externally sourced busy intervals.
//!
//! Intervals are half-open `[start, end)`. Touching intervals — a slot ending
//! exactly when a busy period starts, or vice versa — are NOT conflicts.

use chrono::NaiveDateTime;

use crate::availability::Slot;
use crate::config::ScheduleConfig;

/// An externally reserved period, already resolved to absolute timestamps by
/// the calendar collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct BusyInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl BusyInterval {
    /// Half-open overlap test against `[start, end)`.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        // Two intervals overlap iff a.start < b.end AND b.start < a.end.
        // This excludes the adjacent case where a.end == b.start.
        start < self.end && self.start < end
    }
}

/// Whether any busy interval blocks the slot.
///
/// Applied only when external conflict checking is enabled in the config;
/// otherwise every slot passes.
pub fn is_slot_blocked(config: &ScheduleConfig, slot: &Slot, busy: &[BusyInterval]) -> bool {
    if !config.conflict_checking_enabled() {
        return false;
    }
    busy.iter()
        .any(|interval| interval.overlaps(slot.start, slot.end()))
}
