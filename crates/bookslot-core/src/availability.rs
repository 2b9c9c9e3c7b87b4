//! Day-level availability and slot generation.
//!
//! Both queries are pure over their inputs: the caller supplies "now"
//! explicitly, so the same question gives the same answer in tests, in the
//! CLI, and across the WASM boundary.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::{weekday_number, ScheduleConfig};

/// A bookable time slot on a single date.
///
/// Slots are derived values, recomputed on every query and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub duration_minutes: u32,
}

impl Slot {
    /// Exclusive end of the slot interval.
    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::minutes(self.duration_minutes as i64)
    }

    /// The calendar date the slot belongs to.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Start time of day, the session claim-key component.
    pub fn time(&self) -> NaiveTime {
        self.start.time()
    }

    /// Human-facing 12-hour label, e.g. "9:00 AM".
    pub fn label(&self) -> String {
        self.start.format("%-I:%M %p").to_string()
    }
}

/// Day-level availability verdict, used for calendar-grid shading.
///
/// Checks run in strict precedence order: blocked dates, the advance-booking
/// window, the minimum-notice window, hour overrides, then the weekly
/// default. The notice check here is coarse — the day fails only once its
/// entire business day sits inside the notice window. The precise per-slot
/// cutoff belongs to [`generate_slots`], so an empty slot list is the
/// authoritative signal for the booking form.
pub fn is_date_available(config: &ScheduleConfig, now: NaiveDateTime, date: NaiveDate) -> bool {
    // 1. Blocked dates win over everything, overrides included.
    if config.blocked_dates.contains(&date) {
        return false;
    }

    // 2. Advance-booking window, boundary day inclusive.
    if let Some(horizon) = now
        .date()
        .checked_add_days(Days::new(config.max_advance_booking_days as u64))
    {
        if date > horizon {
            return false;
        }
    }

    // 3. A day whose remaining hours all fall inside the notice window can
    //    never produce a slot.
    if let Some(day_end) = end_of_day(date) {
        if day_end <= notice_cutoff(config, now) {
            return false;
        }
    }

    // 4. An override marks the day as a working day even when its hours are
    //    degenerate.
    if config.matching_override(date).is_some() {
        return true;
    }

    // 5. Weekly default.
    config.available_weekdays.contains(&weekday_number(date))
}

/// Ordered bookable slots for one date.
///
/// Empty when the date is unavailable at the day level, when the effective
/// hours are degenerate (start >= end), or when every candidate start falls
/// inside the minimum-notice window. Ascending start order falls out of the
/// sweep itself; there is no post-sort.
pub fn generate_slots(config: &ScheduleConfig, now: NaiveDateTime, date: NaiveDate) -> Vec<Slot> {
    if !is_date_available(config, now, date) {
        return Vec::new();
    }
    // Zero duration cannot advance the cursor; validated configs reject it.
    if config.slot_duration_minutes == 0 {
        return Vec::new();
    }

    let (start, end) = effective_hours(config, date);
    let duration = Duration::minutes(config.slot_duration_minutes as i64);
    let step =
        Duration::minutes(config.slot_duration_minutes as i64 + config.gap_minutes as i64);
    let cutoff = notice_cutoff(config, now);

    let day_end = date.and_time(end);
    let mut cursor = date.and_time(start);
    let mut slots = Vec::new();

    while let Some(slot_end) = cursor.checked_add_signed(duration) {
        if slot_end > day_end {
            break;
        }
        // Strictly after the cutoff: a slot exactly at the notice boundary
        // is not bookable.
        if cursor > cutoff {
            slots.push(Slot {
                start: cursor,
                duration_minutes: config.slot_duration_minutes,
            });
        }
        cursor = match cursor.checked_add_signed(step) {
            Some(next) => next,
            None => break,
        };
    }

    slots
}

/// Effective opening hours for a date: the first matching override's hours,
/// else the weekly defaults.
fn effective_hours(config: &ScheduleConfig, date: NaiveDate) -> (NaiveTime, NaiveTime) {
    match config.matching_override(date) {
        Some(rule) => rule.hours(),
        None => (config.default_start, config.default_end),
    }
}

/// Midnight at the start of the following day, `None` at the calendar's edge.
fn end_of_day(date: NaiveDate) -> Option<NaiveDateTime> {
    date.succ_opt().map(|next| next.and_time(NaiveTime::MIN))
}

/// Earliest instant a slot may start, given the minimum-notice window.
fn notice_cutoff(config: &ScheduleConfig, now: NaiveDateTime) -> NaiveDateTime {
    let seconds = (config.min_notice_hours * 3600.0).round() as i64;
    Duration::try_seconds(seconds)
        .and_then(|notice| now.checked_add_signed(notice))
        .unwrap_or(NaiveDateTime::MAX)
}
