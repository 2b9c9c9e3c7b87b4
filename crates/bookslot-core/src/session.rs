//! In-session booking state: the current selection and slots already claimed.
//!
//! Claims live only for the life of the process. A reload or restart loses
//! them; cross-session durability is explicitly out of scope.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::hhmm;

/// Structured payload handed to the notifier when the booker submits.
///
/// Ownership passes to the notifier; the session keeps only the
/// [`slot_key`]-indexed copy used to gray out the slot afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Claim-map key for a slot, e.g. `2026-03-16_09:00`.
pub fn slot_key(date: NaiveDate, time: NaiveTime) -> String {
    format!("{}_{}", date.format("%Y-%m-%d"), time.format("%H:%M"))
}

/// Per-session booking state, driven by the surrounding UI.
#[derive(Debug, Clone, Default)]
pub struct BookingSession {
    selected_date: Option<NaiveDate>,
    selected_time: Option<NaiveTime>,
    claims: HashMap<String, BookingRecord>,
}

impl BookingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a date, clearing any previously selected time.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
        self.selected_time = None;
    }

    pub fn select_time(&mut self, time: NaiveTime) {
        self.selected_time = Some(time);
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<NaiveTime> {
        self.selected_time
    }

    /// Record a slot as claimed by this session.
    ///
    /// Re-claiming the same slot overwrites the previous record; it never
    /// errors.
    pub fn claim(&mut self, record: BookingRecord) {
        self.claims
            .insert(slot_key(record.date, record.time), record);
    }

    /// Whether this session already claimed the slot.
    pub fn is_claimed(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.claims.contains_key(&slot_key(date, time))
    }

    /// The record behind a claimed slot, if any.
    pub fn claimed_record(&self, date: NaiveDate, time: NaiveTime) -> Option<&BookingRecord> {
        self.claims.get(&slot_key(date, time))
    }

    /// Clear the selection. Claims persist for the life of the session.
    pub fn reset(&mut self) {
        self.selected_date = None;
        self.selected_time = None;
    }
}
