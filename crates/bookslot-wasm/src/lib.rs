//! WASM bindings for bookslot-core.
//!
//! Exposes config validation, date availability, slot generation, conflict
//! checks, and the booking session to JavaScript via `wasm-bindgen`. All
//! complex types are passed as JSON strings; datetimes travel as ISO 8601
//! local strings without a zone suffix.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p bookslot-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir widget/wasm/ \
//!   target/wasm32-unknown-unknown/release/bookslot_wasm.wasm
//! ```

use bookslot_core::{BookingRecord, BusyInterval, ScheduleConfig, Slot};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    start: String,
    end: String,
    duration_minutes: u32,
    label: String,
}

impl From<&Slot> for SlotDto {
    fn from(slot: &Slot) -> Self {
        Self {
            start: slot.start.format(DATETIME_FORMAT).to_string(),
            end: slot.end().format(DATETIME_FORMAT).to_string(),
            duration_minutes: slot.duration_minutes,
            label: slot.label(),
        }
    }
}

/// Input format for busy intervals passed from JavaScript.
#[derive(Deserialize)]
struct BusyInput {
    start: String,
    end: String,
}

// ---------------------------------------------------------------------------
// Helpers: parse boundary strings into engine types
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 local datetime string. Accepts both
/// "2026-03-16T09:00:00" and the second-less "2026-03-16T09:00".
fn parse_datetime(s: &str) -> Result<NaiveDateTime, JsValue> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    s.parse::<NaiveDate>()
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn parse_time(s: &str) -> Result<NaiveTime, JsValue> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|e| JsValue::from_str(&format!("Invalid time '{}': {}", s, e)))
}

fn parse_config(json: &str) -> Result<ScheduleConfig, JsValue> {
    ScheduleConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a JSON array of `{start, end}` objects into `Vec<BusyInterval>`.
fn parse_busy_json(json: &str) -> Result<Vec<BusyInterval>, JsValue> {
    let inputs: Vec<BusyInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid busy intervals JSON: {}", e)))?;

    inputs
        .into_iter()
        .map(|input| {
            let start = parse_datetime(&input.start)?;
            let end = parse_datetime(&input.end)?;
            Ok(BusyInterval { start, end })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Validate a schedule JSON document.
///
/// Returns nothing on success; throws a JS error describing the first
/// validation failure otherwise. Call this once at widget startup so a bad
/// deployment fails loudly instead of rendering an empty calendar.
#[wasm_bindgen(js_name = "validateConfig")]
pub fn validate_config(config_json: &str) -> Result<(), JsValue> {
    parse_config(config_json).map(|_| ())
}

/// Day-level availability verdict for calendar-grid shading.
///
/// `now` and `date` are ISO 8601 local strings ("2026-03-16T08:00:00",
/// "2026-03-16"). A `true` verdict means the day is selectable; the slot
/// list for the day may still come back empty late in the day.
#[wasm_bindgen(js_name = "isDateAvailable")]
pub fn is_date_available(config_json: &str, now: &str, date: &str) -> Result<bool, JsValue> {
    let config = parse_config(config_json)?;
    let now = parse_datetime(now)?;
    let date = parse_date(date)?;
    Ok(bookslot_core::is_date_available(&config, now, date))
}

/// Generate the bookable slots for one day.
///
/// Returns a JSON string containing an array of
/// `{start, end, duration_minutes, label}` objects, ordered by start time.
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots(config_json: &str, now: &str, date: &str) -> Result<String, JsValue> {
    let config = parse_config(config_json)?;
    let now = parse_datetime(now)?;
    let date = parse_date(date)?;

    let slots = bookslot_core::generate_slots(&config, now, date);
    let dtos: Vec<SlotDto> = slots.iter().map(SlotDto::from).collect();

    serde_json::to_string(&dtos)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Check one slot against a JSON array of `{start, end}` busy intervals.
///
/// Honors the config's external-calendar switches: with the integration
/// disabled or conflict checking opted out, the answer is always `false`.
#[wasm_bindgen(js_name = "isSlotBlocked")]
pub fn is_slot_blocked(
    config_json: &str,
    slot_start: &str,
    duration_minutes: u32,
    busy_json: &str,
) -> Result<bool, JsValue> {
    let config = parse_config(config_json)?;
    let start = parse_datetime(slot_start)?;
    let busy = parse_busy_json(busy_json)?;

    let slot = Slot {
        start,
        duration_minutes,
    };
    Ok(bookslot_core::is_slot_blocked(&config, &slot, &busy))
}

/// Selection and claim state for one booking widget instance.
///
/// Claims live in widget memory only; they are not shared between visitors
/// or page loads. The authoritative booking store is whatever receives the
/// notification.
#[wasm_bindgen]
#[derive(Default)]
pub struct BookingSession {
    inner: bookslot_core::BookingSession,
}

#[wasm_bindgen]
impl BookingSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> BookingSession {
        BookingSession::default()
    }

    /// Select a day ("2026-03-16"). Clears any previously selected time.
    #[wasm_bindgen(js_name = "selectDate")]
    pub fn select_date(&mut self, date: &str) -> Result<(), JsValue> {
        self.inner.select_date(parse_date(date)?);
        Ok(())
    }

    /// Select a slot start time ("09:00") on the selected day.
    #[wasm_bindgen(js_name = "selectTime")]
    pub fn select_time(&mut self, time: &str) -> Result<(), JsValue> {
        self.inner.select_time(parse_time(time)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = "selectedDate")]
    pub fn selected_date(&self) -> Option<String> {
        self.inner.selected_date().map(|d| d.to_string())
    }

    #[wasm_bindgen(js_name = "selectedTime")]
    pub fn selected_time(&self) -> Option<String> {
        self.inner
            .selected_time()
            .map(|t| t.format("%H:%M").to_string())
    }

    /// Record a confirmed booking. `record_json` must carry `date`, `time`
    /// (HH:MM), `name`, and `email`; `phone` and `notes` are optional.
    ///
    /// Call this only after the notification succeeded, never before.
    pub fn claim(&mut self, record_json: &str) -> Result<(), JsValue> {
        let record: BookingRecord = serde_json::from_str(record_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid booking record JSON: {}", e)))?;
        self.inner.claim(record);
        Ok(())
    }

    /// Whether a slot was already claimed in this session.
    #[wasm_bindgen(js_name = "isClaimed")]
    pub fn is_claimed(&self, date: &str, time: &str) -> Result<bool, JsValue> {
        Ok(self.inner.is_claimed(parse_date(date)?, parse_time(time)?))
    }

    /// Clear the current selection, keeping claims.
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}
