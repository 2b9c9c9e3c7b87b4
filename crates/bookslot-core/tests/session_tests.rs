//! Tests for selection state, slot claims, and the record wire shape.

use bookslot_core::{slot_key, BookingRecord, BookingSession};
use chrono::{NaiveDate, NaiveTime};
use serde_json::json;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn d(s: &str) -> NaiveDate {
    s.parse().expect("valid date literal")
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("valid HH:MM literal")
}

fn record(date: &str, time: &str, name: &str) -> BookingRecord {
    BookingRecord {
        date: d(date),
        time: t(time),
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: None,
        notes: None,
    }
}

// ── Test 1: claiming marks exactly that slot ─────────────────────────────────

#[test]
fn claim_marks_single_slot() {
    let mut session = BookingSession::new();
    session.claim(record("2026-03-16", "09:00", "Ada"));

    assert!(session.is_claimed(d("2026-03-16"), t("09:00")));
    assert!(!session.is_claimed(d("2026-03-16"), t("10:00")));
    assert!(!session.is_claimed(d("2026-03-17"), t("09:00")));
}

// ── Test 2: re-claiming a slot overwrites the record ─────────────────────────

#[test]
fn reclaim_overwrites_record() {
    let mut session = BookingSession::new();
    session.claim(record("2026-03-16", "09:00", "Ada"));
    session.claim(record("2026-03-16", "09:00", "Grace"));

    let held = session
        .claimed_record(d("2026-03-16"), t("09:00"))
        .expect("slot is claimed");
    assert_eq!(held.name, "Grace");
}

// ── Test 3: selection is cleared by reset, claims survive ────────────────────

#[test]
fn reset_clears_selection_not_claims() {
    let mut session = BookingSession::new();
    session.select_date(d("2026-03-16"));
    session.select_time(t("09:00"));
    session.claim(record("2026-03-16", "09:00", "Ada"));

    session.reset();
    assert_eq!(session.selected_date(), None);
    assert_eq!(session.selected_time(), None);
    assert!(session.is_claimed(d("2026-03-16"), t("09:00")));
}

// ── Test 4: picking a new date drops the stale time ──────────────────────────

#[test]
fn select_date_resets_time() {
    let mut session = BookingSession::new();
    session.select_date(d("2026-03-16"));
    session.select_time(t("09:00"));

    session.select_date(d("2026-03-17"));
    assert_eq!(session.selected_date(), Some(d("2026-03-17")));
    assert_eq!(session.selected_time(), None);
}

// ── Test 5: slot keys pin date and minute ────────────────────────────────────

#[test]
fn slot_key_format() {
    assert_eq!(slot_key(d("2026-03-16"), t("09:00")), "2026-03-16_09:00");
    assert_eq!(slot_key(d("2026-03-05"), t("14:30")), "2026-03-05_14:30");
}

// ── Test 6: records serialize in camelCase, optionals omitted ────────────────

#[test]
fn record_serializes_camel_case() {
    let value = serde_json::to_value(record("2026-03-16", "09:00", "Ada"))
        .expect("record serializes");
    assert_eq!(
        value,
        json!({
            "date": "2026-03-16",
            "time": "09:00",
            "name": "Ada",
            "email": "ada@example.com",
        })
    );
}

// ── Test 7: optional contact fields round-trip when present ──────────────────

#[test]
fn record_optionals_round_trip() {
    let mut original = record("2026-03-16", "09:00", "Ada");
    original.phone = Some("+1 555 0100".to_owned());
    original.notes = Some("first visit".to_owned());

    let text = serde_json::to_string(&original).expect("record serializes");
    let parsed: BookingRecord = serde_json::from_str(&text).expect("record parses");
    assert_eq!(parsed, original);
}
