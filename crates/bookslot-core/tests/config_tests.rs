//! Tests for schedule parsing, defaults, and validation failures.

use bookslot_core::{weekday_number, ConfigError, OverrideRule, ScheduleConfig};
use chrono::NaiveDate;

fn d(s: &str) -> NaiveDate {
    s.parse().expect("valid date literal")
}

// ── Test 1: a full document parses field-for-field ───────────────────────────

#[test]
fn full_document_parses() {
    let config = ScheduleConfig::from_json(
        r#"{
            "availableWeekdays": [1, 2, 3, 4, 5],
            "defaultStart": "09:00",
            "defaultEnd": "17:00",
            "slotDurationMinutes": 30,
            "gapMinutes": 10,
            "overrides": [
                { "date": "2026-03-18", "startTime": "10:00", "endTime": "12:00" },
                { "dayOfWeek": 5, "startTime": "09:00", "endTime": "13:00" }
            ],
            "blockedDates": ["2026-03-20", "2026-04-03"],
            "maxAdvanceBookingDays": 90,
            "minNoticeHours": 2.5,
            "timezone": "America/New_York",
            "externalCalendar": { "enabled": true, "checkConflicts": false }
        }"#,
    )
    .expect("full document is valid");

    assert_eq!(config.available_weekdays, vec![1, 2, 3, 4, 5]);
    assert_eq!(config.slot_duration_minutes, 30);
    assert_eq!(config.gap_minutes, 10);
    assert_eq!(config.max_advance_booking_days, 90);
    assert_eq!(config.min_notice_hours, 2.5);
    assert_eq!(config.blocked_dates, vec![d("2026-03-20"), d("2026-04-03")]);
    assert_eq!(config.timezone.as_deref(), Some("America/New_York"));
    assert!(config.external_calendar.enabled);
    assert!(!config.external_calendar.check_conflicts);
    assert!(!config.conflict_checking_enabled());

    assert_eq!(config.overrides.len(), 2);
    assert!(matches!(config.overrides[0], OverrideRule::ByDate { .. }));
    assert!(matches!(
        config.overrides[1],
        OverrideRule::ByWeekday { day_of_week: 5, .. }
    ));
}

// ── Test 2: omitted fields take their documented defaults ────────────────────

#[test]
fn minimal_document_fills_defaults() {
    let config = ScheduleConfig::from_json(
        r#"{
            "availableWeekdays": [2, 4],
            "defaultStart": "08:00",
            "defaultEnd": "12:00",
            "slotDurationMinutes": 45,
            "maxAdvanceBookingDays": 30
        }"#,
    )
    .expect("minimal document is valid");

    assert_eq!(config.gap_minutes, 0);
    assert!(config.overrides.is_empty());
    assert!(config.blocked_dates.is_empty());
    assert_eq!(config.min_notice_hours, 0.0);
    assert_eq!(config.timezone, None);
    assert!(!config.external_calendar.enabled);
    assert!(config.external_calendar.check_conflicts);
    assert!(!config.conflict_checking_enabled());
}

// ── Test 3: unknown sections are tolerated ───────────────────────────────────

#[test]
fn unknown_sections_are_ignored() {
    // Real deployments keep presentation and notification settings in the
    // same document; the engine reads past them.
    let config = ScheduleConfig::from_json(
        r##"{
            "availableWeekdays": [1],
            "defaultStart": "09:00",
            "defaultEnd": "17:00",
            "slotDurationMinutes": 60,
            "maxAdvanceBookingDays": 60,
            "ui": { "theme": "dark", "accentColor": "#7c3aed" },
            "notifications": { "provider": "formspree", "endpoint": "https://example.test" }
        }"##,
    );
    assert!(config.is_ok());
}

// ── Test 4: a rule carrying both selectors binds to the date ─────────────────

#[test]
fn rule_with_both_selectors_is_date_specific() {
    let config = ScheduleConfig::from_json(
        r#"{
            "availableWeekdays": [1, 2, 3, 4, 5],
            "defaultStart": "09:00",
            "defaultEnd": "17:00",
            "slotDurationMinutes": 60,
            "maxAdvanceBookingDays": 60,
            "overrides": [
                { "date": "2026-03-18", "dayOfWeek": 3, "startTime": "10:00", "endTime": "12:00" }
            ]
        }"#,
    )
    .expect("document is valid");

    // The date selector wins, so the rule matches only that one Wednesday.
    assert!(config.matching_override(d("2026-03-18")).is_some());
    assert!(config.matching_override(d("2026-03-25")).is_none());
}

// ── Test 5: zero slot duration is rejected ───────────────────────────────────

#[test]
fn zero_duration_is_rejected() {
    let err = ScheduleConfig::from_json(
        r#"{
            "availableWeekdays": [1],
            "defaultStart": "09:00",
            "defaultEnd": "17:00",
            "slotDurationMinutes": 0,
            "maxAdvanceBookingDays": 60
        }"#,
    )
    .expect_err("zero duration must fail");
    assert!(matches!(err, ConfigError::ZeroSlotDuration));
}

// ── Test 6: weekday numbers beyond Saturday are rejected ─────────────────────

#[test]
fn out_of_range_weekday_is_rejected() {
    let err = ScheduleConfig::from_json(
        r#"{
            "availableWeekdays": [1, 7],
            "defaultStart": "09:00",
            "defaultEnd": "17:00",
            "slotDurationMinutes": 60,
            "maxAdvanceBookingDays": 60
        }"#,
    )
    .expect_err("weekday 7 must fail");
    assert!(matches!(err, ConfigError::WeekdayOutOfRange(7)));
}

#[test]
fn out_of_range_override_weekday_is_rejected() {
    let err = ScheduleConfig::from_json(
        r#"{
            "availableWeekdays": [1],
            "defaultStart": "09:00",
            "defaultEnd": "17:00",
            "slotDurationMinutes": 60,
            "maxAdvanceBookingDays": 60,
            "overrides": [
                { "dayOfWeek": 8, "startTime": "10:00", "endTime": "12:00" }
            ]
        }"#,
    )
    .expect_err("override weekday 8 must fail");
    assert!(matches!(err, ConfigError::WeekdayOutOfRange(8)));
}

// ── Test 7: negative and non-finite notice hours are rejected ────────────────

#[test]
fn invalid_notice_hours_are_rejected() {
    let err = ScheduleConfig::from_json(
        r#"{
            "availableWeekdays": [1],
            "defaultStart": "09:00",
            "defaultEnd": "17:00",
            "slotDurationMinutes": 60,
            "maxAdvanceBookingDays": 60,
            "minNoticeHours": -1.0
        }"#,
    )
    .expect_err("negative notice must fail");
    assert!(matches!(err, ConfigError::InvalidNoticeHours(_)));
}

// ── Test 8: malformed times and documents surface parse errors ───────────────

#[test]
fn malformed_time_is_a_parse_error() {
    let err = ScheduleConfig::from_json(
        r#"{
            "availableWeekdays": [1],
            "defaultStart": "9am",
            "defaultEnd": "17:00",
            "slotDurationMinutes": 60,
            "maxAdvanceBookingDays": 60
        }"#,
    )
    .expect_err("'9am' must fail");
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().contains("invalid HH:MM time"));
}

#[test]
fn truncated_document_is_a_parse_error() {
    let err = ScheduleConfig::from_json(r#"{ "availableWeekdays": [1"#)
        .expect_err("truncated JSON must fail");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_required_field_is_a_parse_error() {
    // maxAdvanceBookingDays has no default.
    let err = ScheduleConfig::from_json(
        r#"{
            "availableWeekdays": [1],
            "defaultStart": "09:00",
            "defaultEnd": "17:00",
            "slotDurationMinutes": 60
        }"#,
    )
    .expect_err("missing horizon must fail");
    assert!(matches!(err, ConfigError::Parse(_)));
}

// ── Test 9: unknown timezones are rejected ───────────────────────────────────

#[test]
fn unknown_timezone_is_rejected() {
    let err = ScheduleConfig::from_json(
        r#"{
            "availableWeekdays": [1],
            "defaultStart": "09:00",
            "defaultEnd": "17:00",
            "slotDurationMinutes": 60,
            "maxAdvanceBookingDays": 60,
            "timezone": "Mars/Olympus"
        }"#,
    )
    .expect_err("fictional zone must fail");
    assert!(matches!(err, ConfigError::InvalidTimezone(_)));
}

// ── Test 10: weekday numbering is anchored to Sunday ─────────────────────────

#[test]
fn weekday_numbers_run_sunday_to_saturday() {
    assert_eq!(weekday_number(d("2026-03-15")), 0, "Sunday");
    assert_eq!(weekday_number(d("2026-03-16")), 1, "Monday");
    assert_eq!(weekday_number(d("2026-03-21")), 6, "Saturday");
}
