//! # bookslot-core
//!
//! Availability engine for an appointment-booking widget.
//!
//! Turns a declarative schedule (weekly hours, per-date and per-weekday
//! overrides, blocked dates, an advance-booking window, a minimum-notice
//! window) plus externally sourced busy periods into a day-level availability
//! verdict and an ordered list of bookable slots. Everything time-shaped is
//! timezone-naive; the composing application owns wall-clock resolution.
//!
//! ## Quick start
//!
//! ```rust
//! use bookslot_core::{generate_slots, ScheduleConfig};
//! use chrono::{NaiveDate, NaiveDateTime};
//!
//! let config = ScheduleConfig::from_json(
//!     r#"{
//!         "availableWeekdays": [1, 2, 3, 4, 5],
//!         "defaultStart": "09:00",
//!         "defaultEnd": "17:00",
//!         "slotDurationMinutes": 60,
//!         "maxAdvanceBookingDays": 60
//!     }"#,
//! )
//! .unwrap();
//!
//! let now: NaiveDateTime = "2026-03-16T00:00:00".parse().unwrap();
//! let monday = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
//! let slots = generate_slots(&config, now, monday);
//! assert_eq!(slots.len(), 8);
//! assert_eq!(slots[0].label(), "9:00 AM");
//! ```
//!
//! ## Modules
//!
//! - [`availability`] — day availability verdict + slot generation
//! - [`conflict`] — half-open overlap tests against busy intervals
//! - [`session`] — in-session selection and claim tracking
//! - [`config`] — schedule description, parsing, validation
//! - [`source`] — busy-interval source capability, fail-open refresh
//! - [`notify`] — notifier capability and the claim-after-success submit flow
//! - [`error`] — error types

pub mod availability;
pub mod config;
pub mod conflict;
pub mod error;
pub mod notify;
pub mod session;
pub mod source;

pub use availability::{generate_slots, is_date_available, Slot};
pub use config::{weekday_number, ExternalCalendarConfig, OverrideRule, ScheduleConfig};
pub use conflict::{is_slot_blocked, BusyInterval};
pub use error::{ConfigError, NotifyError, SourceError};
pub use notify::{submit_booking, Notifier, NullNotifier};
pub use session::{slot_key, BookingRecord, BookingSession};
pub use source::{booking_window, refresh_busy, CalendarSource};
