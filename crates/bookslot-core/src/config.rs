//! Schedule configuration — the declarative description of bookable hours.
//!
//! Parsed from camelCase JSON, validated eagerly so that a malformed schedule
//! fails at load time rather than surfacing as odd availability at query
//! time. Unknown fields are ignored: the same file may carry UI or provider
//! sections the engine never reads.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Serde adapter for times in 24-hour `HH:MM` form.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT)
            .map_err(|_| de::Error::custom(format!("invalid HH:MM time: '{}'", s)))
    }
}

/// Weekday number with Sunday = 0 .. Saturday = 6.
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// A single rule replacing the default hours.
///
/// Rules are scanned in declaration order and the first rule that applies to
/// the queried date wins. Date-specific and weekday-specific rules are
/// distinct variants, so a rule never matches on both criteria at once; a
/// JSON object carrying both fields deserializes as date-specific.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideRule {
    /// Applies to one exact calendar date.
    #[serde(rename_all = "camelCase")]
    ByDate {
        date: NaiveDate,
        #[serde(with = "hhmm")]
        start_time: NaiveTime,
        #[serde(with = "hhmm")]
        end_time: NaiveTime,
    },
    /// Applies to every occurrence of a weekday (0 = Sunday .. 6 = Saturday).
    #[serde(rename_all = "camelCase")]
    ByWeekday {
        day_of_week: u8,
        #[serde(with = "hhmm")]
        start_time: NaiveTime,
        #[serde(with = "hhmm")]
        end_time: NaiveTime,
    },
}

impl OverrideRule {
    /// Whether this rule applies to the given date.
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            OverrideRule::ByDate { date: d, .. } => *d == date,
            OverrideRule::ByWeekday { day_of_week, .. } => *day_of_week == weekday_number(date),
        }
    }

    /// The hours this rule prescribes.
    pub fn hours(&self) -> (NaiveTime, NaiveTime) {
        match self {
            OverrideRule::ByDate {
                start_time,
                end_time,
                ..
            }
            | OverrideRule::ByWeekday {
                start_time,
                end_time,
                ..
            } => (*start_time, *end_time),
        }
    }
}

/// External calendar integration knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalCalendarConfig {
    /// Whether busy intervals are fetched from the external source at all.
    pub enabled: bool,
    /// Whether fetched busy intervals actually block slots.
    pub check_conflicts: bool,
}

impl Default for ExternalCalendarConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            check_conflicts: true,
        }
    }
}

/// Immutable schedule description consumed by the availability queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfig {
    /// Weekdays open for booking (0 = Sunday .. 6 = Saturday).
    pub available_weekdays: Vec<u8>,
    /// Default opening time on available weekdays.
    #[serde(with = "hhmm")]
    pub default_start: NaiveTime,
    /// Default closing time on available weekdays.
    #[serde(with = "hhmm")]
    pub default_end: NaiveTime,
    /// Length of each bookable slot in minutes.
    pub slot_duration_minutes: u32,
    /// Pause inserted between consecutive slots, in minutes.
    #[serde(default)]
    pub gap_minutes: u32,
    /// Hour overrides, scanned in order; first match wins.
    #[serde(default)]
    pub overrides: Vec<OverrideRule>,
    /// Dates that are never bookable, regardless of overrides.
    #[serde(default)]
    pub blocked_dates: Vec<NaiveDate>,
    /// How far into the future a date may be booked, in days. The boundary
    /// day itself is bookable.
    pub max_advance_booking_days: u32,
    /// Minimum lead time between "now" and a slot start, in hours.
    #[serde(default)]
    pub min_notice_hours: f64,
    /// IANA timezone the schedule is expressed in. Validated here, consumed
    /// by the composing application: engine arithmetic is timezone-naive.
    #[serde(default)]
    pub timezone: Option<String>,
    /// External calendar integration knobs.
    #[serde(default)]
    pub external_calendar: ExternalCalendarConfig,
}

impl ScheduleConfig {
    /// Parse a schedule from JSON and validate it in one step.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON or field shapes, and
    /// the corresponding validation variant for semantic violations.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ScheduleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the semantic rules the type system cannot enforce.
    ///
    /// Degenerate hours (start >= end) are deliberately legal: they yield an
    /// empty slot list, which is a normal result rather than a config error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_duration_minutes == 0 {
            return Err(ConfigError::ZeroSlotDuration);
        }
        for &day in &self.available_weekdays {
            if day > 6 {
                return Err(ConfigError::WeekdayOutOfRange(day));
            }
        }
        for rule in &self.overrides {
            if let OverrideRule::ByWeekday { day_of_week, .. } = rule {
                if *day_of_week > 6 {
                    return Err(ConfigError::WeekdayOutOfRange(*day_of_week));
                }
            }
        }
        if !self.min_notice_hours.is_finite() || self.min_notice_hours < 0.0 {
            return Err(ConfigError::InvalidNoticeHours(self.min_notice_hours));
        }
        if let Some(tz) = &self.timezone {
            tz.parse::<chrono_tz::Tz>()
                .map_err(|_| ConfigError::InvalidTimezone(tz.clone()))?;
        }
        Ok(())
    }

    /// First override in declaration order that applies to `date`.
    pub fn matching_override(&self, date: NaiveDate) -> Option<&OverrideRule> {
        self.overrides.iter().find(|rule| rule.matches(date))
    }

    /// Whether fetched busy intervals should block slots.
    pub fn conflict_checking_enabled(&self) -> bool {
        self.external_calendar.enabled && self.external_calendar.check_conflicts
    }
}
