//! `bookslot` CLI — inspect schedules and walk bookings from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a schedule document and print a summary
//! bookslot check -c schedule.json
//!
//! # Shade a month: which days accept bookings?
//! bookslot month -c schedule.json -m 2026-03
//!
//! # List bookable slots for a day, marking calendar conflicts
//! bookslot slots -c schedule.json -d 2026-03-16 -b busy.json
//!
//! # Book a slot end to end
//! bookslot book -c schedule.json -d 2026-03-16 -t 09:00 \
//!     --name "Ada Lovelace" --email ada@example.com
//! ```
//!
//! Every time-sensitive command accepts `--now` to pin the clock, which keeps
//! output reproducible in scripts and tests.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use bookslot_core::{
    generate_slots, is_date_available, is_slot_blocked, refresh_busy, submit_booking,
    weekday_number, BookingRecord, BookingSession, BusyInterval, CalendarSource, Notifier,
    NotifyError, ScheduleConfig, SourceError,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bookslot",
    version,
    about = "Appointment availability and booking CLI",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a schedule document and print a summary
    Check {
        /// Path to the schedule JSON document
        #[arg(short, long)]
        config: String,
    },
    /// Render a month grid shading the days that accept bookings
    Month {
        /// Path to the schedule JSON document
        #[arg(short, long)]
        config: String,
        /// Month to render, e.g. 2026-03
        #[arg(short, long)]
        month: String,
        /// Pin the clock, e.g. 2026-03-16T08:00 (defaults to the system clock)
        #[arg(long)]
        now: Option<String>,
    },
    /// List bookable slots for one day
    Slots {
        /// Path to the schedule JSON document
        #[arg(short, long)]
        config: String,
        /// Day to list, e.g. 2026-03-16
        #[arg(short, long)]
        date: String,
        /// Busy intervals JSON exported from an external calendar
        #[arg(short, long)]
        busy: Option<String>,
        /// Pin the clock, e.g. 2026-03-16T08:00 (defaults to the system clock)
        #[arg(long)]
        now: Option<String>,
    },
    /// Book a slot: relay the booking and claim it
    Book {
        /// Path to the schedule JSON document
        #[arg(short, long)]
        config: String,
        /// Day to book, e.g. 2026-03-16
        #[arg(short, long)]
        date: String,
        /// Slot start time, e.g. 09:00
        #[arg(short, long)]
        time: String,
        /// Booker's full name
        #[arg(long)]
        name: String,
        /// Booker's email address
        #[arg(long)]
        email: String,
        /// Optional phone number
        #[arg(long)]
        phone: Option<String>,
        /// Optional free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Busy intervals JSON exported from an external calendar
        #[arg(short, long)]
        busy: Option<String>,
        /// Pin the clock, e.g. 2026-03-16T08:00 (defaults to the system clock)
        #[arg(long)]
        now: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            let schedule = load_config(&config)?;
            print_summary(&schedule);
        }
        Commands::Month { config, month, now } => {
            let schedule = load_config(&config)?;
            let now = resolve_now(now.as_deref())?;
            let (year, month) = parse_month(&month)?;
            print_month(&schedule, now, year, month)?;
        }
        Commands::Slots {
            config,
            date,
            busy,
            now,
        } => {
            let schedule = load_config(&config)?;
            let now = resolve_now(now.as_deref())?;
            let date = parse_date(&date)?;
            let busy = fetch_busy_intervals(busy.as_deref(), &schedule, now).await;
            print_slots(&schedule, now, date, &busy);
        }
        Commands::Book {
            config,
            date,
            time,
            name,
            email,
            phone,
            notes,
            busy,
            now,
        } => {
            let schedule = load_config(&config)?;
            let now = resolve_now(now.as_deref())?;
            let date = parse_date(&date)?;
            let time = parse_time(&time)?;

            if !is_date_available(&schedule, now, date) {
                bail!("{} is not bookable", date);
            }
            let slots = generate_slots(&schedule, now, date);
            let Some(slot) = slots.iter().find(|s| s.time() == time) else {
                bail!(
                    "{} is not a bookable slot on {}",
                    time.format("%H:%M"),
                    date
                );
            };

            let busy = fetch_busy_intervals(busy.as_deref(), &schedule, now).await;
            if is_slot_blocked(&schedule, slot, &busy) {
                bail!(
                    "{} on {} is blocked by an existing calendar event",
                    time.format("%H:%M"),
                    date
                );
            }

            let mut session = BookingSession::new();
            session.select_date(date);
            session.select_time(time);
            let record = BookingRecord {
                date,
                time,
                name: name.clone(),
                email,
                phone,
                notes,
            };
            submit_booking(&mut session, &ConsoleNotifier, record)
                .await
                .context("Booking could not be submitted")?;
            println!("Booked {} at {} for {}.", date, time.format("%H:%M"), name);
        }
    }

    Ok(())
}

/// Weekday labels indexed by the Sunday-based weekday number.
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn print_summary(config: &ScheduleConfig) {
    let weekdays: Vec<&str> = config
        .available_weekdays
        .iter()
        .map(|&day| WEEKDAYS[day as usize])
        .collect();
    let calendar = match (
        config.external_calendar.enabled,
        config.external_calendar.check_conflicts,
    ) {
        (false, _) => "disabled",
        (true, true) => "enabled, conflict checking on",
        (true, false) => "enabled, conflict checking off",
    };

    println!("Configuration OK.");
    println!("Open weekdays:     {}", weekdays.join(" "));
    println!(
        "Default hours:     {} - {}",
        config.default_start.format("%H:%M"),
        config.default_end.format("%H:%M")
    );
    println!(
        "Slot length:       {} min + {} min gap",
        config.slot_duration_minutes, config.gap_minutes
    );
    println!("Booking window:    {} days", config.max_advance_booking_days);
    println!("Minimum notice:    {} hours", config.min_notice_hours);
    println!("Overrides:         {}", config.overrides.len());
    println!("Blocked dates:     {}", config.blocked_dates.len());
    if let Some(tz) = &config.timezone {
        println!("Timezone:          {}", tz);
    }
    println!("External calendar: {}", calendar);
}

fn print_month(
    config: &ScheduleConfig,
    now: NaiveDateTime,
    year: i32,
    month: u32,
) -> Result<()> {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => first,
        None => bail!("Invalid month '{}-{:02}'", year, month),
    };

    let title = first.format("%B %Y").to_string();
    println!("{}", format!("{:^20}", title).trim_end());
    println!("Su Mo Tu We Th Fr Sa");

    let mut line = "   ".repeat(weekday_number(first) as usize);
    let mut date = first;
    let mut open = 0u32;
    let mut total = 0u32;
    loop {
        total += 1;
        if is_date_available(config, now, date) {
            open += 1;
            line.push_str(&format!("{:>2} ", date.day()));
        } else {
            line.push_str(" · ");
        }
        if weekday_number(date) == 6 {
            println!("{}", line.trim_end());
            line.clear();
        }
        date = match date.succ_opt() {
            Some(next) if next.month() == month => next,
            _ => break,
        };
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }
    println!();
    println!("{} of {} days bookable", open, total);
    Ok(())
}

fn print_slots(
    config: &ScheduleConfig,
    now: NaiveDateTime,
    date: NaiveDate,
    busy: &[BusyInterval],
) {
    if !is_date_available(config, now, date) {
        println!("{} is not bookable.", date);
        return;
    }
    let slots = generate_slots(config, now, date);
    if slots.is_empty() {
        println!("No bookable slots for {}.", date);
        return;
    }

    println!("Bookable slots for {} ({}):", date, date.format("%A"));
    let mut open = 0u32;
    let mut blocked = 0u32;
    for slot in &slots {
        let status = if is_slot_blocked(config, slot, busy) {
            blocked += 1;
            "blocked"
        } else {
            open += 1;
            "open"
        };
        println!(
            "  {} - {}  {}",
            slot.time().format("%H:%M"),
            slot.end().format("%H:%M"),
            status
        );
    }
    println!("{} open, {} blocked", open, blocked);
}

fn load_config(path: &str) -> Result<ScheduleConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path))?;
    ScheduleConfig::from_json(&text)
        .with_context(|| format!("Invalid schedule configuration in {}", path))
}

fn resolve_now(arg: Option<&str>) -> Result<NaiveDateTime> {
    match arg {
        Some(s) => parse_datetime(s),
        None => Ok(chrono::Local::now().naive_local()),
    }
}

/// Accepts `2026-03-16T09:00:00` and the second-less `2026-03-16T09:00`.
fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .with_context(|| format!("Invalid datetime '{}': expected YYYY-MM-DDTHH:MM[:SS]", s))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    s.parse()
        .with_context(|| format!("Invalid date '{}': expected YYYY-MM-DD", s))
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .with_context(|| format!("Invalid time '{}': expected HH:MM", s))
}

fn parse_month(s: &str) -> Result<(i32, u32)> {
    let parsed = s
        .split_once('-')
        .and_then(|(y, m)| Some((y.parse::<i32>().ok()?, m.parse::<u32>().ok()?)))
        .filter(|(_, m)| (1..=12).contains(m));
    match parsed {
        Some(pair) => Ok(pair),
        None => bail!("Invalid month '{}': expected YYYY-MM", s),
    }
}

async fn fetch_busy_intervals(
    path: Option<&str>,
    config: &ScheduleConfig,
    now: NaiveDateTime,
) -> Vec<BusyInterval> {
    match path {
        Some(path) => {
            let source = FileCalendarSource::new(path);
            refresh_busy(&source, config, now).await
        }
        None => Vec::new(),
    }
}

/// Busy intervals exported to a JSON file, standing in for a live calendar.
struct FileCalendarSource {
    path: PathBuf,
}

impl FileCalendarSource {
    fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(path),
        }
    }
}

#[derive(Deserialize)]
struct BusyEntry {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[async_trait]
impl CalendarSource for FileCalendarSource {
    async fn fetch_busy(
        &self,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Result<Vec<BusyInterval>, SourceError> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| SourceError::Unreachable(format!("{}: {}", self.path.display(), e)))?;
        let entries: Vec<BusyEntry> =
            serde_json::from_str(&text).map_err(|e| SourceError::Malformed(e.to_string()))?;
        Ok(entries
            .into_iter()
            .filter(|e| e.start < window_end && e.end > window_start)
            .map(|e| BusyInterval {
                start: e.start,
                end: e.end,
            })
            .collect())
    }
}

/// Relay that prints the outbound booking payload instead of delivering it.
struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn send(&self, record: &BookingRecord) -> Result<(), NotifyError> {
        let payload = serde_json::to_string_pretty(record)
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        println!("{}", payload);
        Ok(())
    }
}
