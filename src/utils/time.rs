//! Time utilities: timestamps, HH:MM parsing and the reminder check.

use crate::utils::parse::Parsed;
use chrono::{Local, NaiveDateTime, NaiveTime};

/// Fallback when the `reminder_time` setting is missing or unreadable.
pub const DEFAULT_REMINDER_TIME: &str = "18:00";

/// Local timestamp with seconds precision, used for `created_at` columns.
pub fn now_iso() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

fn default_reminder() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Parse the reminder time, falling back to 18:00.
pub fn parse_reminder_time(text: &str) -> Parsed<NaiveTime> {
    match parse_time(text) {
        Some(t) => Parsed::ok(t),
        None => Parsed::fallback(default_reminder()),
    }
}

/// True when something is still open and `now` is at or past the reminder
/// time on its own day.
pub fn reminder_due(now: NaiveDateTime, reminder: NaiveTime, open_items: usize) -> bool {
    open_items > 0 && now.time() >= reminder
}
