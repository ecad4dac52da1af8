use crate::utils::parse::Parsed;
use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Weekday labels, index 0 = Monday.
pub const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const WEEKDAY_FULL_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Set of weekday indices (0 = Monday .. 6 = Sunday).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeekdaySet(BTreeSet<u32>);

impl WeekdaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set keeping only indices in 0..=6.
    pub fn from_indices<I: IntoIterator<Item = u32>>(indices: I) -> Self {
        let mut set = Self::new();
        for i in indices {
            set.insert(i);
        }
        set
    }

    /// Returns false (and ignores the value) when `idx` is not a weekday index.
    pub fn insert(&mut self, idx: u32) -> bool {
        if idx > 6 {
            return false;
        }
        self.0.insert(idx);
        true
    }

    pub fn contains(&self, idx: u32) -> bool {
        self.0.contains(&idx)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Storage form: sorted, comma-separated indices ("0,2,4").
    pub fn to_db_string(&self) -> String {
        self.iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Human form: "Mon, Wed, Fri".
    pub fn labels(&self) -> String {
        self.iter()
            .map(|d| WEEKDAY_NAMES[d as usize])
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse the stored `custom_days` column ("0,2,4").
///
/// Empty tokens are ignored; non-integer and out-of-range tokens are skipped
/// and make the result invalid.
pub fn parse_custom_days(text: &str) -> Parsed<WeekdaySet> {
    parse_tokens(text, |t| t.parse::<u32>().ok())
}

/// Inverse of [`parse_custom_days`].
pub fn days_to_string(set: &WeekdaySet) -> String {
    set.to_db_string()
}

/// Parse a weekday list typed on the command line.
///
/// Accepts indices ("0,2,4") as well as names ("mon,wed,fri", "Monday").
pub fn parse_day_list(text: &str) -> Parsed<WeekdaySet> {
    parse_tokens(text, |t| {
        t.parse::<u32>().ok().or_else(|| weekday_from_name(t))
    })
}

fn parse_tokens<F>(text: &str, token_to_index: F) -> Parsed<WeekdaySet>
where
    F: Fn(&str) -> Option<u32>,
{
    let mut set = WeekdaySet::new();
    let mut valid = true;

    for token in text.trim().split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token_to_index(token) {
            Some(idx) if set.insert(idx) => {}
            _ => valid = false,
        }
    }

    Parsed { value: set, valid }
}

/// Exact three-letter abbreviation or full name, any case.
fn weekday_from_name(token: &str) -> Option<u32> {
    let lower = token.to_lowercase();
    WEEKDAY_NAMES
        .iter()
        .zip(WEEKDAY_FULL_NAMES)
        .position(|(short, full)| lower == short.to_lowercase() || lower == full)
        .map(|i| i as u32)
}

/// Schedule kinds selectable from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScheduleKind {
    Daily,
    Weekdays,
    Custom,
}

/// When a habit is due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "days", rename_all = "snake_case")]
pub enum Schedule {
    Daily,
    /// Monday to Friday.
    Weekdays,
    Custom(WeekdaySet),
    /// A `schedule_type` value this version does not know. Kept verbatim so
    /// it round-trips through the database untouched.
    Unknown(String),
}

impl Schedule {
    /// Rebuild a schedule from the `schedule_type` / `custom_days` columns.
    pub fn from_db(kind: &str, custom_days: &str) -> Self {
        match kind {
            "daily" => Schedule::Daily,
            "weekdays" => Schedule::Weekdays,
            "custom" => Schedule::Custom(parse_custom_days(custom_days).into_inner()),
            other => Schedule::Unknown(other.to_string()),
        }
    }

    pub fn from_kind(kind: ScheduleKind, days: WeekdaySet) -> Self {
        match kind {
            ScheduleKind::Daily => Schedule::Daily,
            ScheduleKind::Weekdays => Schedule::Weekdays,
            ScheduleKind::Custom => Schedule::Custom(days),
        }
    }

    /// Value for the `schedule_type` column.
    pub fn kind_str(&self) -> &str {
        match self {
            Schedule::Daily => "daily",
            Schedule::Weekdays => "weekdays",
            Schedule::Custom(_) => "custom",
            Schedule::Unknown(raw) => raw,
        }
    }

    /// Value for the `custom_days` column (empty unless custom).
    pub fn custom_days_str(&self) -> String {
        match self {
            Schedule::Custom(days) => days_to_string(days),
            _ => String::new(),
        }
    }

    /// Whether the schedule requires action on `day`.
    ///
    /// Unknown kinds fail open and are always due.
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        let idx = day.weekday().num_days_from_monday();
        match self {
            Schedule::Daily => true,
            Schedule::Weekdays => idx < 5,
            Schedule::Custom(days) => days.contains(idx),
            Schedule::Unknown(_) => true,
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schedule::Daily => write!(f, "daily"),
            Schedule::Weekdays => write!(f, "weekdays"),
            Schedule::Custom(days) if days.is_empty() => write!(f, "custom (none)"),
            Schedule::Custom(days) => write!(f, "custom ({})", days.labels()),
            Schedule::Unknown(raw) => write!(f, "unknown ({raw})"),
        }
    }
}
