pub mod calendar;
pub mod progress;
pub mod rate;
pub mod streak;

use crate::models::checkin::Checkin;
use chrono::NaiveDate;
use std::collections::HashMap;

/// `day → done` for one habit's check-ins.
pub(crate) fn checkin_lookup(checkins: &[Checkin]) -> HashMap<NaiveDate, bool> {
    checkins.iter().map(|c| (c.day, c.done)).collect()
}

/// True only when a check-in exists for `day` and is marked done.
pub(crate) fn done_on(lookup: &HashMap<NaiveDate, bool>, day: NaiveDate) -> bool {
    lookup.get(&day).copied().unwrap_or(false)
}
