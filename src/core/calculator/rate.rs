use super::{checkin_lookup, done_on};
use crate::core::schedule::due_days;
use crate::models::checkin::Checkin;
use crate::models::habit::Habit;
use chrono::NaiveDate;
use serde::Serialize;

/// Due / done tallies for a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SuccessStats {
    pub due: u32,
    pub done: u32,
}

impl SuccessStats {
    /// `done / due`, or `None` when nothing was due in the window.
    pub fn rate(&self) -> Option<f64> {
        (self.due > 0).then(|| f64::from(self.done) / f64::from(self.due))
    }
}

pub fn success_stats(
    habit: &Habit,
    checkins: &[Checkin],
    start: NaiveDate,
    end: NaiveDate,
) -> SuccessStats {
    let lookup = checkin_lookup(checkins);
    let due = due_days(habit, start, end);
    let done = due.iter().filter(|d| done_on(&lookup, **d)).count();

    SuccessStats {
        due: due.len() as u32,
        done: done as u32,
    }
}

/// Share of due days in `start..=end` that were done, in `[0, 1]`.
///
/// A window without due days yields 0.0; use [`success_stats`] to tell that
/// apart from a window where every due day was missed.
pub fn success_rate(habit: &Habit, checkins: &[Checkin], start: NaiveDate, end: NaiveDate) -> f64 {
    success_stats(habit, checkins, start, end)
        .rate()
        .unwrap_or(0.0)
}
