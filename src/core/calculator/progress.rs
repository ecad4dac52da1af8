use super::{checkin_lookup, done_on};
use crate::core::schedule::is_due;
use crate::models::checkin::Checkin;
use crate::models::habit::Habit;
use crate::utils::date::date_range;
use chrono::NaiveDate;
use serde::Serialize;

/// One day of the month progress table, summed over all habits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyProgress {
    pub day: NaiveDate,
    pub due: u32,
    pub done: u32,
    pub cum_due: u32,
    pub cum_done: u32,
    /// `done / due` for this day; 0.0 when nothing was due.
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthTotals {
    pub due: u32,
    pub done: u32,
    pub rate: f64,
}

/// Per-day due/done counts with running totals for `start..=end`.
pub fn daily_progress(
    habits: &[(Habit, Vec<Checkin>)],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DailyProgress> {
    let lookups: Vec<_> = habits
        .iter()
        .map(|(h, checkins)| (h, checkin_lookup(checkins)))
        .collect();

    let mut rows = Vec::new();
    let (mut cum_due, mut cum_done) = (0, 0);

    for day in date_range(start, end) {
        let (mut due, mut done) = (0, 0);

        for (habit, lookup) in &lookups {
            if is_due(habit, day) {
                due += 1;
                if done_on(lookup, day) {
                    done += 1;
                }
            }
        }

        cum_due += due;
        cum_done += done;

        rows.push(DailyProgress {
            day,
            due,
            done,
            cum_due,
            cum_done,
            completion_rate: if due > 0 {
                f64::from(done) / f64::from(due)
            } else {
                0.0
            },
        });
    }

    rows
}

/// Completions, due count and overall rate of a progress table.
pub fn month_totals(rows: &[DailyProgress]) -> MonthTotals {
    let due: u32 = rows.iter().map(|r| r.due).sum();
    let done: u32 = rows.iter().map(|r| r.done).sum();

    MonthTotals {
        due,
        done,
        rate: if due > 0 {
            f64::from(done) / f64::from(due)
        } else {
            0.0
        },
    }
}
