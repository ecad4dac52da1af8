use super::checkin_lookup;
use crate::core::schedule::is_due;
use crate::models::checkin::Checkin;
use crate::models::habit::Habit;
use crate::models::schedule::WEEKDAY_NAMES;
use crate::utils::date::{date_range, week_start};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One cell of the week-aligned month calendar for a habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub day: NaiveDate,
    /// Day of month, `None` for the leading days of the previous month.
    pub day_num: Option<u32>,
    /// Always false outside the month, whatever the schedule says.
    pub due: bool,
    /// `Some` only for due days that have a check-in.
    pub done: Option<bool>,
    /// 0 = Monday.
    pub dow: u32,
    /// Week row, counted from the Monday on/before the first of the month.
    pub week: u32,
}

/// Calendar cells from the Monday on/before `month_start` through `month_end`.
pub fn calendar_grid(
    habit: &Habit,
    checkins: &[Checkin],
    month_start: NaiveDate,
    month_end: NaiveDate,
) -> Vec<CalendarCell> {
    let lookup = checkin_lookup(checkins);
    let first_monday = week_start(month_start);

    date_range(first_monday, month_end)
        .map(|d| {
            let in_month = month_start <= d && d <= month_end;
            let due = in_month && is_due(habit, d);
            CalendarCell {
                day: d,
                day_num: in_month.then(|| d.day()),
                due,
                done: if due { lookup.get(&d).copied() } else { None },
                dow: d.weekday().num_days_from_monday(),
                week: ((d - first_monday).num_days() / 7) as u32,
            }
        })
        .collect()
}

/// Text rendering: one line per week, Monday first.
/// `✔` done, `✘` missed/recorded not done, `·` due without check-in, blank when not due.
pub fn render_calendar(cells: &[CalendarCell]) -> String {
    let mut out: String = WEEKDAY_NAMES
        .iter()
        .map(|n| format!("{:>3} ", &n[..2]))
        .collect();
    out.push('\n');
    let mut current_week = 0;

    for cell in cells {
        if cell.week != current_week {
            out.push('\n');
            current_week = cell.week;
        }

        let mark = match (cell.due, cell.done) {
            (false, _) => ' ',
            (true, Some(true)) => '✔',
            (true, Some(false)) => '✘',
            (true, None) => '·',
        };

        match cell.day_num {
            Some(n) => out.push_str(&format!("{n:>3}{mark}")),
            None => out.push_str("    "),
        }
    }

    out.push('\n');
    out
}
