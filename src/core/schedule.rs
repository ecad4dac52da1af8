//! Due-day evaluation on top of [`Schedule`](crate::models::schedule::Schedule).

use crate::models::habit::Habit;
use crate::utils::date::date_range;
use chrono::NaiveDate;

/// Whether `habit` is due on `day`. Pure function of its schedule.
pub fn is_due(habit: &Habit, day: NaiveDate) -> bool {
    habit.is_due_on(day)
}

/// Due days of `habit` in the inclusive range `start..=end`.
pub fn due_days(habit: &Habit, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    date_range(start, end).filter(|d| is_due(habit, *d)).collect()
}

/// Habits from `habits` that are due on `day`, keeping their order.
pub fn due_on<'a>(habits: &'a [Habit], day: NaiveDate) -> Vec<&'a Habit> {
    habits.iter().filter(|h| is_due(h, day)).collect()
}
