use super::{checkin_lookup, done_on};
use crate::core::schedule::is_due;
use crate::models::checkin::Checkin;
use crate::models::habit::Habit;
use crate::utils::date::date_range;
use chrono::NaiveDate;

/// How far back the current-streak walk may go without finding a done due day.
pub const STREAK_LOOKBACK_DAYS: i64 = 60;

/// Consecutive done due days ending at `today`, walking backwards.
///
/// Non-due days are skipped without breaking the streak. The first due day
/// without a done check-in stops the walk. If the walk drifts more than
/// [`STREAK_LOOKBACK_DAYS`] back while the streak is still zero (a schedule
/// that is never due), the result is 0.
pub fn current_streak(habit: &Habit, checkins: &[Checkin], today: NaiveDate) -> u32 {
    let lookup = checkin_lookup(checkins);
    let mut streak = 0;
    let mut cur = today;

    loop {
        if !is_due(habit, cur) {
            cur = match cur.pred_opt() {
                Some(d) => d,
                None => return streak,
            };
            if streak == 0 && (today - cur).num_days() > STREAK_LOOKBACK_DAYS {
                return 0;
            }
            continue;
        }

        if !done_on(&lookup, cur) {
            return streak;
        }

        streak += 1;
        cur = match cur.pred_opt() {
            Some(d) => d,
            None => return streak,
        };
    }
}

/// Longest run of done due days inside `start..=end`.
///
/// Non-due days neither extend nor reset the run; a missed due day resets it.
pub fn longest_streak(habit: &Habit, checkins: &[Checkin], start: NaiveDate, end: NaiveDate) -> u32 {
    let lookup = checkin_lookup(checkins);
    let mut longest = 0;
    let mut running = 0;

    for d in date_range(start, end).filter(|d| is_due(habit, *d)) {
        if done_on(&lookup, d) {
            running += 1;
            longest = longest.max(running);
        } else {
            running = 0;
        }
    }

    longest
}
