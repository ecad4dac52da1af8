use crate::core::calculator::progress::{DailyProgress, daily_progress};
use crate::core::calculator::rate::{SuccessStats, success_stats};
use crate::core::calculator::streak::{current_streak, longest_streak};
use crate::db::cache::QueryCache;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::habit::Habit;
use crate::utils::parse::Parsed;
use crate::utils::time::{DEFAULT_REMINDER_TIME, parse_reminder_time};
use chrono::{Duration, NaiveDate, NaiveTime};

pub const REMINDER_TIME_KEY: &str = "reminder_time";

/// A habit due today as shown on the dashboard.
#[derive(Debug, Clone)]
pub struct TodayItem {
    pub habit: Habit,
    pub done: bool,
    pub note: String,
    pub streak: u32,
    pub window: SuccessStats,
}

#[derive(Debug, Clone)]
pub struct TodayView {
    pub day: NaiveDate,
    pub habit_count: usize,
    pub items: Vec<TodayItem>,
    /// Raw setting value, for display.
    pub reminder_raw: String,
    pub reminder: Parsed<NaiveTime>,
}

impl TodayView {
    /// Due habits not yet marked done.
    pub fn open_items(&self) -> usize {
        self.items.iter().filter(|i| !i.done).count()
    }
}

/// Streaks and rate of one habit over a window.
#[derive(Debug, Clone)]
pub struct HabitStats {
    pub habit: Habit,
    pub current: u32,
    pub longest: u32,
    pub window: SuccessStats,
}

/// Longest rate window accepted, about ten years.
pub const MAX_WINDOW_DAYS: i64 = 3660;

/// `(end - days + 1) ..= end`; a 28-day window ending today starts 27 days ago.
///
/// Fails for windows outside `1..=MAX_WINDOW_DAYS` or reaching before the
/// earliest representable date.
pub fn rate_window(end: NaiveDate, days: i64) -> AppResult<(NaiveDate, NaiveDate)> {
    if !(1..=MAX_WINDOW_DAYS).contains(&days) {
        return Err(AppError::InvalidWindow(days));
    }
    Duration::try_days(days - 1)
        .and_then(|span| end.checked_sub_signed(span))
        .map(|start| (start, end))
        .ok_or(AppError::InvalidWindow(days))
}

pub struct DashboardLogic;

impl DashboardLogic {
    pub fn today(
        pool: &DbPool,
        cache: &QueryCache,
        day: NaiveDate,
        window_days: i64,
    ) -> AppResult<TodayView> {
        let habits = cache.habits(pool)?;
        let (start, end) = rate_window(day, window_days)?;

        let mut items = Vec::new();
        for h in habits.iter().filter(|h| h.is_due_on(day)) {
            let checkin = queries::get_checkin(&pool.conn, h.id, day)?;
            let checkins = cache.checkins_for(pool, h.id)?;

            items.push(TodayItem {
                habit: h.clone(),
                done: checkin.as_ref().is_some_and(|c| c.done),
                note: checkin.map(|c| c.note).unwrap_or_default(),
                streak: current_streak(h, &checkins, day),
                window: success_stats(h, &checkins, start, end),
            });
        }

        let reminder_raw =
            queries::get_setting(&pool.conn, REMINDER_TIME_KEY, DEFAULT_REMINDER_TIME)?;
        let reminder = parse_reminder_time(&reminder_raw);

        Ok(TodayView {
            day,
            habit_count: habits.len(),
            items,
            reminder_raw,
            reminder,
        })
    }

    /// Progress table over all habits for `start..=end`.
    pub fn month(
        pool: &DbPool,
        cache: &QueryCache,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DailyProgress>> {
        let mut joined = Vec::new();
        for h in cache.habits(pool)? {
            let checkins = cache.checkins_for(pool, h.id)?;
            joined.push((h, checkins));
        }
        Ok(daily_progress(&joined, start, end))
    }

    pub fn stats(
        pool: &DbPool,
        cache: &QueryCache,
        habits: &[Habit],
        end: NaiveDate,
        window_days: i64,
    ) -> AppResult<Vec<HabitStats>> {
        let (start, end) = rate_window(end, window_days)?;

        let mut out = Vec::new();
        for h in habits {
            let checkins = cache.checkins_for(pool, h.id)?;
            out.push(HabitStats {
                habit: h.clone(),
                current: current_streak(h, &checkins, end),
                longest: longest_streak(h, &checkins, start, end),
                window: success_stats(h, &checkins, start, end),
            });
        }
        Ok(out)
    }
}
