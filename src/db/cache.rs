//! Read-through cache for habit and check-in lists.
//!
//! Entries expire after a short TTL. Writers must invalidate what they touch:
//! nothing here watches the database.

use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::checkin::Checkin;
use crate::models::habit::Habit;
use moka::sync::Cache;
use std::time::Duration;

/// moka panics on TTLs over 1000 years.
const MAX_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub struct QueryCache {
    ttl: Duration,
    habits: Cache<(), Vec<Habit>>,
    checkins: Cache<i64, Vec<Checkin>>,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        let ttl = ttl.min(MAX_TTL);
        Self {
            ttl,
            habits: Cache::builder().time_to_live(ttl).build(),
            checkins: Cache::builder().time_to_live(ttl).build(),
        }
    }

    pub fn with_ttl_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// All habits sorted by name.
    pub fn habits(&self, pool: &DbPool) -> AppResult<Vec<Habit>> {
        if let Some(v) = self.habits.get(&()) {
            return Ok(v);
        }

        let value = queries::list_habits(&pool.conn)?;
        if !self.ttl.is_zero() {
            self.habits.insert((), value.clone());
        }
        Ok(value)
    }

    /// Check-ins of one habit ordered by day.
    pub fn checkins_for(&self, pool: &DbPool, habit_id: i64) -> AppResult<Vec<Checkin>> {
        if let Some(v) = self.checkins.get(&habit_id) {
            return Ok(v);
        }

        let value = queries::list_checkins_for_habit(&pool.conn, habit_id)?;
        if !self.ttl.is_zero() {
            self.checkins.insert(habit_id, value.clone());
        }
        Ok(value)
    }

    pub fn invalidate_habits(&self) {
        self.habits.invalidate(&());
    }

    pub fn invalidate_checkins(&self, habit_id: i64) {
        self.checkins.invalidate(&habit_id);
    }

    /// Drop everything, e.g. after a habit delete removed its check-ins.
    pub fn clear(&self) {
        self.habits.invalidate_all();
        self.checkins.invalidate_all();
    }
}
