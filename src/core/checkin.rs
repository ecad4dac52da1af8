use crate::core::schedule::due_on;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::checkin::Checkin;
use crate::models::habit::Habit;
use crate::ui::messages::warning;
use crate::utils::time::now_iso;
use chrono::NaiveDate;

pub struct CheckinLogic;

impl CheckinLogic {
    /// Record `done` for (habit, day).
    ///
    /// `note = None` keeps the note already stored for that day.
    pub fn mark(
        pool: &mut DbPool,
        habit: &Habit,
        day: NaiveDate,
        done: bool,
        note: Option<&str>,
    ) -> AppResult<Checkin> {
        if !habit.is_due_on(day) {
            warning(format!(
                "'{}' is not scheduled on {} ({}); saving anyway.",
                habit.name, day, habit.schedule
            ));
        }

        pool.with_tx(|tx| {
            let existing = queries::get_checkin(tx, habit.id, day)?;
            let note = match note {
                Some(n) => n.to_string(),
                None => existing.map(|c| c.note).unwrap_or_default(),
            };

            queries::upsert_checkin(tx, habit.id, day, done, &note, &now_iso())?;
            audit(
                tx,
                "checkin",
                &habit.name,
                &format!("{} marked {}", day, if done { "done" } else { "not done" }),
            )?;

            queries::get_checkin(tx, habit.id, day)?
                .ok_or_else(|| AppError::Other(format!("check-in for {} vanished", habit.name)))
        })
    }

    /// Mark every habit due on `day` as done, keeping existing notes.
    /// Returns how many habits were marked.
    pub fn mark_all_done(pool: &mut DbPool, day: NaiveDate) -> AppResult<usize> {
        let habits = queries::list_habits(&pool.conn)?;
        let due = due_on(&habits, day);

        pool.with_tx(|tx| {
            for h in &due {
                let note = queries::get_checkin(tx, h.id, day)?
                    .map(|c| c.note)
                    .unwrap_or_default();
                queries::upsert_checkin(tx, h.id, day, true, &note, &now_iso())?;
            }
            if !due.is_empty() {
                audit(
                    tx,
                    "checkin",
                    "all",
                    &format!("{} habit(s) marked done for {}", due.len(), day),
                )?;
            }
            Ok(due.len())
        })
    }

    /// Habits due on `day` with their check-in for that day, if any.
    pub fn day_entries(pool: &DbPool, day: NaiveDate) -> AppResult<Vec<(Habit, Option<Checkin>)>> {
        let habits = queries::list_habits(&pool.conn)?;
        let mut out = Vec::new();

        for h in habits.into_iter().filter(|h| h.is_due_on(day)) {
            let c = queries::get_checkin(&pool.conn, h.id, day)?;
            out.push((h, c));
        }

        Ok(out)
    }
}
