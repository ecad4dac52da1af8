use crate::core::session::HabitSession;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::habit::{Habit, HabitForm};
use crate::models::schedule::Schedule;
use crate::ui::messages::warning;
use crate::utils::time::now_iso;

/// High-level business logic for creating, editing and deleting habits.
pub struct HabitLogic;

impl HabitLogic {
    /// Resolve a habit given by exact name or numeric id.
    pub fn resolve(pool: &DbPool, key: &str) -> AppResult<Habit> {
        queries::find_habit(&pool.conn, key)?.ok_or_else(|| AppError::HabitNotFound(key.to_string()))
    }

    /// Create a habit, or update `session.edit_id` when set.
    /// On success the session leaves edit mode. Returns the habit id.
    pub fn save(pool: &mut DbPool, session: &mut HabitSession, form: &HabitForm) -> AppResult<i64> {
        if form.name.trim().is_empty() {
            return Err(AppError::EmptyName);
        }

        if let Schedule::Custom(days) = &form.schedule
            && days.is_empty()
        {
            warning(format!(
                "'{}' has a custom schedule without days: it will never be due.",
                form.name
            ));
        }

        let id = pool.with_tx(|tx| match session.edit_id {
            Some(id) => {
                if queries::update_habit(tx, id, form)? == 0 {
                    return Err(AppError::HabitNotFound(id.to_string()));
                }
                audit(tx, "edit", &form.name, &format!("Habit updated ({})", form.schedule))?;
                Ok(id)
            }
            None => {
                let id = queries::create_habit(tx, form, &now_iso())?;
                audit(tx, "add", &form.name, &format!("Habit created ({})", form.schedule))?;
                Ok(id)
            }
        })?;

        session.edit_id = None;
        Ok(id)
    }

    /// Delete the habit in `session.edit_id` together with its check-ins.
    ///
    /// Does nothing and returns `Ok(None)` unless deletion was confirmed.
    pub fn delete(pool: &mut DbPool, session: &mut HabitSession) -> AppResult<Option<Habit>> {
        let Some(id) = session.edit_id else {
            return Ok(None);
        };
        if !session.confirm_delete {
            return Ok(None);
        }

        let habit = pool.with_tx(|tx| {
            let habit = queries::get_habit(tx, id)?
                .ok_or_else(|| AppError::HabitNotFound(id.to_string()))?;
            queries::delete_habit(tx, id)?;
            audit(tx, "del", &habit.name, "Habit and its check-ins deleted")?;
            Ok(habit)
        })?;

        session.reset();
        Ok(Some(habit))
    }
}
