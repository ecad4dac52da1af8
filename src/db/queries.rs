use crate::errors::{AppError, AppResult};
use crate::models::checkin::Checkin;
use crate::models::habit::{Habit, HabitForm};
use crate::models::schedule::Schedule;
use chrono::NaiveDate;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Result, Row, params};

const HABIT_COLUMNS: &str = "id, name, description, schedule_type, custom_days, created_at";
const CHECKIN_COLUMNS: &str = "id, habit_id, day, done, note, created_at";

fn day_str(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

pub fn map_habit_row(row: &Row) -> Result<Habit> {
    let kind: String = row.get("schedule_type")?;
    let custom_days: Option<String> = row.get("custom_days")?;

    Ok(Habit {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get::<_, Option<String>>("description")?.unwrap_or_default(),
        schedule: Schedule::from_db(&kind, custom_days.as_deref().unwrap_or("")),
        created_at: row.get("created_at")?,
    })
}

pub fn map_checkin_row(row: &Row) -> Result<Checkin> {
    let day_raw: String = row.get("day")?;

    let day = NaiveDate::parse_from_str(&day_raw, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(day_raw.clone())),
        )
    })?;

    Ok(Checkin {
        id: row.get("id")?,
        habit_id: row.get("habit_id")?,
        day,
        done: row.get::<_, i64>("done")? != 0,
        note: row.get::<_, Option<String>>("note")?.unwrap_or_default(),
        created_at: row.get("created_at")?,
    })
}

/// Constraint failures on habit writes collapse into one user-facing error.
fn map_save_error(e: rusqlite::Error, name: &str) -> AppError {
    match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => AppError::HabitNotSaved(name.to_string()),
        _ => AppError::Db(e),
    }
}

// --- Habits -----------------------------------------------------------------

pub fn list_habits(conn: &Connection) -> AppResult<Vec<Habit>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {HABIT_COLUMNS} FROM habits ORDER BY name"
    ))?;

    let rows = stmt.query_map([], map_habit_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_habit(conn: &Connection, id: i64) -> AppResult<Option<Habit>> {
    let habit = conn
        .query_row(
            &format!("SELECT {HABIT_COLUMNS} FROM habits WHERE id = ?1"),
            [id],
            map_habit_row,
        )
        .optional()?;
    Ok(habit)
}

/// Look a habit up by exact name first, then by numeric id.
pub fn find_habit(conn: &Connection, key: &str) -> AppResult<Option<Habit>> {
    let key = key.trim();

    let by_name = conn
        .query_row(
            &format!("SELECT {HABIT_COLUMNS} FROM habits WHERE name = ?1"),
            [key],
            map_habit_row,
        )
        .optional()?;
    if by_name.is_some() {
        return Ok(by_name);
    }

    match key.parse::<i64>() {
        Ok(id) => get_habit(conn, id),
        Err(_) => Ok(None),
    }
}

pub fn create_habit(conn: &Connection, form: &HabitForm, created_at: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO habits (name, description, schedule_type, custom_days, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            form.name.trim(),
            form.description.trim(),
            form.schedule.kind_str(),
            form.schedule.custom_days_str(),
            created_at,
        ],
    )
    .map_err(|e| map_save_error(e, &form.name))?;

    Ok(conn.last_insert_rowid())
}

/// Returns the number of rows touched (0 when the id does not exist).
pub fn update_habit(conn: &Connection, id: i64, form: &HabitForm) -> AppResult<usize> {
    let n = conn
        .execute(
            "UPDATE habits
                SET name = ?1, description = ?2, schedule_type = ?3, custom_days = ?4
              WHERE id = ?5",
            params![
                form.name.trim(),
                form.description.trim(),
                form.schedule.kind_str(),
                form.schedule.custom_days_str(),
                id,
            ],
        )
        .map_err(|e| map_save_error(e, &form.name))?;
    Ok(n)
}

/// Deletes the habit; its check-ins go with it (ON DELETE CASCADE).
pub fn delete_habit(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM habits WHERE id = ?1", [id])?)
}

// --- Check-ins --------------------------------------------------------------

/// Create or update the check-in for (habit, day).
/// On conflict only `done` and `note` change; `created_at` keeps the first value.
pub fn upsert_checkin(
    conn: &Connection,
    habit_id: i64,
    day: NaiveDate,
    done: bool,
    note: &str,
    created_at: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO checkins (habit_id, day, done, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(habit_id, day) DO UPDATE SET
             done = excluded.done,
             note = excluded.note",
        params![
            habit_id,
            day_str(day),
            if done { 1 } else { 0 },
            note.trim(),
            created_at
        ],
    )?;
    Ok(())
}

pub fn get_checkin(conn: &Connection, habit_id: i64, day: NaiveDate) -> AppResult<Option<Checkin>> {
    let c = conn
        .query_row(
            &format!("SELECT {CHECKIN_COLUMNS} FROM checkins WHERE habit_id = ?1 AND day = ?2"),
            params![habit_id, day_str(day)],
            map_checkin_row,
        )
        .optional()?;
    Ok(c)
}

pub fn list_checkins_for_habit(conn: &Connection, habit_id: i64) -> AppResult<Vec<Checkin>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CHECKIN_COLUMNS} FROM checkins WHERE habit_id = ?1 ORDER BY day"
    ))?;

    let rows = stmt.query_map([habit_id], map_checkin_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// All check-ins with `start <= day <= end`, across habits.
pub fn list_checkins_between(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<Checkin>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CHECKIN_COLUMNS} FROM checkins
          WHERE day >= ?1 AND day <= ?2
          ORDER BY day, habit_id"
    ))?;

    let rows = stmt.query_map(params![day_str(start), day_str(end)], map_checkin_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// --- Settings ---------------------------------------------------------------

pub fn get_setting(conn: &Connection, key: &str, default: &str) -> AppResult<String> {
    let value: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value.unwrap_or_else(|| default.to_string()))
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        [key, value],
    )?;
    Ok(())
}

pub fn list_settings(conn: &Connection) -> AppResult<Vec<(String, String)>> {
    let mut stmt = conn.prepare("SELECT key, value FROM settings ORDER BY key")?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
