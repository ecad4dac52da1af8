use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{CheckinExport, HabitExport};
use crate::export::range::parse_range;
use crate::models::habit::Habit;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export check-ins (or, with `habits_only`, the habit list).
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or an expression accepted by
    ///   [`parse_range`]; ignored for the habit list
    ///
    /// Returns the number of exported rows.
    pub fn export(
        pool: &DbPool,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        habits_only: bool,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let habits = queries::list_habits(&pool.conn)?;

        let rows = if habits_only {
            let items: Vec<HabitExport> = habits.iter().map(HabitExport::from).collect();
            write_items(&items, format, path, force)?
        } else {
            let items = load_checkins(pool, &habits, bounds)?;
            write_items(&items, format, path, force)?
        };

        if rows > 0 {
            audit_quiet(
                &pool.conn,
                "export",
                &path.to_string_lossy(),
                &format!("{} rows exported as {}", rows, format.as_str()),
            );
        }

        Ok(rows)
    }
}

fn write_items<T: Serialize>(
    items: &[T],
    format: ExportFormat,
    path: &Path,
    force: bool,
) -> AppResult<usize> {
    if items.is_empty() {
        warning("No data found for the selected range.");
        return Ok(0);
    }

    ensure_writable(path, force)?;

    match format {
        ExportFormat::Csv => export_csv(items, path)?,
        ExportFormat::Json => export_json(items, path)?,
    }

    Ok(items.len())
}

/// Check-ins inside the bounds (all when `None`), ordered by day then habit.
fn load_checkins(
    pool: &DbPool,
    habits: &[Habit],
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<CheckinExport>> {
    let names: HashMap<i64, &str> = habits.iter().map(|h| (h.id, h.name.as_str())).collect();

    let checkins = match bounds {
        Some((start, end)) => queries::list_checkins_between(&pool.conn, start, end)?,
        None => {
            let mut all = Vec::new();
            for h in habits {
                all.extend(queries::list_checkins_for_habit(&pool.conn, h.id)?);
            }
            all.sort_by(|a, b| a.day.cmp(&b.day).then(a.habit_id.cmp(&b.habit_id)));
            all
        }
    };

    Ok(checkins
        .iter()
        .map(|c| CheckinExport::from_checkin(c, names.get(&c.habit_id).copied().unwrap_or("")))
        .collect())
}
