use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::DEFAULT_REMINDER_TIME;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Applied migrations are recorded in it.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn create_habits_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS habits (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL UNIQUE,
            description   TEXT DEFAULT '',
            schedule_type TEXT NOT NULL DEFAULT 'daily',
            custom_days   TEXT DEFAULT '',
            created_at    TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_checkins_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS checkins (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            habit_id    INTEGER NOT NULL,
            day         TEXT NOT NULL,
            done        INTEGER NOT NULL DEFAULT 1,
            note        TEXT DEFAULT '',
            created_at  TEXT NOT NULL,
            UNIQUE(habit_id, day),
            FOREIGN KEY (habit_id) REFERENCES habits(id) ON DELETE CASCADE
        );
        "#,
    )?;
    Ok(())
}

fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Range queries over all habits (`month`, `export --range`) filter on `day`.
fn migrate_add_checkins_day_index(conn: &Connection) -> Result<()> {
    let version = "20250301_0001_checkins_day_index";
    if is_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_checkins_day ON checkins(day);")?;
    mark_applied(conn, version, "Added day index to checkins")?;

    success(format!("Migration applied: {version} → index on checkins(day)"));
    Ok(())
}

/// Store the default reminder time so it shows up in `settings` listings.
fn migrate_seed_reminder_time(conn: &Connection) -> Result<()> {
    let version = "20250310_0002_seed_reminder_time";
    if is_applied(conn, version)? {
        return Ok(());
    }

    conn.execute(
        "INSERT OR IGNORE INTO settings (key, value) VALUES ('reminder_time', ?1)",
        [DEFAULT_REMINDER_TIME],
    )?;
    mark_applied(conn, version, "Seeded reminder_time setting")?;

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called by db::init_db() and `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for (name, create) in [
        ("habits", create_habits_table as fn(&Connection) -> Result<()>),
        ("checkins", create_checkins_table),
        ("settings", create_settings_table),
    ] {
        if !table_exists(conn, name)? {
            create(conn)?;
            success(format!("Created {name} table."));
        }
    }

    migrate_add_checkins_day_index(conn)?;
    migrate_seed_reminder_time(conn)?;

    Ok(())
}
