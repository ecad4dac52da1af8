use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET};
use chrono::NaiveDate;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}", CYAN, RESET, db_path);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) ROW COUNTS
    //
    let habits: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM habits", [], |row| row.get(0))?;
    let checkins: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM checkins", [], |row| row.get(0))?;
    let done: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM checkins WHERE done = 1",
        [],
        |row| row.get(0),
    )?;

    println!("{}• Habits:{} {}{}{}", CYAN, RESET, GREEN, habits, RESET);
    println!(
        "{}• Check-ins:{} {}{}{} ({} done)",
        CYAN, RESET, GREEN, checkins, RESET, done
    );

    //
    // 3) DATE RANGE
    //
    let first_day: Option<String> = pool
        .conn
        .query_row("SELECT MIN(day) FROM checkins", [], |row| {
            row.get::<_, Option<String>>(0)
        })?;
    let last_day: Option<String> = pool
        .conn
        .query_row("SELECT MAX(day) FROM checkins", [], |row| {
            row.get::<_, Option<String>>(0)
        })?;

    let fmt_first = first_day
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_day
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Check-in range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE CHECK-INS/DAY
    //
    if let (Some(f), Some(l)) = (first_day, last_day) {
        let d1 = parse_day(&f)?;
        let d2 = parse_day(&l)?;
        let days = (d2 - d1).num_days() + 1;

        let avg = checkins as f64 / days as f64;
        println!("{}• Average check-ins/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}

fn parse_day(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
