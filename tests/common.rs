#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rhabits::models::checkin::Checkin;
use rhabits::models::habit::Habit;
use rhabits::models::schedule::Schedule;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rh() -> Command {
    cargo_bin_cmd!("rhabits")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rhabits.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB in test mode (no config file is written)
pub fn init_db(db_path: &str) {
    rh().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB with two habits: "Read" (daily) and "Gym" (Mon/Wed/Fri)
pub fn init_db_with_habits(db_path: &str) {
    init_db(db_path);

    rh().args(["--db", db_path, "habit", "add", "Read", "--desc", "20 pages"])
        .assert()
        .success();

    rh().args(["--db", db_path, "habit", "add", "Gym", "--days", "mon,wed,fri"])
        .assert()
        .success();
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid test date")
}

pub fn habit(id: i64, schedule: Schedule) -> Habit {
    Habit {
        id,
        name: format!("habit-{id}"),
        description: String::new(),
        schedule,
        created_at: "2025-01-01T08:00:00".to_string(),
    }
}

pub fn checkin(habit_id: i64, day: NaiveDate, done: bool) -> Checkin {
    Checkin {
        id: 0,
        habit_id,
        day,
        done,
        note: String::new(),
        created_at: "2025-01-01T08:00:00".to_string(),
    }
}
