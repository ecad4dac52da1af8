use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{d, init_db_with_habits, rh, setup_test_db, temp_out};

use rhabits::export::range::parse_range;

fn checkin_days(db_path: &str, habit: &str, days: &[&str]) {
    for day in days {
        rh().args(["--db", db_path, "checkin", habit, "--date", day])
            .assert()
            .success();
    }
}

#[test]
fn test_export_csv_with_range() {
    let db_path = setup_test_db("export_csv_range");
    let out = temp_out("export_csv_range", "csv");
    init_db_with_habits(&db_path);
    checkin_days(&db_path, "Read", &["2025-08-31", "2025-09-01", "2025-09-15"]);
    checkin_days(&db_path, "Gym", &["2025-09-01"]);

    rh().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "2025-09",
    ])
    .assert()
    .success()
    .stdout(contains("CSV export completed (3 rows)"));

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("habit_id,habit,day,done,note,created_at")
    );
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].contains("2025-09-01"));
    assert!(rows[2].contains("Read,2025-09-15,true"));
    assert!(!content.contains("2025-08-31"));
}

#[test]
fn test_export_json_all() {
    let db_path = setup_test_db("export_json_all");
    let out = temp_out("export_json_all", "json");
    init_db_with_habits(&db_path);
    checkin_days(&db_path, "Read", &["2025-08-31", "2025-09-01"]);

    rh().args(["--db", &db_path, "export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let data: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let items = data.as_array().expect("array");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["day"], "2025-08-31");
    assert_eq!(items[0]["habit"], "Read");
    assert_eq!(items[1]["done"], true);
}

#[test]
fn test_export_habit_list() {
    let db_path = setup_test_db("export_habits");
    let out = temp_out("export_habits", "csv");
    init_db_with_habits(&db_path);

    rh().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &out, "--habits",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read csv");
    assert!(content.starts_with("id,name,description,schedule_type,custom_days,created_at"));
    assert!(content.contains("Gym,,custom,\"0,2,4\""));
    assert!(content.contains("Read,20 pages,daily,,"));
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let db_path = setup_test_db("export_empty");
    let out = temp_out("export_empty", "csv");
    init_db_with_habits(&db_path);

    rh().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "2030",
    ])
    .assert()
    .success()
    .stdout(contains("No data found"));

    assert!(!Path::new(&out).exists());
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_habits(&db_path);

    rh().args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_refuses_overwrite_without_confirmation() {
    let db_path = setup_test_db("export_overwrite");
    let out = temp_out("export_overwrite", "csv");
    init_db_with_habits(&db_path);
    checkin_days(&db_path, "Read", &["2025-09-01"]);
    fs::write(&out, "keep me").expect("seed file");

    rh().args(["--db", &db_path, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));
    assert_eq!(fs::read_to_string(&out).expect("read"), "keep me");

    rh().args(["--db", &db_path, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert_ne!(fs::read_to_string(&out).expect("read"), "keep me");
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("backup");
    let plain = temp_out("backup_plain", "sqlite");
    let packed = temp_out("backup_packed", "sqlite");
    let zipped = temp_out("backup_packed", "zip");
    init_db_with_habits(&db_path);

    rh().args(["--db", &db_path, "backup", "--file", &plain])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(Path::new(&plain).exists());

    rh().args(["--db", &db_path, "backup", "--file", &packed, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));
    assert!(Path::new(&zipped).exists());
    assert!(!Path::new(&packed).exists());
}

#[test]
fn test_parse_range_forms() {
    assert_eq!(
        parse_range("2025").expect("year"),
        (d(2025, 1, 1), d(2025, 12, 31))
    );
    assert_eq!(
        parse_range("2024-02").expect("month"),
        (d(2024, 2, 1), d(2024, 2, 29))
    );
    assert_eq!(
        parse_range("2025-09-15").expect("day"),
        (d(2025, 9, 15), d(2025, 9, 15))
    );
    assert_eq!(
        parse_range("2025-08:2025-09").expect("month range"),
        (d(2025, 8, 1), d(2025, 9, 30))
    );

    assert!(parse_range("2025-09:2025").is_err());
    assert!(parse_range("2025-10:2025-09").is_err());
    assert!(parse_range("25-9").is_err());
}
