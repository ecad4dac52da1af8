use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, init_db_with_habits, rh, setup_test_db};

// September 2025 starts on a Monday.

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("cli_init");

    rh().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    rh().args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_habit_add_and_list() {
    let db_path = setup_test_db("cli_habit_list");
    init_db_with_habits(&db_path);

    rh().args(["--db", &db_path, "habit", "list"])
        .assert()
        .success()
        .stdout(contains("Read"))
        .stdout(contains("20 pages"))
        .stdout(contains("custom (Mon, Wed, Fri)"));
}

#[test]
fn test_habit_duplicate_name_fails() {
    let db_path = setup_test_db("cli_habit_dup");
    init_db_with_habits(&db_path);

    rh().args(["--db", &db_path, "habit", "add", "Read"])
        .assert()
        .failure()
        .stderr(contains("Could not save habit 'Read'"));
}

#[test]
fn test_habit_edit_schedule() {
    let db_path = setup_test_db("cli_habit_edit");
    init_db_with_habits(&db_path);

    rh().args(["--db", &db_path, "habit", "edit", "Gym", "--schedule", "weekdays"])
        .assert()
        .success()
        .stdout(contains("Habit 'Gym' updated (weekdays)"));

    rh().args(["--db", &db_path, "habit", "edit", "Gym", "--name", "Read"])
        .assert()
        .failure();
}

#[test]
fn test_habit_del_cascades() {
    let db_path = setup_test_db("cli_habit_del");
    init_db_with_habits(&db_path);

    rh().args(["--db", &db_path, "checkin", "Read", "--date", "2025-09-01"])
        .assert()
        .success();

    // No confirmation on stdin: nothing is deleted
    rh().args(["--db", &db_path, "habit", "del", "Read"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Deletion cancelled"));

    rh().args(["--db", &db_path, "habit", "del", "Read", "--yes"])
        .assert()
        .success()
        .stdout(contains("Habit 'Read' deleted"));

    rh().args(["--db", &db_path, "checkin", "--list", "--date", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("Read").not());

    rh().args(["--db", &db_path, "checkin", "Read"])
        .assert()
        .failure()
        .stderr(contains("Habit not found: Read"));
}

#[test]
fn test_checkin_and_list_day() {
    let db_path = setup_test_db("cli_checkin");
    init_db_with_habits(&db_path);

    rh().args([
        "--db", &db_path, "checkin", "Read", "--date", "2025-09-01", "--note", "ch. 3",
    ])
    .assert()
    .success()
    .stdout(contains("'Read' marked done for 2025-09-01 (ch. 3)"));

    rh().args(["--db", &db_path, "checkin", "--list", "--date", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("Read"))
        .stdout(contains("Gym"))
        .stdout(contains("ch. 3"));

    rh().args(["--db", &db_path, "checkin", "Gym", "--date", "2025-09-02"])
        .assert()
        .success()
        .stdout(contains("not scheduled"));
}

#[test]
fn test_checkin_bad_date_fails() {
    let db_path = setup_test_db("cli_checkin_bad_date");
    init_db_with_habits(&db_path);

    rh().args(["--db", &db_path, "checkin", "Read", "--date", "2025-13-01"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_checkin_all_marks_due_habits() {
    let db_path = setup_test_db("cli_checkin_all");
    init_db_with_habits(&db_path);

    rh().args(["--db", &db_path, "checkin", "--all", "--date", "2025-09-03"])
        .assert()
        .success()
        .stdout(contains("2 habit(s) marked done for 2025-09-03"));

    rh().args(["--db", &db_path, "checkin", "--all", "--date", "2025-09-04"])
        .assert()
        .success()
        .stdout(contains("1 habit(s) marked done"));
}

#[test]
fn test_today_dashboard() {
    let db_path = setup_test_db("cli_today");
    init_db_with_habits(&db_path);

    // Tuesday: only the daily habit is due
    rh().args(["--db", &db_path, "today", "--date", "2025-09-02", "--done", "Read"])
        .assert()
        .success()
        .stdout(contains("'Read' marked done for 2025-09-02"))
        .stdout(contains("1/1 done"))
        .stdout(contains("Gym").not());
}

#[test]
fn test_today_without_habits() {
    let db_path = setup_test_db("cli_today_empty");
    init_db(&db_path);

    rh().args(["--db", &db_path, "today"])
        .assert()
        .success()
        .stdout(contains("No habits yet"));
}

#[test]
fn test_stats_window() {
    let db_path = setup_test_db("cli_stats");
    init_db_with_habits(&db_path);

    for day in ["2025-09-01", "2025-09-02", "2025-09-03", "2025-09-04", "2025-09-05"] {
        rh().args(["--db", &db_path, "checkin", "Read", "--date", day])
            .assert()
            .success();
    }

    rh().args([
        "--db", &db_path, "stats", "Read", "--window", "5", "--date", "2025-09-05",
    ])
    .assert()
    .success()
    .stdout(contains("2025-09-01 .. 2025-09-05"))
    .stdout(contains("5/5"))
    .stdout(contains("100%"));

    rh().args(["--db", &db_path, "stats", "--window", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid window: 0"));

    rh().args(["--db", &db_path, "stats", "--window", "1000000000"])
        .assert()
        .failure()
        .stderr(contains("Invalid window: 1000000000"));
}

#[test]
fn test_month_summary_and_calendar() {
    let db_path = setup_test_db("cli_month");
    init_db_with_habits(&db_path);

    for day in ["2025-09-01", "2025-09-02"] {
        rh().args(["--db", &db_path, "checkin", "Read", "--date", day])
            .assert()
            .success();
    }

    // Read is due 30 days, Gym 13 (5 Mondays, 4 Wednesdays, 4 Fridays)
    rh().args([
        "--db", &db_path, "month", "2025-09", "--summary", "--calendar", "Gym",
    ])
    .assert()
    .success()
    .stdout(contains("September 2025"))
    .stdout(contains("2/43"))
    .stdout(contains("Mo  Tu  We"));

    rh().args(["--db", &db_path, "month", "2025-9x"])
        .assert()
        .failure()
        .stderr(contains("Invalid month"));
}

#[test]
fn test_settings_reminder() {
    let db_path = setup_test_db("cli_settings");
    init_db(&db_path);

    rh().args(["--db", &db_path, "settings", "--get", "reminder_time"])
        .assert()
        .success()
        .stdout(contains("18:00"));

    rh().args(["--db", &db_path, "settings", "--reminder", "07:30"])
        .assert()
        .success()
        .stdout(contains("reminder_time set to 07:30"));

    rh().args(["--db", &db_path, "settings", "--reminder", "25:99"])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));

    rh().args(["--db", &db_path, "settings", "--set", "theme", "dark"])
        .assert()
        .success();

    rh().args(["--db", &db_path, "settings"])
        .assert()
        .success()
        .stdout(contains("theme"))
        .stdout(contains("07:30"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_db_with_habits(&db_path);

    rh().args(["--db", &db_path, "checkin", "Read", "--date", "2025-09-01"])
        .assert()
        .success();

    rh().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("checkin"))
        .stdout(contains("Read"));
}

#[test]
fn test_db_info() {
    let db_path = setup_test_db("cli_db_info");
    init_db_with_habits(&db_path);

    rh().args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Habits:"))
        .stdout(contains("Check-ins:"));
}
