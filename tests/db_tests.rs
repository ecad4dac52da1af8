mod common;
use common::d;

use rhabits::core::checkin::CheckinLogic;
use rhabits::core::dashboard::{DashboardLogic, MAX_WINDOW_DAYS, REMINDER_TIME_KEY, rate_window};
use rhabits::core::habit::HabitLogic;
use rhabits::core::session::HabitSession;
use rhabits::db::cache::QueryCache;
use rhabits::db::migrate::run_pending_migrations;
use rhabits::db::pool::DbPool;
use rhabits::db::queries;
use rhabits::errors::AppError;
use rhabits::models::habit::HabitForm;
use rhabits::models::schedule::{Schedule, WeekdaySet};

fn add(pool: &mut DbPool, name: &str, schedule: Schedule) -> i64 {
    let mut session = HabitSession::new();
    HabitLogic::save(pool, &mut session, &HabitForm::new(name, "", schedule)).expect("save habit")
}

fn count_checkins(pool: &DbPool, habit_id: i64) -> i64 {
    pool.conn
        .query_row(
            "SELECT COUNT(*) FROM checkins WHERE habit_id = ?1",
            [habit_id],
            |row| row.get(0),
        )
        .expect("count check-ins")
}

#[test]
fn test_migrations_are_idempotent() {
    let pool = DbPool::in_memory().expect("in-memory db");
    run_pending_migrations(&pool.conn).expect("second run");

    let applied: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )
        .expect("count migrations");
    assert_eq!(applied, 2);

    let reminder = queries::get_setting(&pool.conn, REMINDER_TIME_KEY, "").expect("setting");
    assert_eq!(reminder, "18:00");
}

#[test]
fn test_mark_done_twice_keeps_one_row() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    let id = add(&mut pool, "Read", Schedule::Daily);
    let h = HabitLogic::resolve(&pool, "Read").expect("resolve");

    CheckinLogic::mark(&mut pool, &h, d(2025, 9, 1), true, Some("ch. 1")).expect("first");
    let second = CheckinLogic::mark(&mut pool, &h, d(2025, 9, 1), true, None).expect("second");

    assert_eq!(count_checkins(&pool, id), 1);
    assert!(second.done);
    // None keeps the note already stored
    assert_eq!(second.note, "ch. 1");
}

#[test]
fn test_upsert_keeps_first_created_at() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    let id = add(&mut pool, "Read", Schedule::Daily);
    let day = d(2025, 9, 1);

    queries::upsert_checkin(&pool.conn, id, day, true, "", "2025-09-01T07:00:00").expect("insert");
    queries::upsert_checkin(&pool.conn, id, day, false, "skipped", "2025-09-01T21:00:00")
        .expect("update");

    let c = queries::get_checkin(&pool.conn, id, day)
        .expect("query")
        .expect("row exists");
    assert!(!c.done);
    assert_eq!(c.note, "skipped");
    assert_eq!(c.created_at, "2025-09-01T07:00:00");
}

#[test]
fn test_delete_cascades_to_checkins() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    let id = add(&mut pool, "Read", Schedule::Daily);
    let keep = add(&mut pool, "Walk", Schedule::Daily);
    let h = HabitLogic::resolve(&pool, "Read").expect("resolve");
    let w = HabitLogic::resolve(&pool, "Walk").expect("resolve");

    for day in [d(2025, 9, 1), d(2025, 9, 2)] {
        CheckinLogic::mark(&mut pool, &h, day, true, None).expect("mark");
        CheckinLogic::mark(&mut pool, &w, day, true, None).expect("mark");
    }

    let mut session = HabitSession::editing(id);
    session.request_delete();
    let deleted = HabitLogic::delete(&mut pool, &mut session).expect("delete");

    assert_eq!(deleted.map(|h| h.name), Some("Read".to_string()));
    assert_eq!(session, HabitSession::new());
    assert!(
        queries::list_checkins_for_habit(&pool.conn, id)
            .expect("list")
            .is_empty()
    );
    assert_eq!(count_checkins(&pool, keep), 2);
}

#[test]
fn test_delete_requires_confirmation() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    let id = add(&mut pool, "Read", Schedule::Daily);

    let mut session = HabitSession::editing(id);
    assert!(HabitLogic::delete(&mut pool, &mut session).expect("no-op").is_none());

    session.request_delete();
    session.cancel_delete();
    assert!(HabitLogic::delete(&mut pool, &mut session).expect("no-op").is_none());

    // Arming without a target does nothing
    let mut empty = HabitSession::new();
    empty.request_delete();
    assert!(!empty.confirm_delete);

    assert!(queries::get_habit(&pool.conn, id).expect("query").is_some());
}

#[test]
fn test_duplicate_name_is_rejected() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    add(&mut pool, "Read", Schedule::Daily);

    let mut session = HabitSession::new();
    let err = HabitLogic::save(
        &mut pool,
        &mut session,
        &HabitForm::new("Read", "again", Schedule::Weekdays),
    )
    .expect_err("duplicate must fail");

    assert!(matches!(err, AppError::HabitNotSaved(ref n) if n == "Read"));
    assert_eq!(queries::list_habits(&pool.conn).expect("list").len(), 1);
}

#[test]
fn test_empty_name_is_rejected() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    let mut session = HabitSession::new();

    let err = HabitLogic::save(&mut pool, &mut session, &HabitForm::new("   ", "", Schedule::Daily))
        .expect_err("empty name must fail");
    assert!(matches!(err, AppError::EmptyName));
}

#[test]
fn test_edit_updates_in_place() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    let id = add(&mut pool, "Gym", Schedule::Daily);

    let mut session = HabitSession::editing(id);
    let form = HabitForm::new(
        "Gym",
        "legs",
        Schedule::Custom(WeekdaySet::from_indices([0, 2, 4])),
    );
    let saved = HabitLogic::save(&mut pool, &mut session, &form).expect("update");

    assert_eq!(saved, id);
    assert_eq!(session.edit_id, None);

    let h = queries::get_habit(&pool.conn, id).expect("query").expect("exists");
    assert_eq!(h.description, "legs");
    assert_eq!(h.schedule.custom_days_str(), "0,2,4");
}

#[test]
fn test_find_habit_by_name_or_id() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    let id = add(&mut pool, "Read", Schedule::Daily);

    let by_id = queries::find_habit(&pool.conn, &id.to_string()).expect("query");
    assert_eq!(by_id.map(|h| h.name), Some("Read".to_string()));

    let err = HabitLogic::resolve(&pool, "Nope").expect_err("missing habit");
    assert!(matches!(err, AppError::HabitNotFound(_)));
}

#[test]
fn test_mark_all_done_only_due_habits() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    let daily = add(&mut pool, "Read", Schedule::Daily);
    let weekdays = add(&mut pool, "Work", Schedule::Weekdays);

    // Saturday
    let n = CheckinLogic::mark_all_done(&mut pool, d(2025, 9, 6)).expect("mark all");
    assert_eq!(n, 1);
    assert_eq!(count_checkins(&pool, daily), 1);
    assert_eq!(count_checkins(&pool, weekdays), 0);

    let entries = CheckinLogic::day_entries(&pool, d(2025, 9, 8)).expect("entries");
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|(_, c)| c.is_none()));
}

#[test]
fn test_settings_upsert() {
    let pool = DbPool::in_memory().expect("in-memory db");

    assert_eq!(
        queries::get_setting(&pool.conn, "theme", "light").expect("default"),
        "light"
    );
    queries::set_setting(&pool.conn, "theme", "dark").expect("set");
    queries::set_setting(&pool.conn, "theme", "solar").expect("overwrite");

    let all = queries::list_settings(&pool.conn).expect("list");
    assert!(all.contains(&("theme".to_string(), "solar".to_string())));
    assert!(all.contains(&(REMINDER_TIME_KEY.to_string(), "18:00".to_string())));
}

#[test]
fn test_cache_serves_stale_until_invalidated() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    let id = add(&mut pool, "Read", Schedule::Daily);
    let cache = QueryCache::with_ttl_secs(3600);

    assert_eq!(cache.habits(&pool).expect("habits").len(), 1);
    assert!(cache.checkins_for(&pool, id).expect("checkins").is_empty());

    add(&mut pool, "Walk", Schedule::Daily);
    queries::upsert_checkin(&pool.conn, id, d(2025, 9, 1), true, "", "2025-09-01T08:00:00")
        .expect("upsert");

    assert_eq!(cache.habits(&pool).expect("cached").len(), 1);
    assert!(cache.checkins_for(&pool, id).expect("cached").is_empty());

    cache.invalidate_habits();
    cache.invalidate_checkins(id);

    assert_eq!(cache.habits(&pool).expect("fresh").len(), 2);
    assert_eq!(cache.checkins_for(&pool, id).expect("fresh").len(), 1);

    queries::delete_habit(&pool.conn, id).expect("delete");
    cache.clear();

    assert_eq!(cache.habits(&pool).expect("fresh").len(), 1);
    assert!(cache.checkins_for(&pool, id).expect("fresh").is_empty());
}

#[test]
fn test_cache_with_zero_ttl_always_reloads() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    let cache = QueryCache::with_ttl_secs(0);

    assert!(cache.habits(&pool).expect("habits").is_empty());
    add(&mut pool, "Read", Schedule::Daily);
    assert_eq!(cache.habits(&pool).expect("habits").len(), 1);
}

#[test]
fn test_today_view_lists_due_habits() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    add(&mut pool, "Read", Schedule::Daily);
    add(&mut pool, "Work", Schedule::Weekdays);
    let read = HabitLogic::resolve(&pool, "Read").expect("resolve");

    let day = d(2025, 9, 6);
    CheckinLogic::mark(&mut pool, &read, day, true, Some("done early")).expect("mark");

    let cache = QueryCache::with_ttl_secs(10);
    let view = DashboardLogic::today(&pool, &cache, day, 7).expect("today");

    assert_eq!(view.habit_count, 2);
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.open_items(), 0);

    let item = &view.items[0];
    assert_eq!(item.habit.name, "Read");
    assert_eq!(item.note, "done early");
    assert_eq!(item.streak, 1);
    assert_eq!((item.window.done, item.window.due), (1, 7));

    assert!(view.reminder.valid);
    assert_eq!(view.reminder_raw, "18:00");
}

#[test]
fn test_today_view_reports_bad_reminder() {
    let pool = DbPool::in_memory().expect("in-memory db");
    queries::set_setting(&pool.conn, REMINDER_TIME_KEY, "late evening").expect("set");

    let cache = QueryCache::with_ttl_secs(10);
    let view = DashboardLogic::today(&pool, &cache, d(2025, 9, 6), 28).expect("today");

    assert!(!view.reminder.valid);
    assert_eq!(view.reminder.value.format("%H:%M").to_string(), "18:00");
}

#[test]
fn test_rate_window_rejects_out_of_range_lengths() {
    let end = d(2025, 3, 1);
    assert_eq!(rate_window(end, 28).expect("window"), (d(2025, 2, 2), end));
    assert_eq!(rate_window(end, 1).expect("window"), (end, end));
    assert!(rate_window(end, MAX_WINDOW_DAYS).is_ok());

    for days in [0, -5, MAX_WINDOW_DAYS + 1, 1_000_000_000, i64::MAX] {
        assert!(matches!(
            rate_window(end, days),
            Err(AppError::InvalidWindow(n)) if n == days
        ));
    }
}

#[test]
fn test_today_view_with_huge_window_is_an_error() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    add(&mut pool, "Read", Schedule::Daily);

    let cache = QueryCache::with_ttl_secs(10);
    let res = DashboardLogic::today(&pool, &cache, d(2025, 9, 6), 1_000_000_000);
    assert!(matches!(res, Err(AppError::InvalidWindow(1_000_000_000))));
}
