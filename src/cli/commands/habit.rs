use crate::cli::parser::{Commands, HabitAction};
use crate::config::Config;
use crate::core::calculator::calendar::{calendar_grid, render_calendar};
use crate::core::dashboard::{DashboardLogic, rate_window};
use crate::core::habit::HabitLogic;
use crate::core::session::HabitSession;
use crate::db::cache::QueryCache;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::habit::{Habit, HabitForm};
use crate::models::schedule::{Schedule, ScheduleKind, WeekdaySet, parse_day_list};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::ask_confirmation;
use crate::utils::colors::{GREY, RESET, colorize_done};
use crate::utils::date::{month_bounds, today};
use crate::utils::formatting::{bold, rate_or_na};
use crate::utils::table::Table;

/// Width of the description column in `habit list`.
const DESC_WIDTH: usize = 40;
/// Check-ins shown by `habit show`.
const HISTORY_LEN: usize = 14;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Habit { action } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;

        match action {
            HabitAction::Add {
                name,
                description,
                schedule,
                days,
            } => {
                let schedule = build_schedule(*schedule, days.as_deref())
                    .unwrap_or(Schedule::Daily);
                let form = HabitForm::new(name, description, schedule);

                let mut session = HabitSession::new();
                let id = HabitLogic::save(&mut pool, &mut session, &form)?;
                success(format!(
                    "Habit '{}' created (id {}, {}).",
                    form.name, id, form.schedule
                ));
            }

            HabitAction::Edit {
                habit,
                name,
                description,
                schedule,
                days,
            } => {
                let current = HabitLogic::resolve(&pool, habit)?;
                let mut form = HabitForm::from_habit(&current);

                if let Some(n) = name {
                    form.name = n.trim().to_string();
                }
                if let Some(d) = description {
                    form.description = d.trim().to_string();
                }
                if let Some(s) = build_schedule(*schedule, days.as_deref()) {
                    form.schedule = s;
                }

                if form == HabitForm::from_habit(&current) {
                    info(format!("Nothing to change for '{}'.", current.name));
                    return Ok(());
                }

                let mut session = HabitSession::editing(current.id);
                HabitLogic::save(&mut pool, &mut session, &form)?;
                success(format!("Habit '{}' updated ({}).", form.name, form.schedule));
            }

            HabitAction::Del { habit, yes } => {
                let target = HabitLogic::resolve(&pool, habit)?;
                let mut session = HabitSession::editing(target.id);

                let confirmed = *yes
                    || ask_confirmation(&format!(
                        "Delete habit '{}' and all of its check-ins?",
                        target.name
                    ));
                if confirmed {
                    session.request_delete();
                } else {
                    session.cancel_delete();
                }

                match HabitLogic::delete(&mut pool, &mut session)? {
                    Some(h) => success(format!("Habit '{}' deleted.", h.name)),
                    None => info("Deletion cancelled."),
                }
            }

            HabitAction::List => {
                let habits = queries::list_habits(&pool.conn)?;
                print_list(&habits, cfg);
            }

            HabitAction::Show { habit } => {
                let h = HabitLogic::resolve(&pool, habit)?;
                let cache = QueryCache::with_ttl_secs(cfg.cache_ttl_secs);
                print_details(&pool, &cache, &h, cfg)?;
            }
        }
    }

    Ok(())
}

/// Combine `--schedule` and `--days` into a schedule.
///
/// `--days` alone implies a custom schedule. Returns `None` when neither
/// flag was given.
fn build_schedule(kind: Option<ScheduleKind>, days: Option<&str>) -> Option<Schedule> {
    let parsed_days = days.map(|text| {
        let parsed = parse_day_list(text);
        if !parsed.valid {
            warning(format!(
                "Some entries in '{}' are not weekdays and were ignored.",
                text
            ));
        }
        parsed.into_inner()
    });

    match (kind, parsed_days) {
        (None, None) => None,
        (None, Some(set)) => Some(Schedule::Custom(set)),
        (Some(ScheduleKind::Custom), set) => Some(Schedule::Custom(set.unwrap_or_default())),
        (Some(k), set) => {
            if set.is_some() {
                warning("--days only applies to custom schedules; ignored.");
            }
            Some(Schedule::from_kind(k, WeekdaySet::new()))
        }
    }
}

fn print_list(habits: &[Habit], cfg: &Config) {
    if habits.is_empty() {
        info("No habits yet. Add one with `rhabits habit add <NAME>`.");
        return;
    }

    let mut table =
        Table::new(&["ID", "NAME", "SCHEDULE", "DESCRIPTION"]).with_separator(cfg.separator());

    for h in habits {
        let lines = textwrap::wrap(&h.description, DESC_WIDTH);
        let mut lines = lines.iter();

        table.add_row(vec![
            h.id.to_string(),
            h.name.clone(),
            h.schedule.to_string(),
            lines.next().map(|l| l.to_string()).unwrap_or_default(),
        ]);
        // Wrapped description continues on its own rows
        for l in lines {
            table.add_row(vec![String::new(), String::new(), String::new(), l.to_string()]);
        }
    }

    print!("{}", table.render());
}

fn print_details(
    pool: &DbPool,
    cache: &QueryCache,
    habit: &Habit,
    cfg: &Config,
) -> AppResult<()> {
    let day = today();
    let (start, end) = rate_window(day, cfg.rate_window_days)?;

    println!("{}", bold(&habit.name));
    if !habit.description.is_empty() {
        println!("{}", textwrap::fill(&habit.description, DESC_WIDTH * 2));
    }
    println!("Schedule : {}", habit.schedule);
    println!("Created  : {}", habit.created_at);
    println!(
        "Due today: {}",
        if habit.is_due_on(day) { "yes" } else { "no" }
    );

    let stats = DashboardLogic::stats(
        pool,
        cache,
        std::slice::from_ref(habit),
        day,
        cfg.rate_window_days,
    )?;
    if let Some(s) = stats.first() {
        println!("Streak   : {} (longest {})", s.current, s.longest);
        println!(
            "Rate     : {} ({}/{} due days, {} .. {})",
            rate_or_na(s.window.rate()),
            s.window.done,
            s.window.due,
            start,
            end
        );
    }

    let checkins = cache.checkins_for(pool, habit.id)?;

    println!();
    let (first, last) = month_bounds(day);
    print!("{}", render_calendar(&calendar_grid(habit, &checkins, first, last)));

    println!();
    if checkins.is_empty() {
        println!("{GREY}No check-ins yet.{RESET}");
        return Ok(());
    }

    let mut table = Table::new(&["DAY", "DONE", "NOTE"]).with_separator(cfg.separator());
    for c in checkins.iter().rev().take(HISTORY_LEN) {
        let day_label = if cfg.show_weekday {
            format!("{} {}", c.day_str(), c.day.format("%a"))
        } else {
            c.day_str()
        };
        table.add_row(vec![day_label, colorize_done(Some(c.done)), c.note.clone()]);
    }
    print!("{}", table.render());

    Ok(())
}
