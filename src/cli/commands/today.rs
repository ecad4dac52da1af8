use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::checkin::CheckinLogic;
use crate::core::dashboard::{DashboardLogic, TodayView, rate_window};
use crate::core::habit::HabitLogic;
use crate::db::cache::QueryCache;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, reminder, success, warning};
use crate::utils::colors::colorize_done;
use crate::utils::date::{resolve_day, today};
use crate::utils::formatting::rate_or_na;
use crate::utils::table::Table;
use crate::utils::time::reminder_due;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Today { done, date } = cmd {
        let day = resolve_day(date.as_deref())?;
        rate_window(day, cfg.rate_window_days)?;
        let mut pool = DbPool::open(&cfg.database)?;
        let cache = QueryCache::with_ttl_secs(cfg.cache_ttl_secs);

        if let Some(key) = done {
            let h = HabitLogic::resolve(&pool, key)?;
            CheckinLogic::mark(&mut pool, &h, day, true, None)?;
            cache.invalidate_checkins(h.id);
            success(format!("'{}' marked done for {}.", h.name, day));
        }

        let view = DashboardLogic::today(&pool, &cache, day, cfg.rate_window_days)?;
        render(&view, cfg);
    }

    Ok(())
}

fn render(view: &TodayView, cfg: &Config) {
    header(format!("{} ({})", view.day, view.day.format("%A")));

    if view.habit_count == 0 {
        info("No habits yet. Add one with `rhabits habit add <NAME>`.");
        return;
    }
    if view.items.is_empty() {
        info("Nothing scheduled for this day.");
        return;
    }

    let mut table = Table::new(&["HABIT", "DONE", "STREAK", "RATE", "NOTE"])
        .with_separator(cfg.separator());
    for item in &view.items {
        table.add_row(vec![
            item.habit.name.clone(),
            colorize_done(Some(item.done)),
            item.streak.to_string(),
            rate_or_na(item.window.rate()),
            item.note.clone(),
        ]);
    }
    print!("{}", table.render());

    let open = view.open_items();
    println!(
        "\n{}/{} done ({} habit(s) in total)",
        view.items.len() - open,
        view.items.len(),
        view.habit_count
    );

    if !view.reminder.valid {
        warning(format!(
            "Invalid reminder_time '{}'; using {}.",
            view.reminder_raw,
            view.reminder.value.format("%H:%M")
        ));
    }

    // The reminder only concerns the real current day
    if view.day == today() && reminder_due(Local::now().naive_local(), view.reminder.value, open)
    {
        reminder(format!(
            "{} habit(s) still open after {}.",
            open,
            view.reminder.value.format("%H:%M")
        ));
    }
}
