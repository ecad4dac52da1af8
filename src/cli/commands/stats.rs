use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dashboard::{DashboardLogic, rate_window};
use crate::core::habit::HabitLogic;
use crate::db::cache::QueryCache;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::date::resolve_day;
use crate::utils::formatting::rate_or_na;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats {
        habit,
        window,
        date,
    } = cmd
    {
        let end = resolve_day(date.as_deref())?;
        let window_days = window.unwrap_or(cfg.rate_window_days);
        let (start, end) = rate_window(end, window_days)?;

        let pool = DbPool::open(&cfg.database)?;
        let cache = QueryCache::with_ttl_secs(cfg.cache_ttl_secs);

        let habits = match habit {
            Some(key) => vec![HabitLogic::resolve(&pool, key)?],
            None => cache.habits(&pool)?,
        };
        if habits.is_empty() {
            info("No habits yet. Add one with `rhabits habit add <NAME>`.");
            return Ok(());
        }

        let rows = DashboardLogic::stats(&pool, &cache, &habits, end, window_days)?;

        println!("Window: {} .. {} ({} days)\n", start, end, window_days);

        let mut table = Table::new(&["HABIT", "SCHEDULE", "STREAK", "LONGEST", "DONE/DUE", "RATE"])
            .with_separator(cfg.separator());
        for s in &rows {
            table.add_row(vec![
                s.habit.name.clone(),
                s.habit.schedule.to_string(),
                s.current.to_string(),
                s.longest.to_string(),
                format!("{}/{}", s.window.done, s.window.due),
                rate_or_na(s.window.rate()),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
