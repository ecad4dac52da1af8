use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::calendar::{calendar_grid, render_calendar};
use crate::core::calculator::progress::month_totals;
use crate::core::dashboard::DashboardLogic;
use crate::core::habit::HabitLogic;
use crate::db::cache::QueryCache;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info};
use crate::utils::date::{month_bounds, month_name, parse_month, today};
use crate::utils::formatting::{bold, percent, rate_or_na};
use crate::utils::table::Table;
use chrono::Datelike;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Month {
        month,
        calendar,
        summary,
    } = cmd
    {
        let anchor = match month {
            Some(m) => parse_month(m).ok_or_else(|| AppError::InvalidMonth(m.clone()))?,
            None => today(),
        };
        let (first, last) = month_bounds(anchor);

        let pool = DbPool::open(&cfg.database)?;
        let cache = QueryCache::with_ttl_secs(cfg.cache_ttl_secs);

        header(format!("{} {}", month_name(first.month()), first.year()));

        let rows = DashboardLogic::month(&pool, &cache, first, last)?;
        let totals = month_totals(&rows);

        if !*summary {
            let mut table = Table::new(&["DAY", "DUE", "DONE", "RATE", "CUM DONE/DUE"])
                .with_separator(cfg.separator());
            for r in &rows {
                let day_label = if cfg.show_weekday {
                    format!("{} {}", r.day, r.day.format("%a"))
                } else {
                    r.day.to_string()
                };
                let rate = if r.due > 0 {
                    rate_or_na(Some(r.completion_rate))
                } else {
                    rate_or_na(None)
                };
                table.add_row(vec![
                    day_label,
                    r.due.to_string(),
                    r.done.to_string(),
                    rate,
                    format!("{}/{}", r.cum_done, r.cum_due),
                ]);
            }
            print!("{}", table.render());
            println!();
        }

        println!(
            "{} {}/{} due check-ins done ({})",
            bold("Total:"),
            totals.done,
            totals.due,
            percent(totals.rate)
        );

        if let Some(key) = calendar {
            let h = HabitLogic::resolve(&pool, key)?;
            let checkins = cache.checkins_for(&pool, h.id)?;

            println!();
            info(format!("{} ({})", h.name, h.schedule));
            print!("{}", render_calendar(&calendar_grid(&h, &checkins, first, last)));
        }
    }

    Ok(())
}
