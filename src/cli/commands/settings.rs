use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dashboard::REMINDER_TIME_KEY;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::table::Table;
use crate::utils::time::parse_time;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Settings { get, set, reminder } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;

        if let Some(t) = reminder {
            let time = parse_time(t).ok_or_else(|| AppError::InvalidTime(t.clone()))?;
            store(&mut pool, REMINDER_TIME_KEY, &time.format("%H:%M").to_string())?;
        }

        if let Some(pair) = set
            && let [key, value] = pair.as_slice()
        {
            if key == REMINDER_TIME_KEY && parse_time(value).is_none() {
                return Err(AppError::InvalidTime(value.clone()));
            }
            store(&mut pool, key, value)?;
        }

        if let Some(key) = get {
            let value = queries::get_setting(&pool.conn, key, "")?;
            println!("{}", value);
            return Ok(());
        }

        if reminder.is_none() && set.is_none() {
            let all = queries::list_settings(&pool.conn)?;
            if all.is_empty() {
                info("No settings stored.");
                return Ok(());
            }
            let mut table = Table::new(&["KEY", "VALUE"]).with_separator(cfg.separator());
            for (k, v) in all {
                table.add_row(vec![k, v]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}

fn store(pool: &mut DbPool, key: &str, value: &str) -> AppResult<()> {
    pool.with_tx(|tx| {
        queries::set_setting(tx, key, value)?;
        audit(tx, "settings", key, &format!("{key} = {value}"))
    })?;
    success(format!("{} set to {}.", key, value));
    Ok(())
}
