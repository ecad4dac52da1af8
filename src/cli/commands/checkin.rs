use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::checkin::CheckinLogic;
use crate::core::habit::HabitLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_done;
use crate::utils::date::resolve_day;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin {
        habit,
        date,
        undone,
        note,
        all,
        list,
    } = cmd
    {
        let day = resolve_day(date.as_deref())?;
        let mut pool = DbPool::open(&cfg.database)?;

        if *list {
            let entries = CheckinLogic::day_entries(&pool, day)?;
            if entries.is_empty() {
                info(format!("No habits due on {}.", day));
                return Ok(());
            }

            let mut table =
                Table::new(&["HABIT", "DONE", "NOTE"]).with_separator(cfg.separator());
            for (h, c) in &entries {
                table.add_row(vec![
                    h.name.clone(),
                    colorize_done(c.as_ref().map(|c| c.done)),
                    c.as_ref().map(|c| c.note.clone()).unwrap_or_default(),
                ]);
            }
            println!("Check-ins for {}\n", day);
            print!("{}", table.render());
            return Ok(());
        }

        if *all {
            let n = CheckinLogic::mark_all_done(&mut pool, day)?;
            if n == 0 {
                info(format!("No habits due on {}.", day));
            } else {
                success(format!("{} habit(s) marked done for {}.", n, day));
            }
            return Ok(());
        }

        if let Some(key) = habit {
            let h = HabitLogic::resolve(&pool, key)?;
            let done = !*undone;
            let c = CheckinLogic::mark(&mut pool, &h, day, done, note.as_deref())?;

            success(format!(
                "'{}' marked {} for {}{}",
                h.name,
                if c.done { "done" } else { "not done" },
                c.day,
                if c.note.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", c.note)
                }
            ));
        }
    }

    Ok(())
}
