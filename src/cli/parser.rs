use crate::export::ExportFormat;
use crate::models::schedule::ScheduleKind;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rHabits
/// CLI application to track daily habits with SQLite
#[derive(Parser)]
#[command(
    name = "rhabits",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple habit tracker CLI: check in daily, follow streaks and success rates using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create, edit, delete and list habits
    Habit {
        #[command(subcommand)]
        action: HabitAction,
    },

    /// Record a check-in for a habit (default date: today)
    Checkin {
        /// Habit name or id
        #[arg(required_unless_present_any = ["all", "list"])]
        habit: Option<String>,

        /// Day of the check-in (YYYY-MM-DD)
        #[arg(long = "date")]
        date: Option<String>,

        /// Record the day as not done
        #[arg(long = "undone")]
        undone: bool,

        /// Short note stored with the check-in
        #[arg(long = "note")]
        note: Option<String>,

        /// Mark every habit due on the date as done
        #[arg(long = "all", conflicts_with_all = ["habit", "undone", "note", "list"])]
        all: bool,

        /// Show due habits and their check-ins for the date
        #[arg(long = "list", conflicts_with_all = ["habit", "undone", "note"])]
        list: bool,
    },

    /// Today's dashboard: due habits, reminder and quick stats
    Today {
        /// Mark a habit done for the day before showing the dashboard
        #[arg(long = "done", value_name = "HABIT")]
        done: Option<String>,

        /// Show the dashboard for another day (YYYY-MM-DD)
        #[arg(long = "date")]
        date: Option<String>,
    },

    /// Current streak, longest streak and success rate per habit
    Stats {
        /// Habit name or id (default: all habits)
        habit: Option<String>,

        /// Window length in days (default from configuration)
        #[arg(long = "window", short = 'w')]
        window: Option<i64>,

        /// Last day of the window (YYYY-MM-DD, default today)
        #[arg(long = "date")]
        date: Option<String>,
    },

    /// Month progress over all habits
    Month {
        /// Month to show (YYYY-MM, default current month)
        month: Option<String>,

        /// Also draw the calendar grid of one habit
        #[arg(long = "calendar", value_name = "HABIT")]
        calendar: Option<String>,

        /// Only print the month totals
        #[arg(long = "summary")]
        summary: bool,
    },

    /// Read or change settings stored in the database
    Settings {
        #[arg(long = "get", value_name = "KEY")]
        get: Option<String>,

        #[arg(long = "set", num_args = 2, value_names = ["KEY", "VALUE"])]
        set: Option<Vec<String>>,

        /// Shortcut for `--set reminder_time HH:MM`
        #[arg(long = "reminder", value_name = "HH:MM")]
        reminder: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export check-ins (or habits) to CSV or JSON
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter check-ins by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, help = "Export the habit list instead of check-ins")]
        habits: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        name: String,

        #[arg(long = "desc", default_value = "")]
        description: String,

        /// daily, weekdays or custom (implied by --days)
        #[arg(long, value_enum)]
        schedule: Option<ScheduleKind>,

        /// Custom weekdays, e.g. "mon,wed,fri" or "0,2,4"
        #[arg(long)]
        days: Option<String>,
    },

    /// Edit an existing habit
    Edit {
        /// Habit name or id
        habit: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "desc")]
        description: Option<String>,

        #[arg(long, value_enum)]
        schedule: Option<ScheduleKind>,

        #[arg(long)]
        days: Option<String>,
    },

    /// Delete a habit and all of its check-ins
    Del {
        /// Habit name or id
        habit: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List habits
    List,

    /// Show a habit with its stats and check-in history
    Show {
        /// Habit name or id
        habit: String,
    },
}
