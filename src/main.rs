/// Main entry point for the momentum habit tracker
///
/// This file sets up logging, parses command line arguments, opens the
/// habit database, and dispatches to the command implementations.

use clap::{Parser, Subcommand};
use chrono::{Local, NaiveDate, Weekday};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use momentum::{
    add_habit, done_habit, habit_history, habit_status, list_habits, log_completion,
    remove_habit, undo_completion, unlog_completion, AddParams, AppError, DomainError,
    DoneParams, HabitTracker, HistoryParams, LogParams, RemoveParams, ScoringEngine,
    StatusParams, TimePeriod, UndoParams, UnlogParams,
};

/// Get the default database path with a fallback strategy
///
/// Prefers the platform data directory, then the home directory, then the
/// current working directory.
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let potential_dirs = [
        dirs::data_dir().map(|mut p| {
            p.push("momentum");
            p
        }),
        dirs::home_dir().map(|mut p| {
            p.push(".momentum");
            p
        }),
        std::env::current_dir().ok().map(|mut p| {
            p.push(".momentum");
            p
        }),
    ];

    for dir in potential_dirs.iter().flatten() {
        if std::fs::create_dir_all(dir).is_ok() {
            let mut db_path = dir.clone();
            db_path.push("habits.db");
            return Ok(db_path);
        }
    }

    Err("Could not find a writable location for the habit database".into())
}

/// Command line arguments for the momentum habit tracker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's data directory
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// First day of the week for weekly habits (e.g. mon, sun)
    #[arg(long, global = true, default_value = "mon")]
    week_start: String,

    /// Print the full response as JSON instead of a message
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new habit
    Add {
        /// Display name of the habit
        title: String,
        /// Recurrence granularity: daily, weekly, or monthly
        #[arg(long, default_value = "daily")]
        period: String,
        /// Completions required per period
        #[arg(long, default_value_t = 1)]
        times: u32,
        /// Backdated start day (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Icon name shown in listings
        #[arg(long)]
        icon: Option<String>,
        /// Accent color as #rrggbb
        #[arg(long)]
        color: Option<String>,
        /// Motivational message (repeatable)
        #[arg(long = "message")]
        messages: Vec<String>,
    },
    /// Log a completion now; on a complete period, rewind it instead
    Done { habit: String },
    /// Log a completion on a past day
    Log {
        habit: String,
        /// Day of the completion (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// Remove a completion from a past day
    Unlog {
        habit: String,
        /// Day of the completion (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// Retract the most recent completion of the current period
    Undo { habit: String },
    /// Show score, status, and streak for one or all habits
    Status { habit: Option<String> },
    /// List all habits
    List,
    /// Show a habit's completion history as a day grid
    History { habit: String },
    /// Delete a habit and its history
    Remove { habit: String },
}

/// Print a command response: its message, or the whole thing as JSON
fn print_response<T: Serialize>(response: &T, message: &str, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        println!("{}", message);
    }
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        AppError::Domain(DomainError::InvalidDate(format!(
            "Expected YYYY-MM-DD, got '{}'",
            s
        )))
    })
}

fn parse_period(s: &str) -> Result<TimePeriod, AppError> {
    TimePeriod::parse(s).ok_or_else(|| {
        AppError::Domain(DomainError::Validation {
            message: format!("Unknown period '{}'; expected daily, weekly, or monthly", s),
        })
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("momentum={}", log_level))
        .with_writer(std::io::stderr) // Keep stdout for command output
        .init();

    // Determine database path
    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let week_start: Weekday = args
        .week_start
        .parse()
        .map_err(|_| format!("Unknown weekday '{}'", args.week_start))?;

    let tracker = HabitTracker::with_engine(db_path, ScoringEngine::with_first_weekday(week_start))?;
    let store = tracker.store();
    let engine = tracker.engine();
    let now = Local::now().naive_local();
    let json = args.json;

    match args.command {
        Command::Add {
            title,
            period,
            times,
            start,
            icon,
            color,
            messages,
        } => {
            let params = AddParams {
                title,
                period: parse_period(&period)?,
                times,
                start: start.as_deref().map(parse_date).transpose()?,
                icon,
                color,
                messages,
            };
            let response = add_habit(store, params, now)?;
            print_response(&response, &response.message, json)?;
        }
        Command::Done { habit } => {
            let response = done_habit(store, engine, DoneParams { habit }, now)?;
            print_response(&response, &response.message, json)?;
        }
        Command::Log { habit, date } => {
            let params = LogParams {
                habit,
                date: parse_date(&date)?,
            };
            let response = log_completion(store, engine, params, now)?;
            print_response(&response, &response.message, json)?;
        }
        Command::Unlog { habit, date } => {
            let params = UnlogParams {
                habit,
                date: parse_date(&date)?,
            };
            let response = unlog_completion(store, engine, params, now)?;
            print_response(&response, &response.message, json)?;
        }
        Command::Undo { habit } => {
            let response = undo_completion(store, engine, UndoParams { habit }, now)?;
            print_response(&response, &response.message, json)?;
        }
        Command::Status { habit } => {
            let response = habit_status(store, engine, StatusParams { habit }, now)?;
            print_response(&response, &response.message, json)?;
        }
        Command::List => {
            let response = list_habits(store, engine, now)?;
            print_response(&response, &response.message, json)?;
        }
        Command::History { habit } => {
            let response = habit_history(store, engine, HistoryParams { habit }, now)?;
            print_response(&response, &response.message, json)?;
        }
        Command::Remove { habit } => {
            let response = remove_habit(store, RemoveParams { habit })?;
            print_response(&response, &response.message, json)?;
        }
    }

    Ok(())
}
