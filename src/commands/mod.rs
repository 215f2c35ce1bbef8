/// CLI commands for habit management
///
/// This module contains the command implementations the binary dispatches
/// to. Each command is a plain function over a `HabitStore` plus a params
/// struct, returning a response with a human-readable `message` and
/// serializable fields for `--json` output. The commands fetch a Habit,
/// run the scoring engine on it, persist any mutation, and report.

pub mod add;
pub mod done;
pub mod history;
pub mod list;
pub mod log;
pub mod remove;
pub mod status;

// Re-export command functions for easy access
pub use add::*;
pub use done::*;
pub use history::*;
pub use list::*;
pub use log::*;
pub use remove::*;
pub use status::*;

use crate::domain::Habit;
use crate::storage::{HabitStore, StorageError};

/// Resolve a habit from a user-supplied name
///
/// Matches the exact title first (case-insensitive), then falls back to
/// title prefixes. A query matching several habits is an error rather than
/// a guess.
pub fn find_habit<S: HabitStore>(store: &S, query: &str) -> Result<Habit, StorageError> {
    let habits = store.list_habits()?;
    let needle = query.trim().to_lowercase();

    let exact: Vec<&Habit> = habits
        .iter()
        .filter(|h| h.title.to_lowercase() == needle)
        .collect();
    match exact.len() {
        1 => return Ok(exact[0].clone()),
        n if n > 1 => {
            return Err(StorageError::AmbiguousHabit {
                query: query.to_string(),
            })
        }
        _ => {}
    }

    let prefixed: Vec<&Habit> = habits
        .iter()
        .filter(|h| h.title.to_lowercase().starts_with(&needle))
        .collect();
    match prefixed.len() {
        0 => Err(StorageError::HabitNotFound {
            habit: query.to_string(),
        }),
        1 => Ok(prefixed[0].clone()),
        _ => Err(StorageError::AmbiguousHabit {
            query: query.to_string(),
        }),
    }
}
