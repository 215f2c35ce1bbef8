/// Command for completing a habit right now
///
/// This is the tap-on-the-circle equivalent: while the current period is
/// pending it logs a completion, and once the period is complete another
/// invocation rewinds the period (an accidental extra tap undoes itself).

use serde::Serialize;
use chrono::NaiveDateTime;

use crate::domain::{HabitStatus, ScoringEngine};
use crate::storage::HabitStore;
use crate::AppError;

/// Parameters for completing a habit
#[derive(Debug)]
pub struct DoneParams {
    /// Habit title or unambiguous prefix
    pub habit: String,
}

/// Response from completing a habit
#[derive(Debug, Serialize)]
pub struct DoneResponse {
    pub habit_id: String,
    pub title: String,
    pub status: String,
    pub completions: u32,
    pub required: u32,
    pub score: f64,
    pub streak: u32,
    /// True when the invocation rewound an already-complete period
    pub undone: bool,
    pub message: String,
}

/// Complete (or rewind) a habit for the current period
pub fn done_habit<S: HabitStore>(
    store: &S,
    engine: &ScoringEngine,
    params: DoneParams,
    now: NaiveDateTime,
) -> Result<DoneResponse, AppError> {
    let mut habit = super::find_habit(store, &params.habit)?;

    let was_complete = engine.status(&habit, now).is_complete();
    let status = engine.complete(&mut habit, now);
    store.update_habit(&habit)?;

    let completions = engine.completions_in_period(&habit, now);
    let score = ScoringEngine::round_for_display(engine.calculate_score(&habit, now));
    let streak = engine.streak_length(&habit, now);

    let message = if was_complete {
        format!("Rewound this {}'s completions for '{}'", habit.time_period.unit_name(), habit.title)
    } else {
        match status {
            HabitStatus::Complete => format!(
                "'{}' complete - {} | score {:.2}",
                habit.title,
                engine.streak_description(&habit, now),
                score
            ),
            HabitStatus::Pending(count) => format!(
                "Logged '{}': {} / {} this {}",
                habit.title,
                count,
                habit.required_count,
                habit.time_period.unit_name()
            ),
        }
    };

    Ok(DoneResponse {
        habit_id: habit.id.to_string(),
        title: habit.title.clone(),
        status: status.to_string(),
        completions,
        required: habit.required_count,
        score,
        streak,
        undone: was_complete,
        message,
    })
}
