/// Command for listing all habits

use serde::Serialize;
use chrono::NaiveDateTime;

use crate::domain::ScoringEngine;
use crate::storage::HabitStore;
use crate::AppError;

/// A single habit in the listing
#[derive(Debug, Serialize)]
pub struct ListedHabit {
    pub habit_id: String,
    pub title: String,
    pub icon: String,
    pub schedule: String,
    pub started: String,
    pub score: f64,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub habits: Vec<ListedHabit>,
    pub message: String,
}

/// List all habits with their schedules and scores
pub fn list_habits<S: HabitStore>(
    store: &S,
    engine: &ScoringEngine,
    now: NaiveDateTime,
) -> Result<ListResponse, AppError> {
    let habits = store.list_habits()?;

    let listed: Vec<ListedHabit> = habits
        .iter()
        .map(|habit| ListedHabit {
            habit_id: habit.id.to_string(),
            title: habit.title.clone(),
            icon: habit.icon.clone(),
            schedule: habit.schedule_description(),
            started: habit.start_date.date().to_string(),
            score: ScoringEngine::round_for_display(engine.calculate_score(habit, now)),
        })
        .collect();

    let message = if listed.is_empty() {
        "No habits yet. Create your first one with 'momentum add'.".to_string()
    } else {
        listed
            .iter()
            .map(|h| {
                format!(
                    "[{}] {} - {}, since {}, score {:.2}",
                    h.icon, h.title, h.schedule, h.started, h.score
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(ListResponse {
        habits: listed,
        message,
    })
}
