/// Command for checking habit status, score, and streak

use serde::Serialize;
use chrono::NaiveDateTime;

use crate::domain::{Habit, ScoringEngine};
use crate::storage::HabitStore;
use crate::AppError;

/// Parameters for checking habit status
#[derive(Debug)]
pub struct StatusParams {
    /// If omitted, reports on all habits
    pub habit: Option<String>,
}

/// Derived state of a single habit
#[derive(Debug, Serialize)]
pub struct HabitReport {
    pub habit_id: String,
    pub title: String,
    pub schedule: String,
    pub status: String,
    pub completions_in_period: u32,
    pub required_count: u32,
    pub score: f64,
    pub streak: u32,
    pub streak_unit: String,
}

/// Response from checking habit status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub habits: Vec<HabitReport>,
    pub summary: String,
    pub message: String,
}

fn report(engine: &ScoringEngine, habit: &Habit, now: NaiveDateTime) -> HabitReport {
    HabitReport {
        habit_id: habit.id.to_string(),
        title: habit.title.clone(),
        schedule: habit.schedule_description(),
        status: engine.status(habit, now).to_string(),
        completions_in_period: engine.completions_in_period(habit, now),
        required_count: habit.required_count,
        score: ScoringEngine::round_for_display(engine.calculate_score(habit, now)),
        streak: engine.streak_length(habit, now),
        streak_unit: habit.time_period.unit_name().to_string(),
    }
}

/// Get status for one or all habits using the provided storage
pub fn habit_status<S: HabitStore>(
    store: &S,
    engine: &ScoringEngine,
    params: StatusParams,
    now: NaiveDateTime,
) -> Result<StatusResponse, AppError> {
    let habits = match params.habit {
        Some(query) => vec![super::find_habit(store, &query)?],
        None => store.list_habits()?,
    };

    let reports: Vec<HabitReport> = habits.iter().map(|h| report(engine, h, now)).collect();

    let summary = if reports.is_empty() {
        "No habits yet. Create your first one with 'momentum add'.".to_string()
    } else {
        let complete_count = reports.iter().filter(|r| r.status == "Complete").count();
        format!(
            "{} of {} habits complete this period",
            complete_count,
            reports.len()
        )
    };

    let message = format!(
        "{}\n\n{}",
        summary,
        reports
            .iter()
            .map(|r| format!(
                "{} ({})\n   {} | {} / {} | score {:.2} | {} {} streak",
                r.title,
                r.schedule,
                r.status,
                r.completions_in_period,
                r.required_count,
                r.score,
                r.streak,
                r.streak_unit
            ))
            .collect::<Vec<_>>()
            .join("\n\n")
    );

    Ok(StatusResponse {
        habits: reports,
        summary,
        message,
    })
}
