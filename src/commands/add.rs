/// Command for creating new habits

use serde::Serialize;
use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{Habit, TimePeriod};
use crate::storage::HabitStore;
use crate::AppError;

/// Parameters for creating a new habit
#[derive(Debug)]
pub struct AddParams {
    pub title: String,
    pub period: TimePeriod,
    pub times: u32,
    /// Optional backdated start; defaults to now
    pub start: Option<NaiveDate>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub messages: Vec<String>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct AddResponse {
    pub habit_id: String,
    pub title: String,
    pub schedule: String,
    pub message: String,
}

/// Create a new habit using the provided storage
pub fn add_habit<S: HabitStore>(
    store: &S,
    params: AddParams,
    now: NaiveDateTime,
) -> Result<AddResponse, AppError> {
    let start_date = match params.start {
        Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or(now),
        None => now,
    };

    let habit = Habit::new(
        params.title,
        params.period,
        params.times,
        start_date,
        params.icon,
        params.color,
        params.messages,
    )?;

    store.create_habit(&habit)?;

    let schedule = habit.schedule_description();
    let message = format!("Created '{}' - {}", habit.title, schedule);

    Ok(AddResponse {
        habit_id: habit.id.to_string(),
        title: habit.title,
        schedule,
        message,
    })
}
