/// Command for deleting a habit

use serde::Serialize;

use crate::storage::HabitStore;
use crate::AppError;

/// Parameters for deleting a habit
#[derive(Debug)]
pub struct RemoveParams {
    pub habit: String,
}

/// Response from deleting a habit
#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub habit_id: String,
    pub title: String,
    pub message: String,
}

/// Delete a habit and its completion history
pub fn remove_habit<S: HabitStore>(
    store: &S,
    params: RemoveParams,
) -> Result<RemoveResponse, AppError> {
    let habit = super::find_habit(store, &params.habit)?;

    store.delete_habit(&habit.id)?;

    Ok(RemoveResponse {
        habit_id: habit.id.to_string(),
        message: format!("Removed '{}' and its history", habit.title),
        title: habit.title,
    })
}
