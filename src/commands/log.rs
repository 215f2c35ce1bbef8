/// Commands for editing a habit's completion history
///
/// `log` records a backdated completion, `unlog` removes one by day, and
/// `undo` retracts the most recent completion of the current period.
/// Backdating before the start date is allowed and pulls the start date
/// back with it.

use serde::Serialize;
use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::ScoringEngine;
use crate::storage::HabitStore;
use crate::AppError;

/// Noon, so a backdated entry sits safely inside its calendar day.
const BACKDATE_HOUR: u32 = 12;

/// Parameters for logging a backdated completion
#[derive(Debug)]
pub struct LogParams {
    pub habit: String,
    pub date: NaiveDate,
}

/// Parameters for removing a completion by day
#[derive(Debug)]
pub struct UnlogParams {
    pub habit: String,
    pub date: NaiveDate,
}

/// Parameters for undoing the latest completion
#[derive(Debug)]
pub struct UndoParams {
    pub habit: String,
}

/// Response from any history edit
#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub habit_id: String,
    pub title: String,
    pub total_completions: usize,
    pub score: f64,
    pub message: String,
}

fn edit_response<S: HabitStore>(
    store: &S,
    engine: &ScoringEngine,
    habit: crate::domain::Habit,
    now: NaiveDateTime,
    message: String,
) -> Result<EditResponse, AppError> {
    store.update_habit(&habit)?;

    Ok(EditResponse {
        habit_id: habit.id.to_string(),
        title: habit.title.clone(),
        total_completions: habit.completed_dates.len(),
        score: ScoringEngine::round_for_display(engine.calculate_score(&habit, now)),
        message,
    })
}

/// Record a completion on a past (or current) day
pub fn log_completion<S: HabitStore>(
    store: &S,
    engine: &ScoringEngine,
    params: LogParams,
    now: NaiveDateTime,
) -> Result<EditResponse, AppError> {
    let mut habit = super::find_habit(store, &params.habit)?;

    let instant = params
        .date
        .and_hms_opt(BACKDATE_HOUR, 0, 0)
        .unwrap_or_else(|| params.date.and_time(now.time()));
    habit.add_completion(instant);

    let message = format!("Logged '{}' on {}", habit.title, params.date);
    edit_response(store, engine, habit, now, message)
}

/// Remove one completion falling on the given day
pub fn unlog_completion<S: HabitStore>(
    store: &S,
    engine: &ScoringEngine,
    params: UnlogParams,
    now: NaiveDateTime,
) -> Result<EditResponse, AppError> {
    let mut habit = super::find_habit(store, &params.habit)?;

    let instant = params
        .date
        .and_hms_opt(BACKDATE_HOUR, 0, 0)
        .unwrap_or_else(|| params.date.and_time(now.time()));
    let removed = habit.remove_completion(instant);

    let message = if removed {
        format!("Removed a completion of '{}' on {}", habit.title, params.date)
    } else {
        format!("No completion of '{}' on {}", habit.title, params.date)
    };
    edit_response(store, engine, habit, now, message)
}

/// Retract the most recent completion of the current period
pub fn undo_completion<S: HabitStore>(
    store: &S,
    engine: &ScoringEngine,
    params: UndoParams,
    now: NaiveDateTime,
) -> Result<EditResponse, AppError> {
    let mut habit = super::find_habit(store, &params.habit)?;

    let reverted = engine.revert_completion(&mut habit, now);

    let message = if reverted {
        format!("Undid the latest completion of '{}'", habit.title)
    } else {
        format!(
            "Nothing to undo for '{}' this {}",
            habit.title,
            habit.time_period.unit_name()
        )
    };
    edit_response(store, engine, habit, now, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add_habit, find_habit, AddParams};
    use crate::domain::TimePeriod;
    use crate::storage::SqliteStore;
    use tempfile::NamedTempFile;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn setup() -> (SqliteStore, NamedTempFile) {
        let file = NamedTempFile::new().unwrap();
        let store = SqliteStore::new(file.path().to_path_buf()).unwrap();
        add_habit(
            &store,
            AddParams {
                title: "Journal".to_string(),
                period: TimePeriod::Daily,
                times: 1,
                start: NaiveDate::from_ymd_opt(2024, 3, 10),
                icon: None,
                color: None,
                messages: Vec::new(),
            },
            now(),
        )
        .unwrap();
        (store, file)
    }

    #[test]
    fn test_log_backdated_completion() {
        let (store, _file) = setup();
        let engine = ScoringEngine::new();

        let response = log_completion(
            &store,
            &engine,
            LogParams {
                habit: "journal".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
            },
            now(),
        )
        .unwrap();

        assert_eq!(response.total_completions, 1);
        let habit = find_habit(&store, "Journal").unwrap();
        assert!(habit.has_completion_on(
            NaiveDate::from_ymd_opt(2024, 3, 12)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        ));
    }

    #[test]
    fn test_log_before_start_pulls_start_back() {
        let (store, _file) = setup();
        let engine = ScoringEngine::new();

        log_completion(
            &store,
            &engine,
            LogParams {
                habit: "Journal".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            },
            now(),
        )
        .unwrap();

        let habit = find_habit(&store, "Journal").unwrap();
        assert_eq!(
            habit.start_date.date(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_unlog_removes_by_day() {
        let (store, _file) = setup();
        let engine = ScoringEngine::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();

        log_completion(
            &store,
            &engine,
            LogParams { habit: "Journal".to_string(), date },
            now(),
        )
        .unwrap();
        let response = unlog_completion(
            &store,
            &engine,
            UnlogParams { habit: "Journal".to_string(), date },
            now(),
        )
        .unwrap();

        assert_eq!(response.total_completions, 0);
        assert!(response.message.starts_with("Removed"));
    }

    #[test]
    fn test_undo_only_touches_current_period() {
        let (store, _file) = setup();
        let engine = ScoringEngine::new();

        log_completion(
            &store,
            &engine,
            LogParams {
                habit: "Journal".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            },
            now(),
        )
        .unwrap();

        // Latest completion is yesterday's; undo must leave it alone.
        let response = undo_completion(
            &store,
            &engine,
            UndoParams { habit: "Journal".to_string() },
            now(),
        )
        .unwrap();
        assert_eq!(response.total_completions, 1);
        assert!(response.message.starts_with("Nothing to undo"));
    }
}
