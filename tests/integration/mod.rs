/// Integration tests driving full command workflows against a real database
use momentum::*;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tempfile::NamedTempFile;

fn noon(d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn add(tracker: &HabitTracker, title: &str, period: TimePeriod, times: u32, now: NaiveDateTime) {
    add_habit(
        tracker.store(),
        AddParams {
            title: title.to_string(),
            period,
            times,
            start: None,
            icon: None,
            color: None,
            messages: Vec::new(),
        },
        now,
    )
    .expect("Failed to add habit");
}

#[cfg(test)]
mod workflow_tests {
    use super::*;

    #[test]
    fn test_add_done_status_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let tracker = HabitTracker::new(temp_file.path().to_path_buf()).unwrap();
        let now = noon(15);

        add(&tracker, "Reading", TimePeriod::Daily, 2, now);

        let first = done_habit(
            tracker.store(),
            tracker.engine(),
            DoneParams { habit: "Reading".to_string() },
            now,
        )
        .unwrap();
        assert_eq!(first.status, "Pending: 1");

        let second = done_habit(
            tracker.store(),
            tracker.engine(),
            DoneParams { habit: "Reading".to_string() },
            now,
        )
        .unwrap();
        assert_eq!(second.status, "Complete");
        assert_eq!(second.streak, 1);

        let status = habit_status(
            tracker.store(),
            tracker.engine(),
            StatusParams { habit: None },
            now,
        )
        .unwrap();
        assert_eq!(status.summary, "1 of 1 habits complete this period");
    }

    #[test]
    fn test_history_survives_reopen() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();
        let now = noon(15);

        {
            let tracker = HabitTracker::new(db_path.clone()).unwrap();
            add(&tracker, "Running", TimePeriod::Daily, 1, now);
            for d in [13, 14] {
                log_completion(
                    tracker.store(),
                    tracker.engine(),
                    LogParams {
                        habit: "Running".to_string(),
                        date: NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
                    },
                    now,
                )
                .unwrap();
            }
            done_habit(
                tracker.store(),
                tracker.engine(),
                DoneParams { habit: "Running".to_string() },
                now,
            )
            .unwrap();
        }

        // A second "session" sees the same history and derives the same values.
        let tracker = HabitTracker::new(db_path).unwrap();
        let habit = find_habit(tracker.store(), "Running").unwrap();
        assert_eq!(habit.completed_dates.len(), 3);

        let report = habit_status(
            tracker.store(),
            tracker.engine(),
            StatusParams { habit: Some("Running".to_string()) },
            now,
        )
        .unwrap();
        assert_eq!(report.habits[0].streak, 3);
        assert!((report.habits[0].score - 0.3).abs() < 0.001);
    }

    #[test]
    fn test_backdating_and_undo_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let tracker = HabitTracker::new(temp_file.path().to_path_buf()).unwrap();
        let now = noon(15);

        add(&tracker, "Journal", TimePeriod::Daily, 1, now);

        // Backdate beyond the start date, then retract today's entry.
        log_completion(
            tracker.store(),
            tracker.engine(),
            LogParams {
                habit: "Journal".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            },
            now,
        )
        .unwrap();
        done_habit(
            tracker.store(),
            tracker.engine(),
            DoneParams { habit: "Journal".to_string() },
            now,
        )
        .unwrap();
        let undone = undo_completion(
            tracker.store(),
            tracker.engine(),
            UndoParams { habit: "Journal".to_string() },
            now,
        )
        .unwrap();
        assert_eq!(undone.total_completions, 1);

        let habit = find_habit(tracker.store(), "Journal").unwrap();
        assert_eq!(habit.start_date.date(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert!(habit.has_completion_on(noon(10)));
        assert!(!habit.has_completion_on(now));
    }

    #[test]
    fn test_weekly_habit_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let tracker = HabitTracker::new(temp_file.path().to_path_buf()).unwrap();
        // Friday 2024-03-15; the week started Monday 2024-03-11.
        let now = noon(15);

        add(&tracker, "Long run", TimePeriod::Weekly, 1, now);
        log_completion(
            tracker.store(),
            tracker.engine(),
            LogParams {
                habit: "Long run".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            },
            now,
        )
        .unwrap();

        let report = habit_status(
            tracker.store(),
            tracker.engine(),
            StatusParams { habit: Some("Long run".to_string()) },
            now,
        )
        .unwrap();
        assert_eq!(report.habits[0].status, "Complete");
        assert_eq!(report.habits[0].streak, 1);
        assert_eq!(report.habits[0].streak_unit, "week");
    }

    #[test]
    fn test_remove_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let tracker = HabitTracker::new(temp_file.path().to_path_buf()).unwrap();
        let now = noon(15);

        add(&tracker, "Reading", TimePeriod::Daily, 1, now);
        add(&tracker, "Running", TimePeriod::Daily, 1, now);

        remove_habit(tracker.store(), RemoveParams { habit: "Reading".to_string() }).unwrap();

        let remaining = tracker.store().list_habits().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Running");
    }

    #[test]
    fn test_history_grid_renders() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let tracker = HabitTracker::new(temp_file.path().to_path_buf()).unwrap();
        let now = noon(15);

        add(&tracker, "Reading", TimePeriod::Daily, 1, now - Duration::days(10));
        done_habit(
            tracker.store(),
            tracker.engine(),
            DoneParams { habit: "Reading".to_string() },
            now,
        )
        .unwrap();

        let history = habit_history(
            tracker.store(),
            tracker.engine(),
            HistoryParams { habit: "Reading".to_string() },
            now,
        )
        .unwrap();
        assert_eq!(history.days.len(), 11);
        assert!(history.message.contains("March 2024"));
        assert!(history.message.contains('✓'));
    }
}
