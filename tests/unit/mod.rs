/// Unit tests exercising the public library surface
use momentum::*;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tempfile::NamedTempFile;

fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[cfg(test)]
mod public_surface_tests {
    use super::*;

    #[test]
    fn test_habit_creation() {
        let habit = Habit::new(
            "Morning Run".to_string(),
            TimePeriod::Daily,
            1,
            noon(2024, 3, 15),
            None,
            None,
            Vec::new(),
        );

        assert!(habit.is_ok());
        let habit = habit.unwrap();
        assert_eq!(habit.title, "Morning Run");
        assert_eq!(habit.schedule_description(), "Once a day");
    }

    #[test]
    fn test_engine_score_and_status_agree() {
        let engine = ScoringEngine::new();
        let now = noon(2024, 3, 15);

        let mut habit = Habit::new(
            "Hydrate".to_string(),
            TimePeriod::Daily,
            3,
            now - Duration::days(2),
            None,
            None,
            Vec::new(),
        )
        .unwrap();

        for _ in 0..3 {
            engine.complete(&mut habit, now);
        }

        assert!(engine.status(&habit, now).is_complete());
        assert_eq!(engine.completions_in_period(&habit, now), 3);
        // Two decayed past days leave only today's reward.
        let score = engine.calculate_score(&habit, now);
        assert!((score - 0.1).abs() < 0.001);
    }

    #[test]
    fn test_score_stays_in_unit_interval() {
        let engine = ScoringEngine::new();
        let now = noon(2024, 3, 15);

        let mut habit = Habit::new(
            "Stretch".to_string(),
            TimePeriod::Daily,
            1,
            now - Duration::days(40),
            None,
            None,
            Vec::new(),
        )
        .unwrap();

        // Sparse, irregular history with long gaps.
        for n in [40, 39, 35, 20, 19, 18, 17, 16, 15, 14, 2, 0] {
            habit.add_completion(now - Duration::days(n));
        }

        let score = engine.calculate_score(&habit, now);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_completion_map_spans_lifetime() {
        let engine = ScoringEngine::new();
        let now = noon(2024, 3, 15);

        let mut habit = Habit::new(
            "Reading".to_string(),
            TimePeriod::Weekly,
            2,
            now - Duration::days(9),
            None,
            None,
            Vec::new(),
        )
        .unwrap();
        habit.add_completion(now - Duration::days(4));

        let map = engine.completion_map(&habit, now);
        assert_eq!(map.len(), 10);
        assert_eq!(map[&(now - Duration::days(4)).date()], 1);
    }

    #[test]
    fn test_storage_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStore::new(temp_file.path().to_path_buf());
        assert!(storage.is_ok());
    }

    #[test]
    fn test_tracker_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let tracker = HabitTracker::new(temp_file.path().to_path_buf());
        assert!(tracker.is_ok());
    }

    #[test]
    fn test_storage_interface() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStore::new(temp_file.path().to_path_buf()).expect("Failed to open");

        // Storage implements the HabitStore trait object-safely.
        let _: &dyn HabitStore = &storage;
    }
}
