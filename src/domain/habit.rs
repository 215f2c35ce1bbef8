/// Habit aggregate and its mutation operations
///
/// This module defines the core Habit struct that represents a recurring
/// habit the user wants to keep, along with validation and the pure
/// in-memory operations that record or retract completions.
///
/// The struct is a plain value: every derived quantity (score, status,
/// streak) is recomputed from `completed_dates` by the scoring engine, so
/// nothing here caches state.

use serde::{Deserialize, Serialize};
use chrono::{Local, NaiveDateTime};

use crate::domain::{DomainError, HabitId, TimePeriod};

/// Default icon assigned when the user doesn't pick one
pub const DEFAULT_ICON: &str = "circle";

/// A habit the user wants to complete `required_count` times per period
///
/// `completed_dates` is the full completion history, sorted ascending at all
/// times. It may contain several entries within one period (a habit that
/// must be done three times a day produces up to three entries per day).
/// The scoring engine relies on the ascending order; all inserts go through
/// `add_completion`, which keeps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read for 30min")
    pub title: String,
    /// Instant before which the habit did not exist; completions are
    /// meaningless before this
    pub start_date: NaiveDateTime,
    /// Recurrence granularity (daily, weekly, monthly)
    pub time_period: TimePeriod,
    /// Completions needed within one period to satisfy that period
    pub required_count: u32,
    /// Completion history, ascending
    pub completed_dates: Vec<NaiveDateTime>,
    /// Icon name shown next to the habit
    pub icon: String,
    /// Accent color as a `#rrggbb` hex string
    pub color: Option<String>,
    /// Motivational messages shown when the habit is overdue
    pub messages: Vec<String>,
    /// When this habit was created
    pub created_at: NaiveDateTime,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// This is the main constructor. The completion history starts empty;
    /// `start_date` may be backdated if the user wants credit for earlier
    /// effort.
    pub fn new(
        title: String,
        time_period: TimePeriod,
        required_count: u32,
        start_date: NaiveDateTime,
        icon: Option<String>,
        color: Option<String>,
        messages: Vec<String>,
    ) -> Result<Self, DomainError> {
        Self::validate_title(&title)?;
        Self::validate_required_count(required_count)?;
        Self::validate_color(&color)?;
        Self::validate_messages(&messages)?;

        Ok(Self {
            id: HabitId::new(),
            title,
            start_date,
            time_period,
            required_count,
            completed_dates: Vec::new(),
            icon: icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            color,
            messages,
            created_at: Local::now().naive_local(),
        })
    }

    /// Create a habit from existing data (used when loading from the database)
    ///
    /// Assumes the data was validated when first stored. `completed_dates`
    /// must already be sorted ascending; the storage layer loads it ordered.
    #[allow(clippy::too_many_arguments)]
    pub fn from_existing(
        id: HabitId,
        title: String,
        start_date: NaiveDateTime,
        time_period: TimePeriod,
        required_count: u32,
        completed_dates: Vec<NaiveDateTime>,
        icon: String,
        color: Option<String>,
        messages: Vec<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            title,
            start_date,
            time_period,
            required_count,
            completed_dates,
            icon,
            color,
            messages,
            created_at,
        }
    }

    /// Record a completion at `date`, keeping the history sorted
    ///
    /// Supports backdating: if `date` precedes the start date, the start
    /// date is pulled back so the new completion stays inside the habit's
    /// lifetime.
    pub fn add_completion(&mut self, date: NaiveDateTime) {
        if date < self.start_date {
            self.start_date = date;
        }
        let index = self.completed_dates.partition_point(|d| *d < date);
        self.completed_dates.insert(index, date);
    }

    /// Append a completion at `now`
    ///
    /// Fast path for "complete now": `now` is at or after every existing
    /// entry, so a plain append preserves the sorted invariant.
    pub fn push_completion(&mut self, now: NaiveDateTime) {
        self.completed_dates.push(now);
    }

    /// Remove the first completion falling on the same calendar day as `date`
    ///
    /// Used for backdated corrections. Returns whether an entry was removed.
    pub fn remove_completion(&mut self, date: NaiveDateTime) -> bool {
        let day = date.date();
        if let Some(index) = self.completed_dates.iter().position(|d| d.date() == day) {
            self.completed_dates.remove(index);
            true
        } else {
            false
        }
    }

    /// Whether any completion falls on the same calendar day as `date`
    pub fn has_completion_on(&self, date: NaiveDateTime) -> bool {
        let day = date.date();
        self.completed_dates.iter().any(|d| d.date() == day)
    }

    /// User-facing schedule summary, e.g. "Once a day" or "3 times a week"
    pub fn schedule_description(&self) -> String {
        let count = match self.required_count {
            1 => "Once".to_string(),
            2 => "Twice".to_string(),
            n => format!("{} times", n),
        };
        format!("{} a {}", count, self.time_period.unit_name())
    }

    // Validation helper methods

    /// Validate habit title according to business rules
    fn validate_title(title: &str) -> Result<(), DomainError> {
        let trimmed = title.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidTitle(
                "Habit title cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidTitle(
                "Habit title cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate the per-period required completion count
    fn validate_required_count(count: u32) -> Result<(), DomainError> {
        if count == 0 {
            return Err(DomainError::InvalidRequiredCount(
                "Required count must be at least 1".to_string(),
            ));
        }
        if count > 100 {
            return Err(DomainError::InvalidRequiredCount(
                "Required count cannot exceed 100".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate the optional accent color (`#rrggbb`)
    fn validate_color(color: &Option<String>) -> Result<(), DomainError> {
        if let Some(color) = color {
            let valid = color.len() == 7
                && color.starts_with('#')
                && color[1..].chars().all(|c| c.is_ascii_hexdigit());
            if !valid {
                return Err(DomainError::InvalidColor(format!(
                    "Expected a color like #4a90d9, got '{}'",
                    color
                )));
            }
        }
        Ok(())
    }

    /// Validate the optional motivational messages
    fn validate_messages(messages: &[String]) -> Result<(), DomainError> {
        for message in messages {
            if message.trim().is_empty() {
                return Err(DomainError::Validation {
                    message: "Messages cannot be empty".to_string(),
                });
            }
            if message.len() > 200 {
                return Err(DomainError::Validation {
                    message: "Messages cannot be longer than 200 characters".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn test_habit() -> Habit {
        Habit::new(
            "Morning Run".to_string(),
            TimePeriod::Daily,
            1,
            day(10, 8),
            None,
            None,
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_create_valid_habit() {
        let habit = Habit::new(
            "Reading".to_string(),
            TimePeriod::Weekly,
            3,
            day(1, 9),
            Some("book".to_string()),
            Some("#4a90d9".to_string()),
            vec!["Remember why you started".to_string()],
        );

        assert!(habit.is_ok());
        let habit = habit.unwrap();
        assert_eq!(habit.title, "Reading");
        assert_eq!(habit.time_period, TimePeriod::Weekly);
        assert_eq!(habit.required_count, 3);
        assert!(habit.completed_dates.is_empty());
        assert_eq!(habit.icon, "book");
    }

    #[test]
    fn test_default_icon() {
        assert_eq!(test_habit().icon, DEFAULT_ICON);
    }

    #[test]
    fn test_invalid_title() {
        let result = Habit::new(
            "   ".to_string(),
            TimePeriod::Daily,
            1,
            day(10, 8),
            None,
            None,
            Vec::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_required_count() {
        let result = Habit::new(
            "Stretch".to_string(),
            TimePeriod::Daily,
            0,
            day(10, 8),
            None,
            None,
            Vec::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_color() {
        for bad in ["4a90d9", "#4a90", "#4a90dz", "blue"] {
            let result = Habit::new(
                "Stretch".to_string(),
                TimePeriod::Daily,
                1,
                day(10, 8),
                None,
                Some(bad.to_string()),
                Vec::new(),
            );
            assert!(result.is_err(), "color '{}' should be rejected", bad);
        }
    }

    #[test]
    fn test_add_completion_keeps_order() {
        let mut habit = test_habit();
        habit.add_completion(day(12, 9));
        habit.add_completion(day(11, 9));
        habit.add_completion(day(12, 7));
        assert_eq!(habit.completed_dates, vec![day(11, 9), day(12, 7), day(12, 9)]);
    }

    #[test]
    fn test_add_completion_backdates_start() {
        let mut habit = test_habit();
        assert_eq!(habit.start_date, day(10, 8));
        habit.add_completion(day(5, 9));
        assert_eq!(habit.start_date, day(5, 9));
        assert_eq!(habit.completed_dates, vec![day(5, 9)]);
    }

    #[test]
    fn test_remove_completion_first_match_on_day() {
        let mut habit = test_habit();
        habit.add_completion(day(11, 7));
        habit.add_completion(day(11, 19));
        habit.add_completion(day(12, 7));

        assert!(habit.remove_completion(day(11, 23)));
        assert_eq!(habit.completed_dates, vec![day(11, 19), day(12, 7)]);

        assert!(!habit.remove_completion(day(13, 0)));
        assert_eq!(habit.completed_dates.len(), 2);
    }

    #[test]
    fn test_has_completion_on() {
        let mut habit = test_habit();
        habit.add_completion(day(11, 7));
        assert!(habit.has_completion_on(day(11, 22)));
        assert!(!habit.has_completion_on(day(12, 7)));
    }

    #[test]
    fn test_schedule_description() {
        let mut habit = test_habit();
        assert_eq!(habit.schedule_description(), "Once a day");
        habit.required_count = 2;
        assert_eq!(habit.schedule_description(), "Twice a day");
        habit.required_count = 3;
        habit.time_period = TimePeriod::Monthly;
        assert_eq!(habit.schedule_description(), "3 times a month");
    }
}
