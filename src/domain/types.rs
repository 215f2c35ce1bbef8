/// Core types and enums used throughout the domain layer
///
/// This module defines the fundamental types like HabitId, TimePeriod, and
/// HabitStatus that are used by the Habit aggregate and the scoring engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a habit
///
/// This is a wrapper around UUID to provide type safety - you can't accidentally
/// pass some other string where a habit ID is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a habit ID from a string (useful for database loading)
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for HabitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The recurrence granularity of a habit
///
/// Determines the "period" unit used everywhere in the scoring engine:
/// a habit must collect its required completions once per calendar day,
/// calendar week, or calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    Daily,
    Weekly,
    Monthly,
}

impl TimePeriod {
    /// The singular unit name used in user-facing text ("3 day streak")
    pub fn unit_name(&self) -> &'static str {
        match self {
            TimePeriod::Daily => "day",
            TimePeriod::Weekly => "week",
            TimePeriod::Monthly => "month",
        }
    }

    /// Parse a period from user input (CLI arguments, database column)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Some(TimePeriod::Daily),
            "weekly" | "week" => Some(TimePeriod::Weekly),
            "monthly" | "month" => Some(TimePeriod::Monthly),
            _ => None,
        }
    }

    /// Stable string form for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Daily => "daily",
            TimePeriod::Weekly => "weekly",
            TimePeriod::Monthly => "monthly",
        }
    }
}

/// The derived completion state of a habit within the current period
///
/// `Pending(n)` carries the number of completions logged so far in the
/// current period, always strictly below the habit's required count.
/// This is never stored; it is recomputed from the completion history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HabitStatus {
    Complete,
    Pending(u32),
}

impl HabitStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, HabitStatus::Complete)
    }
}

impl std::fmt::Display for HabitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HabitStatus::Complete => write!(f, "Complete"),
            HabitStatus::Pending(count) => write!(f, "Pending: {}", count),
        }
    }
}
