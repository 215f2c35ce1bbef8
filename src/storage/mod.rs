/// Storage layer for persisting habit data
///
/// This module handles all database operations using SQLite. It provides
/// a clean interface for storing and retrieving habits together with their
/// completion histories. The scoring engine never touches this layer; it
/// works on the Habit values loaded here.

pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use sqlite::*;

use thiserror::Error;
use crate::domain::{Habit, HabitId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Habit not found: {habit}")]
    HabitNotFound { habit: String },

    #[error("'{query}' matches more than one habit; use a longer prefix")]
    AmbiguousHabit { query: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for habits
///
/// This trait allows us to potentially swap out SQLite for other databases
/// in the future while keeping the same interface. A habit and its
/// completion history are saved and loaded as one aggregate; loads always
/// return `completed_dates` sorted ascending.
pub trait HabitStore {
    /// Persist a new habit (including any backdated completions)
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Load a habit by ID
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError>;

    /// Persist the current state of an existing habit
    ///
    /// Replaces the stored completion history with the habit's, so every
    /// in-memory mutation (complete, backdated log, undo) round-trips.
    fn update_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Delete a habit and its completion history
    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError>;

    /// List all habits, oldest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError>;
}
