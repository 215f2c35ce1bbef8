/// SQLite implementation of the habit storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving habits. A habit row holds the configuration and
/// presentation fields; the completion history lives in the completions
/// table, one row per instant, and is loaded in ascending order so the
/// scoring engine's sorted-history invariant holds straight off disk.

use std::path::PathBuf;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::domain::{Habit, HabitId, TimePeriod};
use crate::storage::{migrations, HabitStore, StorageError};

/// Column list shared by every habit SELECT
const HABIT_COLUMNS: &str =
    "id, title, start_date, period, required_count, icon, color, messages, created_at";

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the storage operations defined in the HabitStore trait.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        // Enable foreign key constraints so deleting a habit cascades to
        // its completions.
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Map a habit row into a Habit with an empty completion history
    ///
    /// The history is attached afterwards by `load_completions`.
    fn map_habit_row(row: &rusqlite::Row) -> rusqlite::Result<Habit> {
        let id_str: String = row.get(0)?;
        let id = HabitId::parse(&id_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(0, "Invalid UUID".to_string(), rusqlite::types::Type::Text)
        })?;

        let period_str: String = row.get(3)?;
        let period = TimePeriod::parse(&period_str).ok_or_else(|| {
            rusqlite::Error::InvalidColumnType(3, "Invalid period".to_string(), rusqlite::types::Type::Text)
        })?;

        let messages_json: String = row.get(7)?;
        let messages = serde_json::from_str(&messages_json).map_err(|_| {
            rusqlite::Error::InvalidColumnType(7, "Invalid messages".to_string(), rusqlite::types::Type::Text)
        })?;

        Ok(Habit::from_existing(
            id,
            row.get(1)?, // title
            row.get(2)?, // start_date
            period,
            row.get(4)?, // required_count
            Vec::new(),
            row.get(5)?, // icon
            row.get(6)?, // color
            messages,
            row.get(8)?, // created_at
        ))
    }

    /// Load a habit's completion history, oldest first
    fn load_completions(&self, habit_id: &HabitId) -> Result<Vec<NaiveDateTime>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT completed_at FROM completions WHERE habit_id = ?1 ORDER BY completed_at ASC",
        )?;

        let rows = stmt.query_map(params![habit_id.to_string()], |row| row.get(0))?;

        let mut dates = Vec::new();
        for row in rows {
            dates.push(row?);
        }

        Ok(dates)
    }

    /// Insert every completion of `habit` into the completions table
    fn insert_completions(&self, habit: &Habit) -> Result<(), StorageError> {
        let mut stmt = self
            .conn
            .prepare("INSERT INTO completions (habit_id, completed_at) VALUES (?1, ?2)")?;

        for date in &habit.completed_dates {
            stmt.execute(params![habit.id.to_string(), date])?;
        }

        Ok(())
    }
}

impl HabitStore for SqliteStore {
    /// Persist a new habit and its (usually empty) completion history
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        let messages_json = serde_json::to_string(&habit.messages)?;

        let tx = self.conn.unchecked_transaction()?;

        self.conn.execute(
            "INSERT INTO habits (
                id, title, start_date, period, required_count, icon, color, messages, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                habit.id.to_string(),
                habit.title,
                habit.start_date,
                habit.time_period.as_str(),
                habit.required_count,
                habit.icon,
                habit.color,
                messages_json,
                habit.created_at,
            ],
        )?;
        self.insert_completions(habit)?;

        tx.commit()?;

        tracing::debug!("Created habit: {} ({})", habit.title, habit.id);
        Ok(())
    }

    /// Load a habit by its ID
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM habits WHERE id = ?1", HABIT_COLUMNS))?;

        let result = stmt.query_row(params![habit_id.to_string()], Self::map_habit_row);

        match result {
            Ok(mut habit) => {
                habit.completed_dates = self.load_completions(habit_id)?;
                Ok(habit)
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StorageError::HabitNotFound {
                habit: habit_id.to_string(),
            }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    /// Persist the current state of an existing habit
    ///
    /// The stored completion history is replaced wholesale; the habit's
    /// in-memory history is the source of truth after any mutation.
    fn update_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        let messages_json = serde_json::to_string(&habit.messages)?;

        let tx = self.conn.unchecked_transaction()?;

        let changed = self.conn.execute(
            "UPDATE habits SET
                title = ?2, start_date = ?3, period = ?4, required_count = ?5,
                icon = ?6, color = ?7, messages = ?8
             WHERE id = ?1",
            params![
                habit.id.to_string(),
                habit.title,
                habit.start_date,
                habit.time_period.as_str(),
                habit.required_count,
                habit.icon,
                habit.color,
                messages_json,
            ],
        )?;

        if changed == 0 {
            return Err(StorageError::HabitNotFound {
                habit: habit.id.to_string(),
            });
        }

        self.conn.execute(
            "DELETE FROM completions WHERE habit_id = ?1",
            params![habit.id.to_string()],
        )?;
        self.insert_completions(habit)?;

        tx.commit()?;

        tracing::debug!(
            "Updated habit: {} ({} completions)",
            habit.title,
            habit.completed_dates.len()
        );
        Ok(())
    }

    /// Delete a habit; completions cascade
    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError> {
        let deleted = self.conn.execute(
            "DELETE FROM habits WHERE id = ?1",
            params![habit_id.to_string()],
        )?;

        if deleted == 0 {
            return Err(StorageError::HabitNotFound {
                habit: habit_id.to_string(),
            });
        }

        tracing::debug!("Deleted habit: {}", habit_id);
        Ok(())
    }

    /// List all habits, oldest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM habits ORDER BY created_at ASC, id ASC",
            HABIT_COLUMNS
        ))?;

        let rows = stmt.query_map([], Self::map_habit_row)?;

        let mut habits = Vec::new();
        for row in rows {
            let mut habit = row?;
            habit.completed_dates = self.load_completions(&habit.id)?;
            habits.push(habit);
        }

        Ok(habits)
    }
}
