/// Public library interface for the momentum habit tracker
///
/// This module exports the domain types, the scoring engine, the storage
/// layer, and the command implementations the CLI binary dispatches to.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod commands;
mod domain;
mod storage;

// Re-export public modules and types
pub use commands::*;
pub use domain::*;
pub use storage::{HabitStore, SqliteStore, StorageError};

/// Errors that can occur while running the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main application handle tying the storage layer to the scoring engine
///
/// The binary (and the integration tests) construct one of these per run.
/// The engine itself is stateless; this struct only carries the open
/// database connection and the calendar configuration.
pub struct HabitTracker {
    store: SqliteStore,
    engine: ScoringEngine,
}

impl HabitTracker {
    /// Open (or create) the database at `db_path` with the default calendar
    pub fn new(db_path: PathBuf) -> Result<Self, AppError> {
        Self::with_engine(db_path, ScoringEngine::new())
    }

    /// Open the database with a specific engine configuration
    pub fn with_engine(db_path: PathBuf, engine: ScoringEngine) -> Result<Self, AppError> {
        tracing::info!("Opening habit database at {:?}", db_path);
        let store = SqliteStore::new(db_path)?;

        Ok(Self { store, engine })
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }
}
