/// Domain module containing core business logic and data types
///
/// This module defines the Habit aggregate, the calendar arithmetic it
/// depends on, and the scoring engine that derives scores, statuses, and
/// streaks from a habit's completion history.

pub mod calendar;
pub mod habit;
pub mod score;
pub mod types;

// Re-export public types for easy access
pub use calendar::*;
pub use habit::*;
pub use score::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit title: {0}")]
    InvalidTitle(String),

    #[error("Invalid required count: {0}")]
    InvalidRequiredCount(String),

    #[error("Invalid accent color: {0}")]
    InvalidColor(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
