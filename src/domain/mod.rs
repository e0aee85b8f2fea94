/// Domain module containing core business logic and data types
///
/// This module defines the core entity (Habit), its completion set, and their
/// validation rules. These types represent the fundamental concepts in our
/// habit tracking system.

pub mod completions;
pub mod habit;
pub mod types;

// Re-export public types for easy access
pub use completions::*;
pub use habit::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Habit id cannot be empty")]
    EmptyHabitId,

    #[error("Duplicate habit id: {0}")]
    DuplicateHabitId(String),
}
