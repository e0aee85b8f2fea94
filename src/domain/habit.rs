/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a user's habit
/// they want to track, along with its validation rules.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics;
use crate::domain::{Category, Completions, DomainError, Frequency, HabitId};

/// Longest accepted habit name, in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// A habit represents something the user wants to do regularly
///
/// Besides the user-supplied fields, a habit carries its completion days and
/// two derived fields, `streak` and `best_streak`, which are refreshed every
/// time the completions change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read for 30min")
    pub name: String,
    /// Category for organization (health, productivity, etc.)
    pub category: Category,
    /// How often this habit should be performed
    pub frequency: Frequency,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
    /// Days on which the habit was done
    #[serde(default)]
    pub completions: Completions,
    /// Current run of consecutive days, ending today or yesterday
    #[serde(default)]
    pub streak: u32,
    /// Longest run ever observed; never decreases
    #[serde(default)]
    pub best_streak: u32,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// The name is stored trimmed. Completions start empty and both
    /// streak counters start at zero.
    pub fn new(
        name: &str,
        category: Category,
        frequency: Frequency,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let name = Self::validate_name(name)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            category,
            frequency,
            created_at,
            completions: Completions::new(),
            streak: 0,
            best_streak: 0,
        })
    }

    /// Replace the user-editable fields
    ///
    /// Completions and streak counters are left untouched. Nothing changes
    /// if the new name is invalid.
    pub fn update(
        &mut self,
        name: &str,
        category: Category,
        frequency: Frequency,
    ) -> Result<(), DomainError> {
        let name = Self::validate_name(name)?;

        self.name = name;
        self.category = category;
        self.frequency = frequency;

        Ok(())
    }

    /// Whether the habit was done on `date`
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completions.contains(date)
    }

    /// Flip the completion for `date` and refresh the streaks relative to `today`
    ///
    /// Returns whether `date` is now marked as done.
    pub fn toggle_completion(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        let done = self.completions.toggle(date);
        self.refresh_streaks(today);
        done
    }

    /// Recompute `streak` and `best_streak` from the completion set
    pub fn refresh_streaks(&mut self, today: NaiveDate) {
        self.streak = analytics::current_streak(&self.completions, today);
        // Keep the historical best even if old days have been un-marked
        self.best_streak = self
            .best_streak
            .max(analytics::best_streak(&self.completions));
    }

    /// Progress over the habit's window, as a whole percentage
    pub fn progress(&self, today: NaiveDate) -> u8 {
        analytics::progress_percentage(self, today)
    }

    /// Validate a habit name, returning the trimmed form
    pub fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::InvalidHabitName(format!(
                "Habit name cannot be longer than {} characters",
                MAX_NAME_LENGTH
            )));
        }

        Ok(trimmed.to_string())
    }
}

/// Check a habit list coming from outside the store
///
/// Ids must be non-empty and unique. Names are validated and stored trimmed.
/// The list is only partly normalized when an error is returned, so callers
/// should discard it in that case.
pub fn validate_collection(habits: &mut [Habit]) -> Result<(), DomainError> {
    let mut seen = HashSet::new();

    for habit in habits.iter_mut() {
        if habit.id.as_str().is_empty() {
            return Err(DomainError::EmptyHabitId);
        }
        if !seen.insert(habit.id.clone()) {
            return Err(DomainError::DuplicateHabitId(habit.id.to_string()));
        }
        habit.name = Habit::validate_name(&habit.name)?;
    }

    Ok(())
}
