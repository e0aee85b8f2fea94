/// The habit store
///
/// `HabitStore` owns the habit collection for a session. It is hydrated once
/// from its repository when opened and flushes the whole collection back after
/// every successful mutation. Operations either fully apply or leave the
/// store untouched.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::clock::Clock;
use crate::domain::{Category, DomainError, Frequency, Habit, HabitId};
use crate::storage::{HabitRepository, KeyValueStore};
use crate::transfer::{self, ExportDocument, ImportError};

/// Errors reported by store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),

    #[error("Habit not found: {habit_id}")]
    NotFound { habit_id: String },

    #[error("Import failed: {0}")]
    ImportFormat(#[from] ImportError),

    #[error("Export failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Summary numbers across all habits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_habits: usize,
    pub completed_today: usize,
    pub best_streak_overall: u32,
}

/// A habit together with the values derived for today
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitProgress<'a> {
    pub habit: &'a Habit,
    pub progress: u8,
    pub completed_today: bool,
}

/// Owner of the habit collection
pub struct HabitStore<S: KeyValueStore> {
    habits: Vec<Habit>,
    repository: HabitRepository<S>,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore> HabitStore<S> {
    /// Open a store over `storage`, loading whatever it already holds
    ///
    /// Loaded streaks are refreshed against today, since days may have
    /// passed since they were last computed.
    pub fn open(storage: S, clock: impl Clock + 'static) -> Self {
        Self::with_repository(HabitRepository::new(storage), clock)
    }

    /// Open a store over an already configured repository
    pub fn with_repository(repository: HabitRepository<S>, clock: impl Clock + 'static) -> Self {
        let habits = repository.load_all();
        tracing::info!("Habit store opened with {} habits", habits.len());

        let mut store = Self {
            habits,
            repository,
            clock: Box::new(clock),
        };
        store.refresh_streaks();
        store
    }

    /// Wrap the store so it can be shared across threads
    ///
    /// Every operation then runs under one lock, which keeps ids unique and
    /// streaks consistent with completions.
    pub fn shared(self) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(self))
    }

    /// Today according to the store's clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Create a new habit and append it to the collection
    pub fn add(
        &mut self,
        name: &str,
        category: Category,
        frequency: Frequency,
    ) -> Result<Habit, StoreError> {
        let habit = Habit::new(name, category, frequency, self.clock.now())?;

        tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
        self.habits.push(habit.clone());
        self.flush();

        Ok(habit)
    }

    /// Change a habit's name, category and frequency
    ///
    /// Completions and streaks are left alone.
    pub fn edit(
        &mut self,
        id: &HabitId,
        name: &str,
        category: Category,
        frequency: Frequency,
    ) -> Result<Habit, StoreError> {
        let habit = self.find_mut(id)?;
        habit.update(name, category, frequency)?;

        tracing::debug!("Updated habit: {} ({})", habit.name, habit.id);
        let updated = habit.clone();
        self.flush();

        Ok(updated)
    }

    /// Remove a habit for good
    ///
    /// An unknown id is reported as `NotFound` and nothing is written.
    pub fn delete(&mut self, id: &HabitId) -> Result<(), StoreError> {
        let index = self.position(id)?;
        let removed = self.habits.remove(index);

        tracing::debug!("Deleted habit: {} ({})", removed.name, removed.id);
        self.flush();

        Ok(())
    }

    /// Flip the completion of `date` (today when `None`) and refresh streaks
    pub fn toggle_completion(
        &mut self,
        id: &HabitId,
        date: Option<NaiveDate>,
    ) -> Result<Habit, StoreError> {
        let today = self.today();
        let date = date.unwrap_or(today);

        let habit = self.find_mut(id)?;
        let done = habit.toggle_completion(date, today);

        tracing::debug!(
            "{} {} for {} (streak {}, best {})",
            if done { "Completed" } else { "Cleared" },
            habit.name,
            date,
            habit.streak,
            habit.best_streak
        );
        let toggled = habit.clone();
        self.flush();

        Ok(toggled)
    }

    /// Look up a habit by id
    pub fn get(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|habit| &habit.id == id)
    }

    /// All habits, newest first
    ///
    /// Habits created at the same instant keep their insertion order.
    pub fn list(&self) -> Vec<&Habit> {
        let mut habits: Vec<&Habit> = self.habits.iter().collect();
        habits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        habits
    }

    /// All habits in list order, with today's progress values
    pub fn list_with_progress(&self) -> Vec<HabitProgress<'_>> {
        let today = self.today();
        self.list()
            .into_iter()
            .map(|habit| HabitProgress {
                habit,
                progress: habit.progress(today),
                completed_today: habit.is_completed_on(today),
            })
            .collect()
    }

    /// Totals across the collection
    pub fn stats(&self) -> Stats {
        let today = self.today();

        Stats {
            total_habits: self.habits.len(),
            completed_today: self
                .habits
                .iter()
                .filter(|habit| habit.is_completed_on(today))
                .count(),
            best_streak_overall: self
                .habits
                .iter()
                .map(|habit| habit.best_streak)
                .max()
                .unwrap_or(0),
        }
    }

    /// Recompute every habit's streaks against today
    ///
    /// Not persisted on its own; the next mutation flushes the new values.
    pub fn refresh_streaks(&mut self) {
        let today = self.today();
        for habit in &mut self.habits {
            habit.refresh_streaks(today);
        }
    }

    /// Serialize the full collection as a backup document
    pub fn export_json(&self) -> Result<String, StoreError> {
        let document = ExportDocument::new(self.habits.clone(), self.clock.now());
        Ok(document.to_json()?)
    }

    /// Replace the whole collection with the habits in a backup document
    ///
    /// Nothing changes unless the document is valid. Returns the number of
    /// imported habits.
    pub fn import_json(&mut self, document: &str) -> Result<usize, StoreError> {
        let habits = transfer::parse_import(document).map_err(|e| {
            tracing::warn!("Rejected import document: {}", e);
            e
        })?;

        self.habits = habits;
        self.refresh_streaks();
        self.flush();

        tracing::info!("Imported {} habits", self.habits.len());
        Ok(self.habits.len())
    }

    /// Get a reference to the repository (useful for testing)
    pub fn repository(&self) -> &HabitRepository<S> {
        &self.repository
    }

    fn position(&self, id: &HabitId) -> Result<usize, StoreError> {
        self.habits
            .iter()
            .position(|habit| &habit.id == id)
            .ok_or_else(|| StoreError::NotFound {
                habit_id: id.to_string(),
            })
    }

    fn find_mut(&mut self, id: &HabitId) -> Result<&mut Habit, StoreError> {
        let index = self.position(id)?;
        Ok(&mut self.habits[index])
    }

    fn flush(&self) {
        self.repository.save_all(&self.habits);
    }
}
