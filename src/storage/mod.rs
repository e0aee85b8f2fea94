/// Storage layer for persisting habit data
///
/// Habits are persisted as a single JSON blob under one key of a key-value
/// store. This module defines the key-value interface, the SQLite and
/// in-memory backends, and the fail-soft repository the habit store talks to.

pub mod memory;
pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use memory::*;
pub use sqlite::*;

use thiserror::Error;

use crate::domain::{validate_collection, DomainError, Habit};

/// Key under which the habit list is persisted
pub const HABITS_KEY: &str = "habitTracker_habits";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Invalid stored habits: {0}")]
    InvalidData(#[from] DomainError),
}

/// Trait defining a flat key-value store
///
/// This keeps the habit store independent of where the blob actually lives.
pub trait KeyValueStore: Send {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Loads and saves the full habit list
///
/// Both directions fail soft: errors are logged and never propagated, so a
/// storage fault degrades to an empty or unchanged state instead of aborting
/// the session.
pub struct HabitRepository<S: KeyValueStore> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> HabitRepository<S> {
    /// Create a repository using the default habits key
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: HABITS_KEY.to_string(),
        }
    }

    /// Load every persisted habit
    ///
    /// Returns an empty list when nothing has been stored yet or when the
    /// stored data cannot be read.
    pub fn load_all(&self) -> Vec<Habit> {
        match self.try_load() {
            Ok(habits) => {
                tracing::debug!("Loaded {} habits from '{}'", habits.len(), self.key);
                habits
            }
            Err(e) => {
                tracing::error!("Error loading habits, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Persist the full habit list, logging any failure
    pub fn save_all(&self, habits: &[Habit]) {
        match self.try_save(habits) {
            Ok(()) => tracing::debug!("Saved {} habits to '{}'", habits.len(), self.key),
            Err(e) => tracing::error!("Error saving habits: {}", e),
        }
    }

    /// Get a reference to the underlying store (useful for testing)
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn try_load(&self) -> Result<Vec<Habit>, StorageError> {
        match self.storage.get(&self.key)? {
            Some(blob) => {
                let mut habits: Vec<Habit> = serde_json::from_str(&blob)?;
                validate_collection(&mut habits)?;
                Ok(habits)
            }
            None => Ok(Vec::new()),
        }
    }

    fn try_save(&self, habits: &[Habit]) -> Result<(), StorageError> {
        let blob = serde_json::to_string(habits)?;
        self.storage.set(&self.key, &blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Frequency};
    use chrono::{NaiveDate, TimeZone, Utc};

    /// Store whose every call fails
    struct BrokenStorage;

    impl KeyValueStore for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Connection("disk unplugged".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("disk unplugged".to_string()))
        }
    }

    fn sample_habits() -> Vec<Habit> {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let mut run = Habit::new("Run", Category::Health, Frequency::Daily, created).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        run.toggle_completion(today, today);
        let journal = Habit::new("Journal", Category::Mindfulness, Frequency::Weekly, created).unwrap();
        vec![run, journal]
    }

    #[test]
    fn test_round_trip() {
        let repository = HabitRepository::new(MemoryStorage::new());
        let habits = sample_habits();

        repository.save_all(&habits);

        assert_eq!(repository.load_all(), habits);
    }

    #[test]
    fn test_missing_key_loads_empty() {
        let repository = HabitRepository::new(MemoryStorage::new());
        assert!(repository.load_all().is_empty());
    }

    #[test]
    fn test_corrupt_blob_loads_empty() {
        let storage = MemoryStorage::new();
        storage.set(HABITS_KEY, "{not json").unwrap();

        let repository = HabitRepository::new(storage);
        assert!(repository.load_all().is_empty());
    }

    #[test]
    fn test_duplicate_ids_in_blob_load_empty() {
        let habits = sample_habits();
        let duplicated = vec![habits[0].clone(), habits[0].clone()];
        let storage = MemoryStorage::new();
        storage
            .set(HABITS_KEY, &serde_json::to_string(&duplicated).unwrap())
            .unwrap();

        let repository = HabitRepository::new(storage);
        assert!(repository.load_all().is_empty());
    }

    #[test]
    fn test_loaded_names_are_trimmed() {
        let mut habits = sample_habits();
        habits[0].name = "  Run  ".to_string();
        let storage = MemoryStorage::new();
        storage
            .set(HABITS_KEY, &serde_json::to_string(&habits).unwrap())
            .unwrap();

        let repository = HabitRepository::new(storage);
        assert_eq!(repository.load_all()[0].name, "Run");
    }

    #[test]
    fn test_failures_are_swallowed() {
        let repository = HabitRepository::new(BrokenStorage);
        repository.save_all(&sample_habits());
        assert!(repository.load_all().is_empty());
    }

    #[test]
    fn test_blob_is_a_json_array() {
        let repository = HabitRepository::new(MemoryStorage::new());
        repository.save_all(&sample_habits());

        let blob = repository.storage().get(HABITS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert!(value.is_array());
        assert!(value[0]["completions"]["2024-03-14"].as_bool().unwrap());
        assert_eq!(value[0]["bestStreak"], 1);
    }
}
