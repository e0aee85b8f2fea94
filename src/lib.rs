/// Public library interface for the habit tracker
///
/// This module exports the habit store, the metric functions it relies on,
/// and the storage backends it can persist to.

pub mod analytics;
pub mod clock;
pub mod domain;
pub mod storage;
pub mod store;
pub mod transfer;

// Re-export public modules and types
pub use analytics::{best_streak, current_streak, progress_percentage, week_containing};
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::*;
pub use storage::{HabitRepository, KeyValueStore, MemoryStorage, SqliteStorage, StorageError, HABITS_KEY};
pub use store::{HabitProgress, HabitStore, Stats, StoreError};
pub use transfer::{backup_file_name, parse_import, ExportDocument, ImportError, EXPORT_VERSION};
