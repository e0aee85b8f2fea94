/// Export and import of habit backups
///
/// A backup is a JSON document holding the full habit list, the time it was
/// written and a format version. Import is all-or-nothing: the document is
/// fully validated before anything is handed back to the store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::{validate_collection, DomainError, Habit};

/// Format version written into every backup
pub const EXPORT_VERSION: &str = "1.0";

/// Errors that make an import document unusable
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Import document is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Import document has no 'habits' list")]
    MissingHabits,

    #[error("Invalid habit record: {0}")]
    InvalidHabit(#[source] serde_json::Error),

    #[error("Habit record has an empty id")]
    EmptyId,

    #[error("Duplicate habit id in import: {0}")]
    DuplicateId(String),

    #[error("Invalid habit: {0}")]
    InvalidName(#[source] DomainError),
}

impl From<DomainError> for ImportError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::EmptyHabitId => ImportError::EmptyId,
            DomainError::DuplicateHabitId(id) => ImportError::DuplicateId(id),
            other => ImportError::InvalidName(other),
        }
    }
}

/// Backup document layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub habits: Vec<Habit>,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

impl ExportDocument {
    pub fn new(habits: Vec<Habit>, export_date: DateTime<Utc>) -> Self {
        Self {
            habits,
            export_date,
            version: EXPORT_VERSION.to_string(),
        }
    }

    /// Pretty-printed JSON form of the document
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Suggested file name for a backup taken on `date`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("habits-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Parse and validate an import document, returning its habits
///
/// The document must be JSON with a `habits` array. Every record has to
/// deserialize, carry a usable name and a non-empty unique id. Names come
/// back trimmed.
pub fn parse_import(input: &str) -> Result<Vec<Habit>, ImportError> {
    let document: Value = serde_json::from_str(input).map_err(ImportError::InvalidJson)?;

    let records = match document.get("habits") {
        Some(Value::Array(records)) => records.clone(),
        _ => return Err(ImportError::MissingHabits),
    };

    let mut habits: Vec<Habit> =
        serde_json::from_value(Value::Array(records)).map_err(ImportError::InvalidHabit)?;
    validate_collection(&mut habits)?;

    Ok(habits)
}
