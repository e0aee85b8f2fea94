/// Core types and enums used throughout the domain layer
///
/// This module defines the fundamental types like Category, Frequency, and the
/// habit ID type that are used by Habit and the metrics functions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// New habits get a random UUID, but any string is accepted when loading
/// persisted data or importing a backup, so older ids keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// View the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for HabitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for HabitId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Categories for organizing habits into different life areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Exercise, diet, sleep
    Health,
    /// Work habits and focus routines
    Productivity,
    /// Studying and skill building
    Learning,
    /// Meditation, reflection, gratitude practices
    Mindfulness,
    /// Relationship and communication habits
    Social,
    /// Creative pursuits (art, writing, music)
    Creative,
    /// Anything else
    Other,
}

impl Category {
    /// Every category, in the order they are offered to the user
    pub const ALL: [Category; 7] = [
        Category::Health,
        Category::Productivity,
        Category::Learning,
        Category::Mindfulness,
        Category::Social,
        Category::Creative,
        Category::Other,
    ];

    /// Get the display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Health => "Health & Fitness",
            Category::Productivity => "Productivity",
            Category::Learning => "Learning",
            Category::Mindfulness => "Mindfulness",
            Category::Social => "Social",
            Category::Creative => "Creative",
            Category::Other => "Other",
        }
    }

    /// The lowercase key used in persisted data
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Health => "health",
            Category::Productivity => "productivity",
            Category::Learning => "learning",
            Category::Mindfulness => "mindfulness",
            Category::Social => "social",
            Category::Creative => "creative",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| {
                DomainError::InvalidCategory(format!(
                    "'{}'. Valid options: health, productivity, learning, mindfulness, social, creative, other",
                    s
                ))
            })
    }
}

/// How often a habit should be performed
///
/// The frequency decides which window the progress percentage looks at:
/// the last 7 days for daily habits, the last 4 weeks for weekly ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every single day
    Daily,
    /// At least once per Sunday-to-Saturday week
    Weekly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            _ => Err(DomainError::InvalidFrequency(format!(
                "'{}'. Valid options: daily, weekly",
                s
            ))),
        }
    }
}
