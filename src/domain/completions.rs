/// The set of days a habit was completed on
///
/// Completions are sparse and open-ended, so they are kept as an ordered set
/// of calendar dates. On the wire they keep the persisted layout of a JSON
/// object mapping `YYYY-MM-DD` keys to `true`.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Date format of completion keys
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Ordered set of completion dates for a single habit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completions(BTreeSet<NaiveDate>);

impl Completions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the habit was done on `date`
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    /// Flip the presence of `date`, returning whether it is now present
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.0.remove(&date) {
            false
        } else {
            self.0.insert(date);
            true
        }
    }

    /// Whether any date inside `range` is present
    pub fn any_in(&self, range: RangeInclusive<NaiveDate>) -> bool {
        self.0.range(range).next().is_some()
    }

    /// Number of present dates inside `range`
    pub fn count_in(&self, range: RangeInclusive<NaiveDate>) -> usize {
        self.0.range(range).count()
    }

    /// Dates in ascending chronological order
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<NaiveDate> for Completions {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for Completions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|date| (date.format(DATE_KEY_FORMAT).to_string(), true)),
        )
    }
}

impl<'de> Deserialize<'de> for Completions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;

        let mut dates = BTreeSet::new();
        for (key, done) in raw {
            let date = NaiveDate::parse_from_str(&key, DATE_KEY_FORMAT)
                .map_err(|e| D::Error::custom(format!("invalid completion date '{}': {}", key, e)))?;
            // A false marker means "not completed", same as an absent key
            if done {
                dates.insert(date);
            }
        }

        Ok(Self(dates))
    }
}
