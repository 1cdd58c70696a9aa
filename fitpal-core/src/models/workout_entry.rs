use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entry_id::EntryId;

/// A logged workout. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub id: EntryId,
    pub description: String,
    pub calories_burned: u32,
    pub logged_at: DateTime<Utc>,
}

impl WorkoutEntry {
    pub fn new(description: impl Into<String>, calories_burned: u32) -> Self {
        Self {
            id: EntryId::next(),
            description: description.into(),
            calories_burned,
            logged_at: Utc::now(),
        }
    }
}

impl fmt::Display for WorkoutEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} kcal", self.description, self.calories_burned)
    }
}
