use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entry_id::EntryId;
use super::meal_type::MealType;

/// A logged meal. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    pub id: EntryId,
    pub description: String,
    pub calories: u32,
    pub meal_type: MealType,
    pub logged_at: DateTime<Utc>,
}

impl MealEntry {
    pub fn new(description: impl Into<String>, calories: u32, meal_type: MealType) -> Self {
        Self {
            id: EntryId::next(),
            description: description.into(),
            calories,
            meal_type,
            logged_at: Utc::now(),
        }
    }
}

impl fmt::Display for MealEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} kcal", self.description, self.calories)
    }
}
