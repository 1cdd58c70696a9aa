//! In-memory entry aggregator for one session.
//!
//! Entries are only ever appended. Totals are summed from the collections on
//! every call, so they always reflect the latest committed entries.

use crate::models::{MealEntry, MealType, WorkoutEntry};

/// Holds the meals and workouts committed during a session.
#[derive(Debug, Default, Clone)]
pub struct Tracker {
    meals: Vec<MealEntry>,
    workouts: Vec<WorkoutEntry>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a meal. Inputs are expected to be validated by the caller.
    pub fn add_meal(
        &mut self,
        description: impl Into<String>,
        calories: u32,
        meal_type: MealType,
    ) -> &MealEntry {
        let meal = MealEntry::new(description, calories, meal_type);
        tracing::debug!(id = %meal.id, calories, %meal_type, "meal added");
        self.meals.push(meal);
        &self.meals[self.meals.len() - 1]
    }

    /// Append a workout. Inputs are expected to be validated by the caller.
    pub fn add_workout(
        &mut self,
        description: impl Into<String>,
        calories_burned: u32,
    ) -> &WorkoutEntry {
        let workout = WorkoutEntry::new(description, calories_burned);
        tracing::debug!(id = %workout.id, calories_burned, "workout added");
        self.workouts.push(workout);
        &self.workouts[self.workouts.len() - 1]
    }

    pub fn total_consumed(&self) -> u64 {
        self.meals.iter().map(|m| u64::from(m.calories)).sum()
    }

    pub fn total_burned(&self) -> u64 {
        self.workouts
            .iter()
            .map(|w| u64::from(w.calories_burned))
            .sum()
    }

    /// Consumed minus burned. Negative when more was burned than eaten.
    pub fn net_calories(&self) -> i64 {
        self.total_consumed() as i64 - self.total_burned() as i64
    }

    /// Meals of one type, in the order they were added.
    pub fn meals_by_type(&self, meal_type: MealType) -> Vec<&MealEntry> {
        self.meals
            .iter()
            .filter(|m| m.meal_type == meal_type)
            .collect()
    }

    pub fn meals(&self) -> &[MealEntry] {
        &self.meals
    }

    pub fn workouts(&self) -> &[WorkoutEntry] {
        &self.workouts
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty() && self.workouts.is_empty()
    }
}
