use crate::estimation::{Estimator, TextGenerator};
use crate::models::WorkoutEntry;
use crate::tracker::Tracker;

use super::draft::Draft;
use super::error::FormError;

const MISSING_WORKOUT: &str = "Please enter a workout description.";

/// Draft of a workout being logged.
#[derive(Debug, Default, Clone)]
pub struct WorkoutForm {
    draft: Draft,
}

impl WorkoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_calories_burned(&mut self, calories: Option<u32>) {
        self.draft.calories = calories;
    }

    pub fn description(&self) -> &str {
        &self.draft.description
    }

    pub fn calories_burned(&self) -> Option<u32> {
        self.draft.calories
    }

    pub async fn request_estimate<G: TextGenerator>(
        &mut self,
        estimator: &Estimator<G>,
    ) -> Result<u32, FormError> {
        self.draft
            .estimate(MISSING_WORKOUT, |description| async move {
                estimator.estimate_workout_calories(&description).await
            })
            .await
    }

    pub fn submit(&mut self, tracker: &mut Tracker) -> Result<WorkoutEntry, FormError> {
        let (description, calories_burned) = self.draft.validated()?;
        let entry = tracker.add_workout(description, calories_burned).clone();
        self.cancel();
        Ok(entry)
    }

    pub fn cancel(&mut self) {
        self.draft.reset();
    }
}
