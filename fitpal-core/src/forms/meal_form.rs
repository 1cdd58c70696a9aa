use crate::estimation::{Estimator, TextGenerator};
use crate::models::{MealEntry, MealType};
use crate::tracker::Tracker;

use super::draft::Draft;
use super::error::FormError;

const MISSING_FOOD: &str = "Please enter a food description.";

/// Draft of a meal being logged.
#[derive(Debug, Default, Clone)]
pub struct MealForm {
    draft: Draft,
    meal_type: MealType,
}

impl MealForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_calories(&mut self, calories: Option<u32>) {
        self.draft.calories = calories;
    }

    pub fn set_meal_type(&mut self, meal_type: MealType) {
        self.meal_type = meal_type;
    }

    pub fn description(&self) -> &str {
        &self.draft.description
    }

    pub fn calories(&self) -> Option<u32> {
        self.draft.calories
    }

    pub fn meal_type(&self) -> MealType {
        self.meal_type
    }

    /// Ask the estimator for the description's calories and pre-fill them.
    ///
    /// An empty description fails before any request is made. On failure the
    /// calorie field keeps whatever value it had.
    pub async fn request_estimate<G: TextGenerator>(
        &mut self,
        estimator: &Estimator<G>,
    ) -> Result<u32, FormError> {
        self.draft
            .estimate(MISSING_FOOD, |description| async move {
                estimator.estimate_food_calories(&description).await
            })
            .await
    }

    /// Validate the draft and commit it to `tracker`, then reset the form.
    pub fn submit(&mut self, tracker: &mut Tracker) -> Result<MealEntry, FormError> {
        let (description, calories) = self.draft.validated()?;
        let entry = tracker.add_meal(description, calories, self.meal_type).clone();
        self.cancel();
        Ok(entry)
    }

    /// Discard the draft.
    pub fn cancel(&mut self) {
        self.draft.reset();
        self.meal_type = MealType::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::testing::{estimator, ScriptedGenerator};
    use crate::estimation::EstimationError;
    use std::time::Duration;

    #[test]
    fn test_submit_adds_meal_and_resets() {
        let mut tracker = Tracker::new();
        let mut form = MealForm::new();
        form.set_description("  grilled chicken  ");
        form.set_calories(Some(420));
        form.set_meal_type(MealType::Dinner);

        let entry = form.submit(&mut tracker).unwrap();

        assert_eq!(entry.description, "grilled chicken");
        assert_eq!(entry.meal_type, MealType::Dinner);
        assert_eq!(tracker.total_consumed(), 420);
        assert_eq!(form.description(), "");
        assert_eq!(form.calories(), None);
        assert_eq!(form.meal_type(), MealType::Breakfast);
    }

    #[test]
    fn test_submit_rejects_invalid_drafts() {
        let mut tracker = Tracker::new();

        let cases = [("", Some(100)), ("   ", Some(100)), ("apple", None), ("apple", Some(0))];
        for (description, calories) in cases {
            let mut form = MealForm::new();
            form.set_description(description);
            form.set_calories(calories);

            let err = form.submit(&mut tracker).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Please fill out all fields with valid values."
            );
            assert_eq!(form.description(), description);
        }
        assert!(tracker.is_empty());
    }

    #[tokio::test]
    async fn test_estimate_prefills_calories() {
        let estimator = estimator(vec![Ok("95")]);
        let mut form = MealForm::new();
        form.set_description("1 apple");

        assert_eq!(form.request_estimate(&estimator).await.unwrap(), 95);
        assert_eq!(form.calories(), Some(95));
    }

    #[tokio::test]
    async fn test_empty_description_skips_request() {
        let estimator = estimator(vec![Ok("95")]);
        let mut form = MealForm::new();
        form.set_description("  ");

        let err = form.request_estimate(&estimator).await.unwrap_err();
        assert_eq!(
            err,
            FormError::Validation("Please enter a food description.".into())
        );
        assert_eq!(estimator.generator().calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_estimate_keeps_manual_value() {
        let estimator = estimator(vec![Ok("no idea")]);
        let mut form = MealForm::new();
        form.set_description("mystery stew");
        form.set_calories(Some(300));

        let err = form.request_estimate(&estimator).await.unwrap_err();
        assert!(matches!(
            err,
            FormError::Estimation(EstimationError::NoNumber(_))
        ));
        assert_eq!(
            err.to_string(),
            "Could not estimate calories. Please enter manually."
        );
        assert_eq!(form.calories(), Some(300));
    }

    #[tokio::test]
    async fn test_form_usable_after_abandoned_estimate() {
        let generator = ScriptedGenerator::new(vec![Ok("100")])
            .with_delay(Duration::from_millis(100));
        let estimator = Estimator::new(generator);
        let mut form = MealForm::new();
        form.set_description("soup");

        let outcome =
            tokio::time::timeout(Duration::from_millis(10), form.request_estimate(&estimator))
                .await;
        assert!(outcome.is_err());
        assert_eq!(form.calories(), None);

        let calories = form.request_estimate(&estimator).await.unwrap();
        assert_eq!(calories, 100);
        assert_eq!(form.calories(), Some(100));
        assert_eq!(estimator.generator().calls(), 2);
    }

    #[test]
    fn test_cancel_resets_draft() {
        let mut form = MealForm::new();
        form.set_description("cake");
        form.set_calories(Some(500));
        form.set_meal_type(MealType::Snack);

        form.cancel();

        assert_eq!(form.description(), "");
        assert_eq!(form.calories(), None);
        assert_eq!(form.meal_type(), MealType::Breakfast);
    }
}
