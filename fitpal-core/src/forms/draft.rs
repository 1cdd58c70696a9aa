//! Draft state shared by the meal and workout forms.
//!
//! An estimate borrows the draft mutably until it completes or is dropped,
//! so a form can never have two estimates in flight.

use crate::estimation::EstimationError;

use super::error::{FormError, FILL_ALL_FIELDS};

#[derive(Debug, Default, Clone)]
pub(crate) struct Draft {
    pub description: String,
    pub calories: Option<u32>,
}

impl Draft {
    /// Run `estimate` on the trimmed description and pre-fill calories on
    /// success. `missing` is the message shown for an empty description.
    pub async fn estimate<F, Fut>(&mut self, missing: &str, estimate: F) -> Result<u32, FormError>
    where
        F: FnOnce(String) -> Fut,
        Fut: std::future::Future<Output = Result<u32, EstimationError>>,
    {
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(FormError::validation(missing));
        }

        match estimate(description).await {
            Ok(calories) => {
                self.calories = Some(calories);
                Ok(calories)
            }
            Err(e) => {
                tracing::warn!(error = %e, "calorie estimate unavailable");
                Err(FormError::Estimation(e))
            }
        }
    }

    /// The trimmed description and positive calorie count, if both are valid.
    pub fn validated(&self) -> Result<(String, u32), FormError> {
        let description = self.description.trim();
        match self.calories {
            Some(calories) if calories > 0 && !description.is_empty() => {
                Ok((description.to_string(), calories))
            }
            _ => Err(FormError::validation(FILL_ALL_FIELDS)),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
