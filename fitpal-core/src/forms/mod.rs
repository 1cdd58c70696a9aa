//! Entry forms: draft state, validation and estimate pre-fill.
//!
//! A form only touches the tracker on a successful submit.

mod draft;
mod error;
mod meal_form;
mod workout_form;

pub use error::FormError;
pub use meal_form::MealForm;
pub use workout_form::WorkoutForm;
