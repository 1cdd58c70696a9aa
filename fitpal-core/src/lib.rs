//! fitpal core library
//!
//! Meal and workout tracking for a single session, calorie estimation
//! through a text-generation service, and the dashboard view over both.

pub mod dashboard;
pub mod estimation;
pub mod forms;
pub mod models;
pub mod progress;
pub mod tracker;

pub use dashboard::{Dashboard, DashboardSummary};
pub use estimation::{
    EstimationConfig, EstimationError, Estimator, GeminiClient, TextGenerator,
};
pub use forms::{FormError, MealForm, WorkoutForm};
pub use models::{EntryId, MealEntry, MealType, WorkoutEntry};
pub use progress::Progress;
pub use tracker::Tracker;

/// Daily calorie goal used when none is configured.
pub const DAILY_CALORIE_GOAL: u32 = 2000;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
