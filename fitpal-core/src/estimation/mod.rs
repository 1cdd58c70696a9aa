//! Calorie estimation through a text-generation service.
//!
//! The model is asked for a bare integer; [`parse_calorie_reply`] turns its
//! reply into a number or an [`EstimationError`].

mod config;
mod error;
mod estimator;
mod gemini;
mod generator;
mod parse;
mod prompt;

pub use config::{
    EstimationConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_RETRY_BACKOFF, DEFAULT_TIMEOUT,
};
pub use error::EstimationError;
pub use estimator::Estimator;
pub use gemini::GeminiClient;
pub use generator::TextGenerator;
pub use parse::parse_calorie_reply;
pub use prompt::{food_prompt, workout_prompt};

#[cfg(test)]
pub(crate) use estimator::testing;
