use thiserror::Error;

use crate::estimation::EstimationError;

pub const FILL_ALL_FIELDS: &str = "Please fill out all fields with valid values.";

/// Errors surfaced inline by a form. The form stays usable after any of them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("{0}")]
    Validation(String),

    #[error("Could not estimate calories. Please enter manually.")]
    Estimation(#[source] EstimationError),
}

impl FormError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        FormError::Validation(message.into())
    }
}
