use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while estimating calories.
///
/// Every variant means "estimation unavailable"; none of them may be read as
/// zero calories.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimationError {
    #[error("No API key configured for the estimation service")]
    MissingApiKey,

    #[error("Request to estimation service failed: {0}")]
    Transport(String),

    #[error("Estimation service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Estimation service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response from estimation service: {0}")]
    MalformedResponse(String),

    #[error("No number found in reply: {0:?}")]
    NoNumber(String),

    #[error("Reply contains more than one number: {0:?}")]
    Ambiguous(String),

    #[error("Number in reply is out of range: {0}")]
    OutOfRange(String),
}

impl EstimationError {
    /// Whether a single retry may succeed where this attempt failed.
    pub fn is_transient(&self) -> bool {
        match self {
            EstimationError::Transport(_) | EstimationError::Timeout(_) => true,
            EstimationError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for EstimationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            EstimationError::MalformedResponse(e.to_string())
        } else {
            EstimationError::Transport(e.to_string())
        }
    }
}
