use std::fmt;
use std::time::Duration;

use super::error::EstimationError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Settings for the estimation client, passed in explicitly at startup.
#[derive(Clone)]
pub struct EstimationConfig {
    api_key: String,
    pub model: String,
    pub base_url: String,
    /// Upper bound for a single request attempt.
    pub request_timeout: Duration,
    /// Pause before the one retry of a transient failure.
    pub retry_backoff: Duration,
}

impl EstimationConfig {
    /// Fails with [`EstimationError::MissingApiKey`] when the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, EstimationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(EstimationError::MissingApiKey);
        }
        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

// Keeps the key out of logs.
impl fmt::Debug for EstimationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EstimationConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("retry_backoff", &self.retry_backoff)
            .finish()
    }
}
