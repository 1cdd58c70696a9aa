use async_trait::async_trait;

use super::error::EstimationError;

/// A text-generation backend: takes a prompt, returns the raw reply text.
///
/// The only contract the estimator relies on is that the reply contains the
/// requested integer somewhere.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, EstimationError>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
