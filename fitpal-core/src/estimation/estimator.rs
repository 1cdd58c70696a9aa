use std::time::Duration;

use tokio::time::{sleep, timeout};

use super::config::EstimationConfig;
use super::error::EstimationError;
use super::gemini::GeminiClient;
use super::generator::TextGenerator;
use super::parse::parse_calorie_reply;
use super::prompt::{food_prompt, workout_prompt};

/// Number of extra attempts after a transient failure.
const MAX_RETRIES: usize = 1;

/// Turns descriptions into calorie estimates using a [`TextGenerator`].
///
/// Each call is independent: one request, plus at most one retry when the
/// first attempt fails transiently. Nothing is cached.
pub struct Estimator<G> {
    generator: G,
    request_timeout: Duration,
    retry_backoff: Duration,
}

impl Estimator<GeminiClient> {
    /// Estimator backed by Gemini, configured from `config`.
    pub fn gemini(config: &EstimationConfig) -> Result<Self, EstimationError> {
        let client = GeminiClient::new(config)?;
        Ok(Self::new(client)
            .with_request_timeout(config.request_timeout)
            .with_retry_backoff(config.retry_backoff))
    }
}

impl<G: TextGenerator> Estimator<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            request_timeout: super::config::DEFAULT_TIMEOUT,
            retry_backoff: super::config::DEFAULT_RETRY_BACKOFF,
        }
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn with_retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Estimated calories contained in a food description.
    pub async fn estimate_food_calories(&self, description: &str) -> Result<u32, EstimationError> {
        self.estimate(&food_prompt(description)).await
    }

    /// Estimated calories burned by a workout description.
    pub async fn estimate_workout_calories(
        &self,
        description: &str,
    ) -> Result<u32, EstimationError> {
        self.estimate(&workout_prompt(description)).await
    }

    async fn estimate(&self, prompt: &str) -> Result<u32, EstimationError> {
        let reply = self.generate_with_retry(prompt).await?;
        let calories = parse_calorie_reply(&reply)?;
        tracing::debug!(model = self.generator.model(), calories, "estimate parsed");
        Ok(calories)
    }

    async fn generate_with_retry(&self, prompt: &str) -> Result<String, EstimationError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.generate_once(prompt).await {
                Ok(reply) => {
                    tracing::debug!(attempt, reply = reply.as_str(), "estimation reply");
                    return Ok(reply);
                }
                Err(e) if e.is_transient() && attempt <= MAX_RETRIES => {
                    tracing::warn!(attempt, error = %e, "estimation attempt failed, retrying");
                    sleep(self.retry_backoff).await;
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "estimation failed");
                    return Err(e);
                }
            }
        }
    }

    async fn generate_once(&self, prompt: &str) -> Result<String, EstimationError> {
        match timeout(self.request_timeout, self.generator.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(EstimationError::Timeout(self.request_timeout)),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    fn server_error() -> EstimationError {
        EstimationError::Status {
            status: 503,
            body: "unavailable".into(),
        }
    }

    #[tokio::test]
    async fn test_food_estimate_parses_reply() {
        let estimator = estimator(vec![Ok("Approximately 350 calories")]);

        let calories = estimator.estimate_food_calories("turkey sandwich").await.unwrap();
        assert_eq!(calories, 350);
        assert!(estimator
            .generator()
            .last_prompt()
            .unwrap()
            .contains("Food: \"turkey sandwich\""));
    }

    #[tokio::test]
    async fn test_workout_estimate_uses_workout_prompt() {
        let estimator = estimator(vec![Ok("300")]);

        let calories = estimator.estimate_workout_calories("30 minute run").await.unwrap();
        assert_eq!(calories, 300);
        assert!(estimator
            .generator()
            .last_prompt()
            .unwrap()
            .contains("Workout: \"30 minute run\""));
    }

    #[tokio::test]
    async fn test_unparsable_reply_is_error_not_zero() {
        let estimator = estimator(vec![Ok("I cannot estimate this")]);

        let err = estimator.estimate_food_calories("mystery").await.unwrap_err();
        assert!(matches!(err, EstimationError::NoNumber(_)));
        assert_eq!(estimator.generator().calls(), 1);
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried_once() {
        let estimator = estimator(vec![Err(server_error()), Ok("420")]);

        let calories = estimator.estimate_food_calories("burrito").await.unwrap();
        assert_eq!(calories, 420);
        assert_eq!(estimator.generator().calls(), 2);
    }

    #[tokio::test]
    async fn test_retry_is_bounded() {
        let estimator = estimator(vec![Err(server_error()), Err(server_error()), Ok("1")]);

        let err = estimator.estimate_food_calories("burrito").await.unwrap_err();
        assert_eq!(err, server_error());
        assert_eq!(estimator.generator().calls(), 2);
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let bad_request = EstimationError::Status {
            status: 400,
            body: "bad".into(),
        };
        let estimator = estimator(vec![Err(bad_request.clone()), Ok("100")]);

        let err = estimator.estimate_food_calories("salad").await.unwrap_err();
        assert_eq!(err, bad_request);
        assert_eq!(estimator.generator().calls(), 1);
    }

    #[tokio::test]
    async fn test_slow_reply_times_out() {
        let generator = ScriptedGenerator::new(vec![Ok("100"), Ok("100")])
            .with_delay(Duration::from_millis(200));
        let estimator = Estimator::new(generator)
            .with_request_timeout(Duration::from_millis(10))
            .with_retry_backoff(Duration::ZERO);

        let err = estimator.estimate_food_calories("soup").await.unwrap_err();
        assert!(matches!(err, EstimationError::Timeout(_)));
        assert_eq!(estimator.generator().calls(), 2);
    }
}
