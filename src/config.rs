use fitpal_core::estimation::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_RETRY_BACKOFF};
use fitpal_core::{EstimationConfig, DAILY_CALORIE_GOAL};
use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRY_BACKOFF_MS: u64 = DEFAULT_RETRY_BACKOFF.as_millis() as u64;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// API key for the estimation service
    #[serde(serialize_with = "serialize_masked")]
    pub api_key: ConfigValue<Option<String>>,
    /// Model used for estimates
    pub model: ConfigValue<String>,
    /// Base URL of the generative language API
    pub base_url: ConfigValue<String>,
    /// Daily calorie goal shown on the dashboard
    pub daily_goal: ConfigValue<u32>,
    /// Per-request timeout for estimates, in seconds
    pub request_timeout_secs: ConfigValue<u64>,
    /// Wait before retrying a failed estimate, in milliseconds
    pub retry_backoff_ms: ConfigValue<u64>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    daily_goal: Option<u32>,
    request_timeout_secs: Option<u64>,
    retry_backoff_ms: Option<u64>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::defaults();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
            config.apply_file(file_config)?;
            config.config_file = Some(path);
        }

        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    fn defaults() -> Self {
        Self {
            api_key: ConfigValue::new(None, ConfigSource::Default),
            model: ConfigValue::new(DEFAULT_MODEL.to_string(), ConfigSource::Default),
            base_url: ConfigValue::new(DEFAULT_BASE_URL.to_string(), ConfigSource::Default),
            daily_goal: ConfigValue::new(DAILY_CALORIE_GOAL, ConfigSource::Default),
            request_timeout_secs: ConfigValue::new(DEFAULT_TIMEOUT_SECS, ConfigSource::Default),
            retry_backoff_ms: ConfigValue::new(DEFAULT_RETRY_BACKOFF_MS, ConfigSource::Default),
            config_file: None,
        }
    }

    fn apply_file(&mut self, file: ConfigFile) -> Result<(), ConfigError> {
        if let Some(key) = file.api_key {
            self.api_key = ConfigValue::new(Some(key), ConfigSource::File);
        }
        if let Some(model) = file.model {
            self.model = ConfigValue::new(model, ConfigSource::File);
        }
        if let Some(url) = file.base_url {
            self.base_url = ConfigValue::new(url, ConfigSource::File);
        }
        if let Some(goal) = file.daily_goal {
            self.daily_goal = ConfigValue::new(goal, ConfigSource::File);
        }
        if let Some(secs) = file.request_timeout_secs {
            let secs = nonzero_timeout("request_timeout_secs", secs)?;
            self.request_timeout_secs = ConfigValue::new(secs, ConfigSource::File);
        }
        if let Some(ms) = file.retry_backoff_ms {
            self.retry_backoff_ms = ConfigValue::new(ms, ConfigSource::File);
        }
        Ok(())
    }

    /// Apply environment overrides, reading variables through `var`.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(key) = var("FITPAL_API_KEY") {
            self.api_key = ConfigValue::new(Some(key), ConfigSource::Environment);
        }
        if let Some(model) = var("FITPAL_MODEL") {
            self.model = ConfigValue::new(model, ConfigSource::Environment);
        }
        if let Some(url) = var("FITPAL_BASE_URL") {
            self.base_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Some(goal) = var("FITPAL_DAILY_GOAL") {
            let goal: u32 = goal
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("FITPAL_DAILY_GOAL", goal.clone()))?;
            self.daily_goal = ConfigValue::new(goal, ConfigSource::Environment);
        }
        if let Some(secs) = var("FITPAL_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("FITPAL_TIMEOUT_SECS", secs.clone()))?;
            let secs = nonzero_timeout("FITPAL_TIMEOUT_SECS", secs)?;
            self.request_timeout_secs = ConfigValue::new(secs, ConfigSource::Environment);
        }
        if let Some(ms) = var("FITPAL_RETRY_BACKOFF_MS") {
            let ms: u64 = ms
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("FITPAL_RETRY_BACKOFF_MS", ms.clone()))?;
            self.retry_backoff_ms = ConfigValue::new(ms, ConfigSource::Environment);
        }
        Ok(())
    }

    /// Settings for the estimation client. Fails when no API key is set.
    pub fn estimation_config(&self) -> Result<EstimationConfig, ConfigError> {
        let key = self.api_key.value.as_deref().unwrap_or_default();
        let config = EstimationConfig::new(key).map_err(|_| ConfigError::MissingApiKey)?;

        Ok(config
            .with_model(self.model.value.clone())
            .with_base_url(self.base_url.value.clone())
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs.value))
            .with_retry_backoff(Duration::from_millis(self.retry_backoff_ms.value)))
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/fitpal/
    /// - macOS: ~/Library/Application Support/fitpal/
    /// - Windows: %APPDATA%/fitpal/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fitpal")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

/// A zero timeout would fail every request before it is sent.
fn nonzero_timeout(name: &'static str, secs: u64) -> Result<u64, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue(name, secs.to_string()));
    }
    Ok(secs)
}

/// Mask a secret down to its last four characters.
pub fn mask_secret(secret: &str) -> String {
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("****{}", tail)
    }
}

fn serialize_masked<S: Serializer>(
    value: &ConfigValue<Option<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let masked = ConfigValue::new(
        value.value.as_deref().map(mask_secret),
        value.source.clone(),
    );
    masked.serialize(serializer)
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
    MissingApiKey,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(name, value) => {
                write!(f, "Invalid value for {}: '{}'", name, value)
            }
            ConfigError::MissingApiKey => write!(
                f,
                "No API key configured. Set FITPAL_API_KEY or api_key in {}, \
                 or start the session with --offline to enter calories manually.",
                Config::default_config_path().display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::defaults();
        assert_eq!(config.api_key.value, None);
        assert_eq!(config.model.value, "gemini-2.5-flash");
        assert_eq!(config.daily_goal.value, 2000);
        assert_eq!(config.daily_goal.source, ConfigSource::Default);
        assert_eq!(config.request_timeout_secs.value, 30);
        assert_eq!(config.retry_backoff_ms.value, 500);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api_key: file-key").unwrap();
        writeln!(file, "daily_goal: 1800").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.daily_goal.value, 1800);
        assert_eq!(config.daily_goal.source, ConfigSource::File);
        assert_eq!(config.model.source, ConfigSource::Default);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = Config::defaults();
        config.apply_file(ConfigFile {
            model: Some("from-file".to_string()),
            ..Default::default()
        })
        .unwrap();

        config
            .apply_env(env(&[("FITPAL_MODEL", "from-env"), ("FITPAL_DAILY_GOAL", "2200")]))
            .unwrap();

        assert_eq!(config.model.value, "from-env");
        assert_eq!(config.model.source, ConfigSource::Environment);
        assert_eq!(config.daily_goal.value, 2200);
    }

    #[test]
    fn test_invalid_env_number() {
        let mut config = Config::defaults();
        let err = config
            .apply_env(env(&[("FITPAL_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("FITPAL_TIMEOUT_SECS"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut config = Config::defaults();
        let err = config
            .apply_env(env(&[("FITPAL_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("FITPAL_TIMEOUT_SECS", _)));

        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "request_timeout_secs: 0").unwrap();

        let err = Config::load(Some(config_path)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("request_timeout_secs", _)));
    }

    #[test]
    fn test_retry_backoff_from_file_and_env() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api_key: file-key").unwrap();
        writeln!(file, "retry_backoff_ms: 250").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.retry_backoff_ms.value, 250);
        assert_eq!(config.retry_backoff_ms.source, ConfigSource::File);
        assert_eq!(
            config.estimation_config().unwrap().retry_backoff,
            Duration::from_millis(250)
        );

        let mut config = Config::defaults();
        config
            .apply_env(env(&[("FITPAL_RETRY_BACKOFF_MS", "0")]))
            .unwrap();
        assert_eq!(config.retry_backoff_ms.value, 0);
        assert_eq!(config.retry_backoff_ms.source, ConfigSource::Environment);

        let err = config
            .apply_env(env(&[("FITPAL_RETRY_BACKOFF_MS", "later")]))
            .unwrap_err();
        assert!(err.to_string().contains("FITPAL_RETRY_BACKOFF_MS"));
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let err = Config::load(Some(config_path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_api_key_fails_fast() {
        let config = Config::defaults();
        assert!(matches!(
            config.estimation_config(),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn test_estimation_config_carries_settings() {
        let mut config = Config::defaults();
        config
            .apply_env(env(&[
                ("FITPAL_API_KEY", "abc123"),
                ("FITPAL_TIMEOUT_SECS", "5"),
            ]))
            .unwrap();

        let estimation = config.estimation_config().unwrap();
        assert_eq!(estimation.api_key(), "abc123");
        assert_eq!(estimation.request_timeout, Duration::from_secs(5));
        assert_eq!(estimation.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_api_key_is_masked_in_json() {
        let mut config = Config::defaults();
        config.api_key = ConfigValue::new(Some("supersecretkey".to_string()), ConfigSource::File);

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("supersecretkey"));
        assert!(json.contains("****tkey"));
    }

    #[test]
    fn test_mask_short_secret() {
        assert_eq!(mask_secret("abc"), "****");
    }
}
