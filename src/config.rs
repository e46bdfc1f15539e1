//! Configuration, read from the process environment at startup.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default text model for plan generation.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default image model for the farm layout visualization.
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gemini API key. Required; startup fails before any UI renders if absent.
    pub api_key: SecretString,
    /// Model used for the plan-generation calls.
    pub model: String,
    /// Model used for the layout image call.
    pub image_model: String,
    /// API base URL (overridable for tests).
    pub base_url: String,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// `GEMINI_API_KEY` is required (`API_KEY` is accepted as a fallback);
    /// `AGRI_PILOT_MODEL`, `AGRI_PILOT_IMAGE_MODEL` and `AGRI_PILOT_BASE_URL`
    /// override the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .map_err(|_| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "GEMINI_API_KEY".to_string(),
                message: "value is empty".to_string(),
            });
        }

        Ok(Self {
            api_key: SecretString::from(api_key),
            model: std::env::var("AGRI_PILOT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            image_model: std::env::var("AGRI_PILOT_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
            base_url: std::env::var("AGRI_PILOT_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        })
    }

    /// Build a config directly (used by tests and embedding callers).
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let config = AppConfig::new("test-key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn with_base_url_overrides() {
        let config = AppConfig::new("test-key").with_base_url("http://127.0.0.1:9999");
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn api_key_not_exposed_in_debug() {
        let config = AppConfig::new("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
    }
}
