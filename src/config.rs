//! Client configuration
//!
//! The API key is the only required value. It is read from `OPENAI_API_KEY`
//! and kept in a [`SecretString`] so it never shows up in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::ConfigError;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const MODEL_ENV: &str = "CAPTIONSMITH_MODEL";

pub mod defaults {
    use std::time::Duration;

    pub const BASE_URL: &str = "https://api.openai.com/v1";
    pub const MODEL: &str = "gpt-4.1-mini";
    /// Output token cap for every caption request
    pub const MAX_OUTPUT_TOKENS: u32 = 120;
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const USER_AGENT: &str = concat!("captionsmith/", env!("CARGO_PKG_VERSION"));
}

/// HTTP configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout
    pub timeout: Option<Duration>,
    /// Connection timeout
    pub connect_timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(defaults::REQUEST_TIMEOUT),
            connect_timeout: Some(defaults::CONNECT_TIMEOUT),
            user_agent: Some(defaults::USER_AGENT.to_string()),
        }
    }
}

impl HttpConfig {
    pub fn build_client(&self) -> Result<reqwest::Client, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        Ok(builder.build()?)
    }
}

/// Configuration for the `OpenAI` Responses API client
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: SecretString,
    /// Base URL without the trailing `/responses`
    pub base_url: String,
    pub model: String,
    /// Sent as `max_output_tokens`; must be non-zero
    pub max_output_tokens: u32,
    pub http_config: HttpConfig,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: defaults::BASE_URL.to_string(),
            model: defaults::MODEL.to_string(),
            max_output_tokens: defaults::MAX_OUTPUT_TOKENS,
            http_config: HttpConfig::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_http_config(mut self, http_config: HttpConfig) -> Self {
        self.http_config = http_config;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.timeout = Some(timeout);
        self
    }

    /// Load from the process environment.
    ///
    /// Fails with [`ConfigError::MissingApiKey`] when `OPENAI_API_KEY` is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_blank(API_KEY_ENV).ok_or(ConfigError::MissingApiKey(API_KEY_ENV))?;
        let mut config = Self::new(api_key.trim());
        if let Some(base_url) = non_blank(BASE_URL_ENV) {
            config = config.with_base_url(base_url.trim());
        }
        if let Some(model) = non_blank(MODEL_ENV) {
            config = config.with_model(model.trim());
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(ConfigError::MissingApiKey(API_KEY_ENV));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".to_string()));
        }
        validate_max_output_tokens(self.max_output_tokens)?;
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }

    pub fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url)
    }
}

/// A zero cap would be rejected by the API on every request.
pub fn validate_max_output_tokens(max_output_tokens: u32) -> Result<(), ConfigError> {
    if max_output_tokens == 0 {
        return Err(ConfigError::Invalid(
            "max_output_tokens must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
