//! Error types
//!
//! Three layers of failure live here:
//! - [`LlmError`]: what the completion client reports (transport, HTTP status, envelope).
//! - [`CaptionError`]: the two user-facing outcomes a caption request can fail with.
//! - [`ConfigError`] / [`UploadError`]: setup problems raised before any request is made.

use std::path::PathBuf;

use thiserror::Error;

/// Fixed message shown when the provider rejects a request for exceeding its rate limit.
pub const RATE_LIMIT_MESSAGE: &str =
    "Too many requests to the OpenAI API. Please wait 20–30 seconds and try again.";

/// Errors reported by a completion client.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Transport failure (connect, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// HTTP 429, including an exhausted quota
    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl LlmError {
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Whether the provider signalled throttling.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            Self::RateLimitError(_) => true,
            Self::ApiError { code, .. } => *code == 429,
            _ => false,
        }
    }

    /// HTTP status associated with this error, when one is known.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RateLimitError(_) => Some(429),
            Self::AuthenticationError(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.status().map(|s| s.as_u16()) == Some(429) {
            return Self::RateLimitError(err.to_string());
        }
        if err.is_timeout() {
            return Self::HttpError(format!("request timed out: {err}"));
        }
        if err.is_decode() {
            return Self::ParseError(err.to_string());
        }
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

/// Failure of a caption request, ready to be shown to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptionError {
    /// Recoverable by waiting; always carries [`RATE_LIMIT_MESSAGE`].
    #[error("{message}")]
    RateLimited { message: String },

    #[error("Something went wrong while generating captions: {detail}")]
    Unknown { detail: String },
}

impl CaptionError {
    pub fn rate_limited() -> Self {
        Self::RateLimited {
            message: RATE_LIMIT_MESSAGE.to_string(),
        }
    }

    pub fn unknown(detail: impl std::fmt::Display) -> Self {
        Self::Unknown {
            detail: detail.to_string(),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

impl From<LlmError> for CaptionError {
    fn from(err: LlmError) -> Self {
        if err.is_rate_limit() {
            Self::rate_limited()
        } else {
            Self::unknown(err)
        }
    }
}

/// Setup errors: the tool must not proceed when one of these is raised.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable is not set.")]
    MissingApiKey(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Telemetry initialization error: {0}")]
    TelemetryInit(String),
}

/// Problems reading an uploaded photo from disk.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported photo type for {} (expected jpg, jpeg or png)", .path.display())]
    Unsupported { path: PathBuf },

    #[error("{} is empty", .path.display())]
    Empty { path: PathBuf },
}

/// Unknown caption style tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown caption style '{0}' (expected one of: {styles})", styles = crate::types::CaptionStyle::tags().join(", "))]
pub struct ParseStyleError(pub String);

/// Result alias for caption generation
pub type Result<T> = std::result::Result<T, CaptionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_maps_to_fixed_message() {
        let err: CaptionError = LlmError::RateLimitError("provider=openai http=429".into()).into();
        assert_eq!(err, CaptionError::rate_limited());
        assert_eq!(err.to_string(), RATE_LIMIT_MESSAGE);
    }

    #[test]
    fn bare_429_api_error_counts_as_rate_limit() {
        let err: CaptionError = LlmError::api_error(429, "slow down").into();
        assert!(err.is_rate_limited());
    }

    #[test]
    fn other_errors_embed_the_underlying_text() {
        let err: CaptionError = LlmError::HttpError("connection refused".into()).into();
        match &err {
            CaptionError::Unknown { detail } => assert!(detail.contains("connection refused")),
            other => panic!("unexpected variant: {other:?}"),
        }
        assert!(
            err.to_string()
                .starts_with("Something went wrong while generating captions: ")
        );
    }

    #[test]
    fn non_429_api_error_is_not_a_rate_limit() {
        let err: CaptionError = LlmError::api_error(400, "rate limit settings are invalid").into();
        assert!(!err.is_rate_limited());
        assert!(err.to_string().contains("rate limit settings are invalid"));
    }

    #[test]
    fn missing_key_message_names_the_variable() {
        let err = ConfigError::MissingApiKey("OPENAI_API_KEY");
        assert_eq!(
            err.to_string(),
            "OPENAI_API_KEY environment variable is not set."
        );
    }
}
