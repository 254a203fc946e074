//! `OpenAI` Responses API client
//!
//! Posts to `{base_url}/responses` and returns the aggregated `output_text`.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{Value, json};

use super::errors::classify_http_error;
use super::{CompletionClient, CompletionInput, CompletionRequest};
use crate::config::OpenAiConfig;
use crate::error::{ConfigError, LlmError};

/// `OpenAI` Client
#[derive(Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    /// Validate the configuration and build an HTTP client from it.
    pub fn new(config: OpenAiConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let http_client = config.http_config.build_client()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Build with a caller-supplied HTTP client.
    pub fn with_http_client(
        config: OpenAiConfig,
        http_client: reqwest::Client,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Shortcut for `OpenAiConfig::from_env` followed by [`OpenAiClient::new`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(OpenAiConfig::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.config.max_output_tokens
    }

    /// JSON body for `POST /responses`.
    pub fn build_body(&self, request: &CompletionRequest) -> Value {
        let input = match &request.input {
            CompletionInput::Text(prompt) => Value::String(prompt.clone()),
            CompletionInput::Multimodal { text, image_url } => json!([{
                "role": "user",
                "content": [
                    { "type": "input_text", "text": text },
                    { "type": "input_image", "image_url": image_url },
                ]
            }]),
        };

        json!({
            "model": self.config.model,
            "input": input,
            "max_output_tokens": request.max_output_tokens,
        })
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("provider_name", &"openai")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let url = self.config.responses_url();
        let body = self.build_body(&request);

        tracing::debug!(
            model = %self.config.model,
            multimodal = request.input.is_multimodal(),
            max_output_tokens = request.max_output_tokens,
            prompt_chars = request.input.text().chars().count(),
            "sending responses request"
        );

        let resp = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let headers = resp.headers().clone();
            let text = resp.text().await.unwrap_or_default();
            let error = classify_http_error(status.as_u16(), &text, &headers);
            tracing::debug!(status = status.as_u16(), error = %error, "responses request failed");
            return Err(error);
        }

        let text = resp
            .text()
            .await
            .map_err(|e| LlmError::HttpError(e.to_string()))?;
        let json: Value = serde_json::from_str(&text)?;
        extract_output_text(&json)
    }
}

/// Aggregate the model's text from a Responses API payload.
///
/// Uses the top-level `output_text` convenience field when present; otherwise
/// concatenates every `output_text` part of every `message` item, in order.
pub fn extract_output_text(root: &Value) -> Result<String, LlmError> {
    if let Some(text) = root.get("output_text").and_then(|v| v.as_str()) {
        return Ok(text.to_string());
    }

    if let Some(error) = root.get("error").filter(|e| e.is_object()) {
        let message = error
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("response failed");
        return Err(LlmError::ApiError {
            code: 200,
            message: message.to_string(),
            details: Some(error.clone()),
        });
    }

    let output = root.get("output").and_then(|v| v.as_array()).ok_or_else(|| {
        LlmError::ParseError("response has neither output_text nor output".to_string())
    })?;

    let mut text = String::new();
    for item in output {
        if item.get("type").and_then(|v| v.as_str()) != Some("message") {
            continue;
        }
        let Some(content) = item.get("content").and_then(|v| v.as_array()) else {
            continue;
        };
        for part in content {
            if part.get("type").and_then(|v| v.as_str()) != Some("output_text") {
                continue;
            }
            if let Some(chunk) = part.get("text").and_then(|v| v.as_str()) {
                text.push_str(chunk);
            }
        }
    }
    Ok(text)
}
