//! Caption generation
//!
//! [`CaptionRequester`] turns a caption request into a single completion call and
//! the model's reply into a list of captions. Every failure is folded into
//! [`CaptionError`], so callers only ever see `RateLimited` or `Unknown`.
//! Requests are single-shot: nothing is retried here.

use crate::client::{CompletionClient, CompletionRequest, OpenAiClient};
use crate::config::{OpenAiConfig, defaults, validate_max_output_tokens};
use crate::error::{CaptionError, ConfigError, Result};
use crate::prompt::{build_image_prompt, build_text_prompt};
use crate::types::{
    CaptionImage, CaptionInput, CaptionMode, CaptionRequest, CaptionStyle, Captions,
};

/// Output token cap for every caption request.
pub const MAX_OUTPUT_TOKENS: u32 = defaults::MAX_OUTPUT_TOKENS;

/// Generates captions through an injected [`CompletionClient`].
#[derive(Debug, Clone)]
pub struct CaptionRequester<C> {
    client: C,
    max_output_tokens: u32,
}

impl<C: CompletionClient> CaptionRequester<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }

    /// Fails with [`ConfigError::Invalid`] for a zero cap.
    pub fn with_max_output_tokens(
        mut self,
        max_output_tokens: u32,
    ) -> std::result::Result<Self, ConfigError> {
        validate_max_output_tokens(max_output_tokens)?;
        self.max_output_tokens = max_output_tokens;
        Ok(self)
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Dispatch on the request's input.
    pub async fn generate(&self, request: &CaptionRequest) -> Result<Captions> {
        match &request.input {
            CaptionInput::Text(description) => {
                self.generate_from_text(description, request.style).await
            }
            CaptionInput::Image(image) => self.generate_for_image(image, request.style).await,
        }
    }

    /// Captions for a photo described in words. The caller ensures `description` is non-empty.
    pub async fn generate_from_text(
        &self,
        description: &str,
        style: CaptionStyle,
    ) -> Result<Captions> {
        let prompt = build_text_prompt(description, style);
        let request = CompletionRequest::text(prompt, self.max_output_tokens);
        self.run(request, CaptionMode::TextOnly, style).await
    }

    /// Captions for raw image bytes. A missing or blank `mime_type` means `image/png`.
    pub async fn generate_from_image(
        &self,
        image: &[u8],
        mime_type: Option<&str>,
        style: CaptionStyle,
    ) -> Result<Captions> {
        let mut image = CaptionImage::new(image);
        image.mime_type = mime_type.map(str::to_string);
        self.generate_for_image(&image, style).await
    }

    async fn generate_for_image(
        &self,
        image: &CaptionImage,
        style: CaptionStyle,
    ) -> Result<Captions> {
        let prompt = build_image_prompt(style);
        let request =
            CompletionRequest::multimodal(prompt, image.to_data_uri(), self.max_output_tokens);
        self.run(request, CaptionMode::ImageAndStyle, style).await
    }

    async fn run(
        &self,
        request: CompletionRequest,
        mode: CaptionMode,
        style: CaptionStyle,
    ) -> Result<Captions> {
        match self.client.complete(request).await {
            Ok(raw) => {
                let captions = split_captions(&raw);
                tracing::info!(?mode, %style, count = captions.len(), "captions generated");
                Ok(captions)
            }
            Err(err) => {
                let mapped = CaptionError::from(err);
                match &mapped {
                    CaptionError::RateLimited { .. } => {
                        tracing::warn!(?mode, %style, "caption request was rate limited");
                    }
                    CaptionError::Unknown { detail } => {
                        tracing::warn!(?mode, %style, %detail, "caption request failed");
                    }
                }
                Err(mapped)
            }
        }
    }
}

impl CaptionRequester<OpenAiClient> {
    /// Build an `OpenAI` client from `config` and use its token cap.
    pub fn from_config(config: OpenAiConfig) -> std::result::Result<Self, ConfigError> {
        let client = OpenAiClient::new(config)?;
        let max_output_tokens = client.max_output_tokens();
        Self::new(client).with_max_output_tokens(max_output_tokens)
    }
}

/// Split model output into captions: one per line, trimmed, blanks dropped, order kept.
pub fn split_captions(raw: &str) -> Captions {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
