//! Completion client abstraction
//!
//! [`CompletionClient`] is the seam between caption logic and the remote model.
//! The production implementation is [`OpenAiClient`]; tests plug in fakes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LlmError;

pub mod errors;
pub mod openai;

pub use openai::OpenAiClient;

/// Prompt payload sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionInput {
    /// Plain-text prompt
    Text(String),
    /// One user message with a text part and an image part
    Multimodal {
        text: String,
        /// `data:` URI or remote URL
        image_url: String,
    },
}

impl CompletionInput {
    pub fn is_multimodal(&self) -> bool {
        matches!(self, Self::Multimodal { .. })
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Multimodal { text, .. } => text,
        }
    }
}

/// A single completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub input: CompletionInput,
    pub max_output_tokens: u32,
}

impl CompletionRequest {
    pub fn text(prompt: impl Into<String>, max_output_tokens: u32) -> Self {
        Self {
            input: CompletionInput::Text(prompt.into()),
            max_output_tokens,
        }
    }

    pub fn multimodal(
        prompt: impl Into<String>,
        image_url: impl Into<String>,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            input: CompletionInput::Multimodal {
                text: prompt.into(),
                image_url: image_url.into(),
            },
            max_output_tokens,
        }
    }
}

/// Sends a prompt to a model and returns its aggregated output text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

#[async_trait]
impl<T> CompletionClient for Arc<T>
where
    T: CompletionClient + ?Sized,
{
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        (**self).complete(request).await
    }
}

#[async_trait]
impl<T> CompletionClient for Box<T>
where
    T: CompletionClient + ?Sized,
{
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        (**self).complete(request).await
    }
}
