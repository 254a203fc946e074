//! # captionsmith
//!
//! Short social-media captions from a text description or a photo.
//!
//! A prompt is built from the user's input and style, sent to an `OpenAI`
//! Responses API model, and the reply is split into one caption per line.
//!
//! ```rust,no_run
//! use captionsmith::{CaptionRequester, CaptionStyle, OpenAiClient, OpenAiConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new(OpenAiConfig::from_env()?)?;
//! let requester = CaptionRequester::new(client);
//!
//! match requester
//!     .generate_from_text("sunset at the lake with coffee", CaptionStyle::Aesthetic)
//!     .await
//! {
//!     Ok(captions) => captions.iter().for_each(|c| println!("• {c}")),
//!     Err(err) => eprintln!("{err}"),
//! }
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod prompt;
pub mod requester;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use client::{CompletionClient, CompletionInput, CompletionRequest, OpenAiClient};
pub use config::{HttpConfig, OpenAiConfig};
pub use error::{CaptionError, ConfigError, LlmError, RATE_LIMIT_MESSAGE, UploadError};
pub use prompt::{build_image_prompt, build_text_prompt};
pub use requester::{CaptionRequester, MAX_OUTPUT_TOKENS, split_captions};
pub use types::{CaptionImage, CaptionInput, CaptionMode, CaptionRequest, CaptionStyle, Captions};
