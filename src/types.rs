//! Caption request types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseStyleError;
use crate::utils::mime::DEFAULT_IMAGE_MIME;

/// Mood tag that steers the wording of generated captions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionStyle {
    #[default]
    Aesthetic,
    Funny,
    Gym,
    Emotional,
    Travel,
    #[serde(rename = "soft girl")]
    SoftGirl,
    Baddie,
    Minimal,
}

impl CaptionStyle {
    /// Every style, in the order front ends should list them.
    pub const ALL: [CaptionStyle; 8] = [
        Self::Aesthetic,
        Self::Funny,
        Self::Gym,
        Self::Emotional,
        Self::Travel,
        Self::SoftGirl,
        Self::Baddie,
        Self::Minimal,
    ];

    /// Tag embedded in prompts.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Aesthetic => "aesthetic",
            Self::Funny => "funny",
            Self::Gym => "gym",
            Self::Emotional => "emotional",
            Self::Travel => "travel",
            Self::SoftGirl => "soft girl",
            Self::Baddie => "baddie",
            Self::Minimal => "minimal",
        }
    }

    pub fn tags() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }
}

impl fmt::Display for CaptionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaptionStyle {
    type Err = ParseStyleError;

    /// Accepts the exact tag, any casing, and `-`/`_` in place of the space.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == normalized)
            .ok_or_else(|| ParseStyleError(s.to_string()))
    }
}

/// Which input a request was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionMode {
    TextOnly,
    ImageAndStyle,
}

/// Raw photo bytes plus the mime type the uploader declared, if any.
#[derive(Clone, PartialEq, Eq)]
pub struct CaptionImage {
    pub data: Vec<u8>,
    pub mime_type: Option<String>,
}

impl CaptionImage {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Declared mime type, or `image/png` when none (or a blank one) was given.
    pub fn effective_mime_type(&self) -> &str {
        self.mime_type
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME)
    }
}

// Image bytes are never printed.
impl fmt::Debug for CaptionImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptionImage")
            .field("len", &self.data.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// What the captions are generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionInput {
    Text(String),
    Image(CaptionImage),
}

/// One user action: a style plus exactly one of description or photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionRequest {
    pub style: CaptionStyle,
    pub input: CaptionInput,
}

impl CaptionRequest {
    pub fn text(description: impl Into<String>, style: CaptionStyle) -> Self {
        Self {
            style,
            input: CaptionInput::Text(description.into()),
        }
    }

    pub fn image(image: CaptionImage, style: CaptionStyle) -> Self {
        Self {
            style,
            input: CaptionInput::Image(image),
        }
    }

    pub fn mode(&self) -> CaptionMode {
        match self.input {
            CaptionInput::Text(_) => CaptionMode::TextOnly,
            CaptionInput::Image(_) => CaptionMode::ImageAndStyle,
        }
    }
}

/// Ordered, trimmed, non-empty caption lines.
pub type Captions = Vec<String>;
