//! Photo payload helpers: data URIs and reading uploads from disk

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::UploadError;
use crate::types::CaptionImage;
use crate::utils::mime::{guess_image_mime, has_supported_extension};

/// Encode bytes as `data:{mime};base64,{payload}`.
pub fn encode_data_uri(bytes: &[u8], mime_type: &str) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

impl CaptionImage {
    /// Inline data URI using [`CaptionImage::effective_mime_type`].
    pub fn to_data_uri(&self) -> String {
        encode_data_uri(&self.data, self.effective_mime_type())
    }
}

/// Read a jpg/jpeg/png upload.
///
/// An explicit `mime_type` wins; otherwise the type is sniffed from the bytes,
/// then the extension. When neither yields anything the mime type stays unset.
pub async fn load_upload(
    path: impl AsRef<Path>,
    mime_type: Option<&str>,
) -> Result<CaptionImage, UploadError> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();
    if !has_supported_extension(&path_str) {
        return Err(UploadError::Unsupported {
            path: path.to_path_buf(),
        });
    }

    let data = tokio::fs::read(path).await.map_err(|source| UploadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if data.is_empty() {
        return Err(UploadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let mime_type = mime_type
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .or_else(|| guess_image_mime(&data, Some(&path_str)));

    tracing::debug!(
        path = %path.display(),
        bytes = data.len(),
        mime_type = mime_type.as_deref().unwrap_or("<unset>"),
        "loaded upload"
    );

    Ok(CaptionImage { data, mime_type })
}
