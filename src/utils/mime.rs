//! MIME type detection for uploaded photos
//!
//! Magic-number detection via the `infer` crate, with an extension fallback
//! limited to the formats the uploader accepts.

/// Used when an upload does not declare its type.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Extensions accepted for uploads.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Guess MIME by inspecting bytes (magic numbers). Only image types are returned.
pub fn guess_image_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes)
        .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
        .map(|kind| kind.mime_type().to_string())
}

/// Guess MIME by file extension.
pub fn guess_image_mime_from_path(path: &str) -> Option<String> {
    let extension = path.rsplit('.').next()?.to_lowercase();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => return None,
    };
    Some(mime.to_string())
}

/// Combined guess: prefer bytes, fall back to extension.
pub fn guess_image_mime(bytes: &[u8], path: Option<&str>) -> Option<String> {
    guess_image_mime_from_bytes(bytes).or_else(|| path.and_then(guess_image_mime_from_path))
}

pub fn has_supported_extension(path: &str) -> bool {
    path.rsplit_once('.')
        .map(|(_, ext)| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}
