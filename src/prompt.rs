//! Prompt construction
//!
//! Both builders are pure: the same inputs always produce the same instruction text.

use crate::types::CaptionStyle;

/// How many caption options the model is asked for.
pub const CAPTION_COUNT: usize = 5;

/// Fixed policy for photo captions. Not user-configurable.
pub const IMAGE_SAFETY_RULES: [&str; 5] = [
    "Do NOT guess the person's religion.",
    "Do NOT guess ethnicity.",
    "Do NOT assume specific culture, festival, or country.",
    "Avoid sensitive or personal assumptions.",
    "Focus ONLY on aesthetics, vibes, feelings, colors, and general descriptions.",
];

const PERSONA: &str = "You are an Instagram caption generator.";

/// Instruction for captioning a photo the user described in words.
pub fn build_text_prompt(description: &str, style: CaptionStyle) -> String {
    format!(
        "{PERSONA}\n\
         \n\
         Photo description: {description}\n\
         Caption style: {style}\n\
         \n\
         Requirements:\n\
         - Generate {CAPTION_COUNT} different caption options\n\
         - Short, aesthetic, Instagram-friendly\n\
         - Add emojis that match the vibe\n\
         - Each caption on its own line\n\
         - No numbering (no 1., 2., etc.)\n"
    )
}

/// Instruction sent alongside an uploaded photo.
pub fn build_image_prompt(style: CaptionStyle) -> String {
    let rules = IMAGE_SAFETY_RULES
        .iter()
        .map(|rule| format!("- {rule}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{PERSONA}\n\
         \n\
         Look at the uploaded photo and write captions that match the mood, outfit,\n\
         colors, expressions, and setting.\n\
         \n\
         IMPORTANT RULES:\n\
         {rules}\n\
         \n\
         Caption style: {style}\n\
         \n\
         Generate {CAPTION_COUNT} short Instagram-ready captions with emojis.\n\
         Each caption should be on its own line without numbering.\n"
    )
}
