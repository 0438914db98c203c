//! Request payload for one reading.

use super::prompts::{build_fortune_message, FORTUNE_SYSTEM_PROMPT};
use crate::capture::DataUrl;
use crate::session::Mood;
use serde::Serialize;

/// The image part of the request, as Gemini's `inlineData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortuneRequest {
    pub image: InlineImage,
    pub instruction: String,
    pub system_instruction: &'static str,
}

impl FortuneRequest {
    pub fn new(image: &DataUrl, mood: Mood, note: &str) -> Self {
        Self {
            image: InlineImage {
                mime_type: image.mime_type().to_string(),
                data: image.payload().to_string(),
            },
            instruction: build_fortune_message(mood, note),
            system_instruction: FORTUNE_SYSTEM_PROMPT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_data_url_into_inline_image() {
        let url = DataUrl::parse("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        let req = FortuneRequest::new(&url, Mood::Health, "");
        assert_eq!(req.image.mime_type, "image/jpeg");
        assert_eq!(req.image.data, "/9j/4AAQ");
        assert!(req.instruction.contains("Health"));
        assert_eq!(req.system_instruction, FORTUNE_SYSTEM_PROMPT);
    }
}
