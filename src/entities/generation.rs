//! AI generation record: one request's lifecycle.
//!
//! Records live in a separate history (`core::generations`), never inside a
//! Project. Status walks pending -> processing -> completed | error; the two
//! terminal states are final.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::project::now_millis;

/// Supported AI tools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AiTool {
    TextToImage,
    ImageToVideo,
    BackgroundRemoval,
    SpeechToText,
}

impl AiTool {
    pub fn label(&self) -> &'static str {
        match self {
            AiTool::TextToImage => "text-to-image",
            AiTool::ImageToVideo => "image-to-video",
            AiTool::BackgroundRemoval => "background-removal",
            AiTool::SpeechToText => "speech-to-text",
        }
    }
}

impl std::fmt::Display for AiTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle status of one generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

impl GenerationStatus {
    /// Completed and Error are final; further updates must not regress them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationStatus::Completed | GenerationStatus::Error)
    }
}

/// One AI request and its outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub id: String,

    #[serde(rename = "type")]
    pub tool: AiTool,

    pub prompt: String,

    pub status: GenerationStatus,

    /// Source reference or transcript on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// Raw failure message on error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Epoch milliseconds at request time.
    pub timestamp: i64,
}

impl Generation {
    pub fn new(tool: AiTool, prompt: impl Into<String>) -> Self {
        Self {
            id: format!("gen-{}", Uuid::new_v4()),
            tool,
            prompt: prompt.into(),
            status: GenerationStatus::Pending,
            result: None,
            error: None,
            timestamp: now_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generation_is_pending() {
        let generation = Generation::new(AiTool::TextToImage, "a lighthouse at dusk");
        assert_eq!(generation.status, GenerationStatus::Pending);
        assert!(generation.result.is_none());
        assert!(generation.error.is_none());
    }

    #[test]
    fn test_tool_serializes_kebab_case() {
        let json = serde_json::to_value(AiTool::BackgroundRemoval).unwrap();
        assert_eq!(json, "background-removal");
        let json = serde_json::to_value(AiTool::SpeechToText).unwrap();
        assert_eq!(json, "speech-to-text");
    }

    #[test]
    fn test_terminal_states() {
        assert!(!GenerationStatus::Pending.is_terminal());
        assert!(!GenerationStatus::Processing.is_terminal());
        assert!(GenerationStatus::Completed.is_terminal());
        assert!(GenerationStatus::Error.is_terminal());
    }
}
