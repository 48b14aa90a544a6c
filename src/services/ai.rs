//! AI generation service seam.
//!
//! The engine never performs inference; it hands a request across this
//! boundary and gets back either a source reference (or transcript) or a
//! plain error message. Failures cross the seam as `Err(String)`, never as
//! panics, and never touch project state.

use crate::entities::AiTool;

/// Free-form options forwarded to the provider.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AiOptions {
    /// Output size hint, e.g. "1024x1024".
    pub size: Option<String>,
    /// Style hint.
    pub style: Option<String>,
    /// Requested clip duration in seconds (image-to-video).
    pub duration: Option<f64>,
    /// Provider-specific model override.
    pub model: Option<String>,
}

/// One generation request.
#[derive(Clone, Debug, PartialEq)]
pub struct AiRequest {
    pub tool: AiTool,
    pub prompt: String,
    pub options: AiOptions,
}

impl AiRequest {
    pub fn new(tool: AiTool, prompt: impl Into<String>) -> Self {
        Self {
            tool,
            prompt: prompt.into(),
            options: AiOptions::default(),
        }
    }
}

/// Provider boundary. `Ok` carries a source reference ingestible by a clip
/// or media item (a URL/blob locator), or transcript text for speech-to-text.
pub trait AiService {
    fn generate(&self, request: &AiRequest) -> Result<String, String>;
}

/// Offline stand-in returning canned per-tool payloads. Used by tests and
/// the CLI; real providers live outside this crate.
#[derive(Debug, Default)]
pub struct MockAiService;

impl AiService for MockAiService {
    fn generate(&self, request: &AiRequest) -> Result<String, String> {
        if request.prompt.trim().is_empty() {
            return Err("prompt must not be empty".to_string());
        }
        let data = match request.tool {
            AiTool::TextToImage => "mem://generated/image.png",
            AiTool::ImageToVideo => "mem://generated/video.mp4",
            AiTool::BackgroundRemoval => "mem://generated/cutout.png",
            AiTool::SpeechToText => "This is a sample transcription of the audio content.",
        };
        Ok(data.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_covers_every_tool() {
        let service = MockAiService;
        for tool in [
            AiTool::TextToImage,
            AiTool::ImageToVideo,
            AiTool::BackgroundRemoval,
            AiTool::SpeechToText,
        ] {
            let out = service.generate(&AiRequest::new(tool, "prompt")).unwrap();
            assert!(!out.is_empty());
        }
    }

    #[test]
    fn test_mock_rejects_empty_prompt() {
        let service = MockAiService;
        let err = service
            .generate(&AiRequest::new(AiTool::TextToImage, "   "))
            .unwrap_err();
        assert!(err.contains("prompt"));
    }
}
