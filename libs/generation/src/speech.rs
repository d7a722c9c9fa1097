//! Speech endpoints are placeholders: no audio is produced or recognized.

use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeSpeechRequest {
    pub text: String,
    pub language_code: String,
    pub voice_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeSpeechResponse {
    pub audio_url: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecognizeSpeechRequest {
    /// Base64 audio recording.
    pub audio_content: String,
    pub language_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RecognizeSpeechResponse {
    pub transcript: String,
    pub message: String,
}

pub fn synthesize_speech(
    request: &SynthesizeSpeechRequest,
) -> SynthesizeSpeechResponse {
    info!(
        task = "synthesize speech",
        language_code = request.language_code.as_str(),
        voice_name = request.voice_name.as_str(),
        characters = request.text.chars().count()
    );

    SynthesizeSpeechResponse {
        audio_url: "data:audio/mp3;base64,".to_string(),
        message: format!(
            "Text-to-speech is not available yet; {} characters would be read in {}.",
            request.text.chars().count(),
            request.language_code
        ),
    }
}

pub fn recognize_speech(
    request: &RecognizeSpeechRequest,
) -> RecognizeSpeechResponse {
    info!(
        task = "recognize speech",
        language_code = request.language_code.as_str(),
        audio_length = request.audio_content.len()
    );

    RecognizeSpeechResponse {
        transcript: "Speech recognition is not available yet.".to_string(),
        message: format!(
            "Speech-to-text for {} is a placeholder; no audio was processed.",
            request.language_code
        ),
    }
}
