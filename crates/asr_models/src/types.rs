//! Types for the transcription contract

use serde::{Deserialize, Serialize};

/// Transcription task requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    /// Speech to text in the spoken language
    Transcribe,
    /// Speech to English text
    Translate,
}

impl Task {
    /// Wire spelling of the task
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transcribe => "transcribe",
            Self::Translate => "translate",
        }
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional provider tuning parameters
///
/// Each field is forwarded as a string-encoded form field only when
/// set, and only by adapters whose provider understands it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuningParams {
    /// Beam search width
    pub num_beams: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Chunk length in seconds for long audio
    pub chunk_sec: Option<f32>,
    /// Leading stride in seconds between chunks
    pub stride_leading: Option<f32>,
    /// Trailing stride in seconds between chunks
    pub stride_trailing: Option<f32>,
    /// Decoder prompt text
    pub prompt: Option<String>,
}

impl TuningParams {
    /// True when no parameter is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.num_beams.is_none()
            && self.temperature.is_none()
            && self.chunk_sec.is_none()
            && self.stride_leading.is_none()
            && self.stride_trailing.is_none()
            && self.prompt.is_none()
    }
}

/// Static metadata describing one registered model
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    /// Display name
    pub name: String,
    /// Resolved endpoint URL
    pub endpoint: String,
    /// Advertised language codes
    pub supported_languages: Vec<String>,
    /// Tasks the provider offers
    pub tasks: Vec<Task>,
    /// Provider description
    pub provider: String,
    /// Total size of the language set, when it exceeds the
    /// advertised sample
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_language_count: Option<usize>,
    /// Upstream model identifier, when the provider publishes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// Present only on error-shaped records from the listing path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ModelInfo {
    /// Error-shaped record for a model that failed to load; the
    /// listing endpoint returns these instead of propagating
    #[must_use]
    pub fn error_record(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: String::new(),
            supported_languages: Vec::new(),
            tasks: Vec::new(),
            provider: String::new(),
            supported_language_count: None,
            model_id: None,
            error: Some(message.into()),
        }
    }
}

/// Transcribed text plus echoed request metadata
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptionResult {
    /// Whitespace-trimmed text; empty means no speech detected
    pub text: String,
    /// Echoed task
    pub task: Task,
    /// Echoed language code, if one was given
    pub language: Option<String>,
    /// Echoed logical model name
    pub model: String,
}
