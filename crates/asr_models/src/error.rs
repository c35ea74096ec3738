//! Transcription errors
//!
//! One taxonomy shared by every adapter; the front door maps these
//! to transport-level failure codes. Messages are human-readable and
//! never carry stack traces.

use thiserror::Error;

use crate::types::Task;

/// Errors that can occur while routing and running a transcription
#[derive(Debug, Error)]
pub enum AsrError {
    /// Request carried zero audio bytes
    #[error("Audio data is empty")]
    EmptyAudio,

    /// Audio normalization failed
    #[error(transparent)]
    Audio(#[from] asr_audio::AudioError),

    /// The provider does not offer the requested task
    #[error("Model '{model}' only supports transcription, not {task}")]
    UnsupportedTask {
        /// Logical model name
        model: String,
        /// The rejected task
        task: Task,
    },

    /// Non-success response from the upstream provider
    #[error("Provider request failed with status {status}: {body}")]
    Provider {
        /// Upstream HTTP status
        status: u16,
        /// Upstream response body
        body: String,
    },

    /// A 200 response held no extractable text
    #[error("No text field found in response: {body}")]
    MalformedResponse {
        /// Full decoded body, for diagnostics
        body: String,
    },

    /// Logical model name is not registered
    #[error("Model '{name}' not found. Available models: {known:?}")]
    UnknownModel {
        /// The unknown name
        name: String,
        /// Registered names
        known: Vec<String>,
    },

    /// Provider call exceeded its timeout budget
    #[error("Provider request timed out after {0}ms")]
    Timeout(u64),

    /// Transport-level request failure
    #[error("Request failed: {0}")]
    Request(String),

    /// Invalid adapter configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AsrError {
    /// Translate a transport error, attributing timeouts to the
    /// caller's configured budget
    pub(crate) fn from_reqwest(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else {
            Self::Request(err.to_string())
        }
    }
}
