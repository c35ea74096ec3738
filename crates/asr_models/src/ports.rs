//! Port definition for model adapters
//!
//! One uniform transcription contract; each provider adapter
//! implements it polymorphically and hides its wire protocol.

use async_trait::async_trait;

use crate::error::AsrError;
use crate::types::{ModelInfo, Task, TuningParams};

/// Port every backend-specific adapter implements
///
/// Adapters are read-only after construction and safe to share
/// across requests.
#[async_trait]
pub trait ModelAdapter: Send + Sync {
    /// Transcribe audio bytes to text
    ///
    /// The returned text is whitespace-trimmed; an empty string is a
    /// valid result meaning no speech was detected.
    ///
    /// # Errors
    ///
    /// - [`AsrError::UnsupportedTask`] when the provider does not
    ///   offer `task`, raised before any network call
    /// - [`AsrError::Provider`] on a non-success upstream response
    /// - [`AsrError::MalformedResponse`] when a success response
    ///   holds no extractable text
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        task: Task,
        language: Option<&str>,
        params: &TuningParams,
    ) -> Result<String, AsrError>;

    /// Language codes this adapter advertises, in a stable order
    fn available_languages(&self) -> Vec<String>;

    /// Static metadata for the model directory; never fails
    fn model_info(&self) -> ModelInfo;
}
