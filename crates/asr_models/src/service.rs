//! Transcription service
//!
//! Front door over the registry: validates the request, picks the
//! model, and shapes the adapter output into a result that echoes
//! the request metadata back to the caller.

use std::collections::BTreeMap;

use tracing::{info, instrument};

use crate::config;
use crate::error::AsrError;
use crate::registry::{KNOWN_MODELS, ModelRegistry};
use crate::types::{ModelInfo, Task, TranscriptionResult, TuningParams};

/// Request-routing service over the model registry
#[derive(Debug, Default)]
pub struct AsrService {
    registry: ModelRegistry,
}

impl AsrService {
    /// Create a service with an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical model used when the caller names none
    #[must_use]
    pub fn default_model() -> String {
        config::default_model()
    }

    /// Transcribe audio with the named model
    ///
    /// `model` falls back to [`Self::default_model`] when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`AsrError::EmptyAudio`] before touching the registry
    /// when no audio was supplied, [`AsrError::UnknownModel`] for
    /// unrecognized names, or whatever the adapter raises.
    #[instrument(skip(self, audio, params), fields(audio_size = audio.len(), task = %task))]
    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        model: Option<&str>,
        task: Task,
        language: Option<&str>,
        params: &TuningParams,
    ) -> Result<TranscriptionResult, AsrError> {
        if audio.is_empty() {
            return Err(AsrError::EmptyAudio);
        }

        let model = model
            .filter(|m| !m.trim().is_empty())
            .map_or_else(Self::default_model, ToString::to_string);

        let adapter = self.registry.resolve(&model)?;
        info!(model = %model, "Dispatching transcription");

        let text = adapter.transcribe(audio, task, language, params).await?;

        Ok(TranscriptionResult {
            text,
            task,
            language: language.map(ToString::to_string),
            model,
        })
    }

    /// Metadata for every known model, keyed by logical name
    ///
    /// A model that fails to load contributes an error-shaped record
    /// instead of failing the whole listing.
    pub fn list_models(&self) -> BTreeMap<String, ModelInfo> {
        KNOWN_MODELS
            .iter()
            .map(|&name| {
                let info = match self.registry.resolve(name) {
                    Ok(adapter) => adapter.model_info(),
                    Err(e) => ModelInfo::error_record(name, e.to_string()),
                };
                (name.to_string(), info)
            })
            .collect()
    }

    /// Advertised languages for one model
    ///
    /// # Errors
    ///
    /// Returns [`AsrError::UnknownModel`] for unrecognized names.
    pub fn available_languages(&self, model: &str) -> Result<Vec<String>, AsrError> {
        Ok(self.registry.resolve(model)?.available_languages())
    }
}
