//! Chunkformer Vietnamese ASR adapter
//!
//! Authenticated multipart upload to the Chunkformer service. The
//! model is Vietnamese-specific: no language parameter is sent and
//! translation is rejected outright. Audio is always re-normalized
//! to canonical WAV before upload. The service can report failure
//! inside a 200 body through a `status` flag.

use std::time::Duration;

use asr_audio::AudioNormalizer;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::AdapterConfig;
use crate::error::AsrError;
use crate::ports::ModelAdapter;
use crate::providers::unique_wav_filename;
use crate::types::{ModelInfo, Task, TuningParams};

/// Adapter for the Chunkformer Vietnamese ASR API
#[derive(Debug, Clone)]
pub struct ChunkformerAdapter {
    client: Client,
    config: AdapterConfig,
    normalizer: AudioNormalizer,
}

impl ChunkformerAdapter {
    /// Create a new adapter
    ///
    /// # Errors
    ///
    /// Returns `AsrError::Configuration` if the configuration is
    /// invalid or the HTTP client cannot be built.
    pub fn new(config: AdapterConfig) -> Result<Self, AsrError> {
        config.validate().map_err(AsrError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AsrError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            normalizer: AudioNormalizer::new(),
        })
    }
}

#[async_trait]
impl ModelAdapter for ChunkformerAdapter {
    #[instrument(skip(self, audio, _params), fields(audio_size = audio.len(), task = %task))]
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        task: Task,
        _language: Option<&str>,
        _params: &TuningParams,
    ) -> Result<String, AsrError> {
        if task != Task::Transcribe {
            return Err(AsrError::UnsupportedTask {
                model: "chunkformer".to_string(),
                task,
            });
        }

        let wav = self.normalizer.normalize(&audio).await?;
        debug!(
            original_size = audio.len(),
            wav_size = wav.len(),
            "Audio normalized for Chunkformer"
        );

        let file_part = Part::bytes(wav)
            .file_name(unique_wav_filename())
            .mime_str("audio/wav")
            .map_err(|e| AsrError::Request(format!("Invalid MIME type: {e}")))?;

        let form = Form::new()
            .part("audio", file_part)
            .text("return_timestamps", "false");

        let mut request = self.client.post(&self.config.endpoint).multipart(form);
        if let Some(ref key) = self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AsrError::from_reqwest(&e, self.config.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AsrError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| AsrError::Request(format!("Failed to decode response: {e}")))?;

        // The service reports some failures inside a 200 body.
        if value.get("status").and_then(Value::as_str) == Some("error") {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error");
            return Err(AsrError::Provider {
                status: status.as_u16(),
                body: message.to_string(),
            });
        }

        let text = value
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();

        debug!(text_len = text.len(), "Transcription complete");
        Ok(text)
    }

    fn available_languages(&self) -> Vec<String> {
        vec!["vi".to_string()]
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            name: "Chunkformer Vietnamese ASR".to_string(),
            endpoint: self.config.endpoint.clone(),
            supported_languages: self.available_languages(),
            tasks: vec![Task::Transcribe],
            provider: "Chunkformer API".to_string(),
            supported_language_count: None,
            model_id: Some("khanhld/chunkformer-ctc-large-vie".to_string()),
            error: None,
        }
    }
}
