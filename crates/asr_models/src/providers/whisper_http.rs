//! Direct-endpoint Whisper adapter
//!
//! Talks to a self-hosted Whisper HTTP service. No authentication;
//! audio bytes are forwarded verbatim and optional tuning parameters
//! pass through as string-encoded form fields. This is the only
//! provider that offers translation alongside transcription.

use std::time::Duration;

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

const LANGUAGES: [&str; 4] = ["en", "vi", "hi", "auto"];

/// Adapter for a direct Whisper HTTP endpoint
#[derive(Debug, Clone)]
pub struct WhisperHttpAdapter {
    client: Client,
    config: AdapterConfig,
}

impl WhisperHttpAdapter {
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

        Ok(Self { client, config })
    }

    /// Append set tuning parameters as string-encoded form fields
    fn apply_params(mut form: Form, params: &TuningParams) -> Form {
        if let Some(num_beams) = params.num_beams {
            form = form.text("num_beams", num_beams.to_string());
        }
        if let Some(temperature) = params.temperature {
            form = form.text("temperature", temperature.to_string());
        }
        if let Some(chunk_sec) = params.chunk_sec {
            form = form.text("chunk_sec", chunk_sec.to_string());
        }
        if let Some(stride_leading) = params.stride_leading {
            form = form.text("stride_leading", stride_leading.to_string());
        }
        if let Some(stride_trailing) = params.stride_trailing {
            form = form.text("stride_trailing", stride_trailing.to_string());
        }
        if let Some(ref prompt) = params.prompt {
            form = form.text("prompt", prompt.clone());
        }
        form
    }

    /// Pull text out of the endpoint's response
    ///
    /// A missing `text` field means no speech, not a failure; a
    /// non-object body is stringified as-is.
    fn response_text(value: &Value) -> String {
        match value {
            Value::Object(map) => map
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string(),
            Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        }
    }
}

#[async_trait]
impl ModelAdapter for WhisperHttpAdapter {
    #[instrument(skip(self, audio, params), fields(audio_size = audio.len(), task = %task))]
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        task: Task,
        language: Option<&str>,
        params: &TuningParams,
    ) -> Result<String, AsrError> {
        debug!("Transcribing with Whisper HTTP endpoint");

        let file_part = Part::bytes(audio)
            .file_name(unique_wav_filename())
            .mime_str("audio/wav")
            .map_err(|e| AsrError::Request(format!("Invalid MIME type: {e}")))?;

        let mut form = Form::new()
            .part("file", file_part)
            .text("task", task.as_str())
            .text("return_timestamps", "false");

        if let Some(lang) = language {
            form = form.text("language", lang.to_string());
        }

        form = Self::apply_params(form, params);

        let response = self
            .client
            .post(&self.config.endpoint)
            .multipart(form)
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

        let text = Self::response_text(&value);
        debug!(text_len = text.len(), "Transcription complete");
        Ok(text)
    }

    fn available_languages(&self) -> Vec<String> {
        LANGUAGES.iter().map(ToString::to_string).collect()
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            name: "Whisper JAX".to_string(),
            endpoint: self.config.endpoint.clone(),
            supported_languages: self.available_languages(),
            tasks: vec![Task::Transcribe, Task::Translate],
            provider: "Whisper HTTP".to_string(),
            supported_language_count: None,
            model_id: None,
            error: None,
        }
    }
}
