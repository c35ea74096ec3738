//! OmniLingual ASR adapter
//!
//! Authenticated multipart upload to the OmniLingual service, which
//! covers a 1600+ language set; only a fixed sample is advertised
//! for display. Callers pass language codes in whatever dialect they
//! have (ISO-2, ISO-3, ISO-3 plus script suffix) and the adapter
//! normalizes them to the bare ISO-3 spelling the service expects.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::AdapterConfig;
use crate::error::AsrError;
use crate::ports::ModelAdapter;
use crate::providers::{LANGUAGE_SAMPLE, unique_wav_filename};
use crate::response::extract_text;
use crate::types::{ModelInfo, Task, TuningParams};

const ISO2_TO_ISO3: [(&str, &str); 13] = [
    ("en", "eng"),
    ("vi", "vie"),
    ("fr", "fra"),
    ("de", "deu"),
    ("es", "spa"),
    ("it", "ita"),
    ("pt", "por"),
    ("ru", "rus"),
    ("ja", "jpn"),
    ("ko", "kor"),
    ("zh", "cmn"),
    ("ar", "ara"),
    ("hi", "hin"),
];

/// Adapter for the OmniLingual ASR API
#[derive(Debug, Clone)]
pub struct OmniLingualAdapter {
    client: Client,
    config: AdapterConfig,
}

impl OmniLingualAdapter {
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

    /// Normalize a dialect code to the bare ISO-3 spelling
    ///
    /// Two-letter codes go through a fixed ISO2->ISO3 table; codes
    /// with a `_Script` suffix have it stripped; anything else
    /// passes through unchanged.
    fn normalize_lang(lang: &str) -> String {
        let lang = lang.trim();
        let lower = lang.to_lowercase();

        if let Some((_, iso3)) = ISO2_TO_ISO3.iter().find(|(iso2, _)| *iso2 == lower) {
            return (*iso3).to_string();
        }

        if let Some((code, _script)) = lang.split_once('_') {
            return code.to_string();
        }

        lang.to_string()
    }
}

#[async_trait]
impl ModelAdapter for OmniLingualAdapter {
    #[instrument(skip(self, audio, _params), fields(audio_size = audio.len(), task = %task))]
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        task: Task,
        language: Option<&str>,
        _params: &TuningParams,
    ) -> Result<String, AsrError> {
        if task != Task::Transcribe {
            return Err(AsrError::UnsupportedTask {
                model: "omni_lingual".to_string(),
                task,
            });
        }

        // English unless the caller says otherwise.
        let lang_code = language
            .filter(|l| !l.trim().is_empty())
            .map_or_else(|| "eng".to_string(), Self::normalize_lang);

        debug!(lang_code = %lang_code, "Transcribing with OmniLingual");

        // Original bytes go out verbatim; this provider decodes
        // whatever it is given.
        let file_part = Part::bytes(audio)
            .file_name(unique_wav_filename())
            .mime_str("audio/wav")
            .map_err(|e| AsrError::Request(format!("Invalid MIME type: {e}")))?;

        let form = Form::new()
            .part("audio", file_part)
            .text("lang_code", lang_code);

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

        let text = extract_text(&value)?;
        debug!(text_len = text.len(), "Transcription complete");
        Ok(text)
    }

    fn available_languages(&self) -> Vec<String> {
        LANGUAGE_SAMPLE.iter().map(ToString::to_string).collect()
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            name: "OmniLingual API".to_string(),
            endpoint: self.config.endpoint.clone(),
            // First ten of the sample, for display
            supported_languages: LANGUAGE_SAMPLE
                .iter()
                .take(10)
                .map(ToString::to_string)
                .collect(),
            tasks: vec![Task::Transcribe],
            provider: "External API".to_string(),
            supported_language_count: Some(LANGUAGE_SAMPLE.len()),
            model_id: None,
            error: None,
        }
    }
}
