//! Qwen3 ASR adapter
//!
//! The Qwen3 service has been deployed behind several route layouts
//! over time, and disagrees with its own docs about whether the
//! language field wants an ISO code or an English name. Rather than
//! pin one combination, this adapter sweeps a small candidate grid:
//! language spellings outer, endpoint routes inner, stopping at the
//! first success. Client-level rejections (400/404/405/422) move the
//! sweep along; anything else aborts immediately.

use std::time::Duration;

use asr_audio::AudioNormalizer;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::AdapterConfig;
use crate::error::AsrError;
use crate::ports::ModelAdapter;
use crate::providers::{LANGUAGE_SAMPLE, unique_wav_filename};
use crate::response::extract_text;
use crate::types::{ModelInfo, Task, TuningParams};

/// HTTP statuses that mean "wrong route or wrong spelling, try the
/// next candidate" rather than "the service is broken"
const SWEEP_STATUSES: [u16; 4] = [400, 404, 405, 422];

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

/// Adapter for the Qwen3 ASR API
#[derive(Debug, Clone)]
pub struct QwenAdapter {
    client: Client,
    config: AdapterConfig,
    normalizer: AudioNormalizer,
}

impl QwenAdapter {
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

    /// Language spellings to try, most likely first
    ///
    /// No label means exactly one attempt per route with the field
    /// omitted, letting the server auto-detect.
    fn candidate_lang_codes(language: Option<&str>) -> Vec<Option<String>> {
        let Some(lang) = language.filter(|l| !l.trim().is_empty()) else {
            return vec![None];
        };

        let normalized = Self::normalize_lang(lang);
        let mut candidates = vec![Some(normalized.clone())];

        // Some deployments want the English name instead of the code.
        let name = match normalized.as_str() {
            "eng" => Some("English"),
            "vie" => Some("Vietnamese"),
            _ => None,
        };
        if let Some(name) = name {
            candidates.push(Some(name.to_string()));
        }

        candidates
    }

    /// Endpoint routes to try, most likely first
    ///
    /// The configured endpoint leads, then the common route suffixes
    /// appended to it; legacy per-model paths rewritten onto their
    /// pinned ports come last.
    fn candidate_endpoints(&self) -> Vec<String> {
        let trimmed = self.config.endpoint.trim_end_matches('/');
        let mut candidates = vec![trimmed.to_string()];

        for suffix in ["/asr", "/transcribe", "/transcribe/upload"] {
            let candidate = format!("{trimmed}{suffix}");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }

        if let Ok(url) = Url::parse(trimmed) {
            let port = if url.path().contains("/asr_q3_1_7B") {
                Some(8005)
            } else if url.path().contains("/asr_q3_0_6B") {
                Some(8006)
            } else {
                None
            };
            if let (Some(port), Some(host)) = (port, url.host_str()) {
                let scheme = url.scheme();
                for route in ["asr", "transcribe"] {
                    let candidate = format!("{scheme}://{host}:{port}/{route}");
                    if !candidates.contains(&candidate) {
                        candidates.push(candidate);
                    }
                }
            }
        }

        candidates
    }

    fn build_form(wav: &[u8], filename: &str, lang: Option<&str>) -> Result<Form, AsrError> {
        let file_part = Part::bytes(wav.to_vec())
            .file_name(filename.to_string())
            .mime_str("audio/wav")
            .map_err(|e| AsrError::Request(format!("Invalid MIME type: {e}")))?;

        let mut form = Form::new().part("audio", file_part);
        if let Some(lang) = lang {
            form = form.text("lang_code", lang.to_string());
        }
        Ok(form)
    }
}

#[async_trait]
impl ModelAdapter for QwenAdapter {
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
                model: "qwen3".to_string(),
                task,
            });
        }

        let wav = self.normalizer.normalize(&audio).await?;
        let filename = unique_wav_filename();

        let lang_codes = Self::candidate_lang_codes(language);
        let endpoints = self.candidate_endpoints();
        let mut last_rejection: Option<(u16, String)> = None;

        for lang in &lang_codes {
            for endpoint in &endpoints {
                debug!(
                    endpoint = %endpoint,
                    lang = lang.as_deref().unwrap_or("auto"),
                    "Trying Qwen3 candidate"
                );

                // Multipart forms are consumed on send, so each
                // attempt gets a fresh one.
                let form = Self::build_form(&wav, &filename, lang.as_deref())?;
                let mut request = self.client.post(endpoint).multipart(form);
                if let Some(ref key) = self.config.api_key {
                    request = request.bearer_auth(key);
                }

                let response = request
                    .send()
                    .await
                    .map_err(|e| AsrError::from_reqwest(&e, self.config.timeout_ms))?;

                let status = response.status();
                if status.is_success() {
                    let value: Value = response.json().await.map_err(|e| {
                        AsrError::Request(format!("Failed to decode response: {e}"))
                    })?;
                    let text = extract_text(&value)?;
                    debug!(
                        endpoint = %endpoint,
                        text_len = text.len(),
                        "Transcription complete"
                    );
                    return Ok(text);
                }

                let body = response.text().await.unwrap_or_default();
                if SWEEP_STATUSES.contains(&status.as_u16()) {
                    warn!(
                        endpoint = %endpoint,
                        status = status.as_u16(),
                        "Candidate rejected, moving on"
                    );
                    last_rejection = Some((status.as_u16(), body));
                    continue;
                }

                return Err(AsrError::Provider {
                    status: status.as_u16(),
                    body,
                });
            }
        }

        match last_rejection {
            Some((status, body)) => Err(AsrError::Provider { status, body }),
            None => Err(AsrError::Request(
                "no endpoint candidates to try".to_string(),
            )),
        }
    }

    fn available_languages(&self) -> Vec<String> {
        LANGUAGE_SAMPLE.iter().map(ToString::to_string).collect()
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            name: "Qwen3 ASR".to_string(),
            endpoint: self.config.endpoint.clone(),
            // First ten of the sample, for display
            supported_languages: LANGUAGE_SAMPLE
                .iter()
                .take(10)
                .map(ToString::to_string)
                .collect(),
            tasks: vec![Task::Transcribe],
            provider: "Qwen3 API".to_string(),
            supported_language_count: Some(LANGUAGE_SAMPLE.len()),
            model_id: None,
            error: None,
        }
    }
}
