//! Adapter configuration
//!
//! Every adapter resolves its endpoint and credential from the
//! environment at construction time, with documented defaults. The
//! resolved config is read-only for the adapter's lifetime.

use serde::{Deserialize, Serialize};

/// Resolved endpoint, credential, and timeout for one adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Provider endpoint URL
    pub endpoint: String,
    /// Bearer credential; no Authorization header is sent when unset
    pub api_key: Option<String>,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl AdapterConfig {
    /// Whisper HTTP endpoint config
    ///
    /// Env: `WHISPER_ENDPOINT` (default `http://127.0.0.1:8008/transcribe`)
    #[must_use]
    pub fn whisper_from_env() -> Self {
        Self {
            endpoint: env_or("WHISPER_ENDPOINT", "http://127.0.0.1:8008/transcribe"),
            api_key: None,
            timeout_ms: 120_000,
        }
    }

    /// Chunkformer config
    ///
    /// Env: `CHUNKFORMER_ENDPOINT` (default
    /// `http://hanoi2.ucd.ie/asr_chunkformer`), `CHUNKFORMER_API_KEY`
    /// (default `AIRRVie_api_key`)
    #[must_use]
    pub fn chunkformer_from_env() -> Self {
        Self {
            endpoint: env_or("CHUNKFORMER_ENDPOINT", "http://hanoi2.ucd.ie/asr_chunkformer"),
            api_key: non_empty(env_or("CHUNKFORMER_API_KEY", "AIRRVie_api_key")),
            timeout_ms: 120_000,
        }
    }

    /// OmniLingual config
    ///
    /// Env: `OMNILINGUAL_ENDPOINT` (default `http://hanoi2.ucd.ie/asr`),
    /// `OMNILINGUAL_API_KEY` (default unset)
    #[must_use]
    pub fn omni_lingual_from_env() -> Self {
        Self {
            endpoint: env_or("OMNILINGUAL_ENDPOINT", "http://hanoi2.ucd.ie/asr"),
            api_key: non_empty(env_or("OMNILINGUAL_API_KEY", "")),
            timeout_ms: 60_000,
        }
    }

    /// Qwen config
    ///
    /// Env: `QWEN3_ENDPOINT` (default `http://localhost:8005/asr`),
    /// `QWEN3_API_KEY` (default `AIRRVie_api_key`)
    #[must_use]
    pub fn qwen_from_env() -> Self {
        Self {
            endpoint: env_or("QWEN3_ENDPOINT", "http://localhost:8005/asr"),
            api_key: non_empty(env_or("QWEN3_API_KEY", "AIRRVie_api_key")),
            timeout_ms: 120_000,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("Endpoint must not be empty".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Default logical model name
///
/// Env: `ASR_DEFAULT_MODEL` (default `whisper_jax`)
#[must_use]
pub fn default_model() -> String {
    env_or("ASR_DEFAULT_MODEL", "whisper_jax")
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
