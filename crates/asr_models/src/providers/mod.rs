//! Provider adapter implementations
//!
//! Contains concrete implementations of the `ModelAdapter` trait,
//! one per upstream ASR service.

pub mod chunkformer;
pub mod omni_lingual;
pub mod qwen;
pub mod whisper_http;

pub use chunkformer::ChunkformerAdapter;
pub use omni_lingual::OmniLingualAdapter;
pub use qwen::QwenAdapter;
pub use whisper_http::WhisperHttpAdapter;

use std::time::{SystemTime, UNIX_EPOCH};

/// Fixed display sample of the large language sets the hosted
/// multilingual providers cover
pub(crate) const LANGUAGE_SAMPLE: [&str; 14] = [
    "eng_Latn", // English (Latin)
    "vie_Latn", // Vietnamese (Latin)
    "fra_Latn", // French (Latin)
    "spa_Latn", // Spanish (Latin)
    "deu_Latn", // German (Latin)
    "ita_Latn", // Italian (Latin)
    "por_Latn", // Portuguese (Latin)
    "rus_Cyrl", // Russian (Cyrillic)
    "jpn_Jpan", // Japanese (Japanese script)
    "kor_Hang", // Korean (Hangul)
    "cmn_Hans", // Chinese (Simplified)
    "cmn_Hant", // Chinese (Traditional)
    "ara_Arab", // Arabic (Arabic script)
    "hin_Deva", // Hindi (Devanagari)
];

/// Unique upload filename per call, so remote caches never collide
/// across requests
pub(crate) fn unique_wav_filename() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("audio_{millis}.wav")
}
