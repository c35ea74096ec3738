//! Ordered decode fallback chain
//!
//! Strategies run in sequence; each is attempted only when the prior
//! one failed, and the failure reasons are collected so an exhausted
//! chain can say what every stage objected to.

use tracing::{debug, instrument};

use crate::decode;
use crate::error::AudioError;
use crate::pcm::PcmAudio;
use crate::transcoder::FfmpegTranscoder;

/// Converts arbitrary input audio into canonical mono 16-bit WAV
#[derive(Debug, Clone, Default)]
pub struct AudioNormalizer {
    transcoder: FfmpegTranscoder,
}

impl AudioNormalizer {
    /// Create a normalizer with the default FFmpeg fallback
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with a custom transcoder
    #[must_use]
    pub const fn with_transcoder(transcoder: FfmpegTranscoder) -> Self {
        Self { transcoder }
    }

    /// Normalize raw audio bytes to canonical WAV
    ///
    /// Well-formed WAV passes through the first stage, so the
    /// operation is idempotent on its own output.
    ///
    /// # Errors
    ///
    /// - [`AudioError::Empty`] on zero-length input, before any
    ///   decoder runs
    /// - [`AudioError::Timeout`] when the subprocess fallback
    ///   exceeds its budget
    /// - [`AudioError::UnsupportedFormat`] when every strategy is
    ///   exhausted
    #[instrument(skip(self, data), fields(input_size = data.len()))]
    pub async fn normalize(&self, data: &[u8]) -> Result<Vec<u8>, AudioError> {
        if data.is_empty() {
            return Err(AudioError::Empty);
        }

        let mut reasons: Vec<String> = Vec::new();

        match decode::with_symphonia(data) {
            Ok(decoded) => {
                debug!(
                    channels = decoded.channels,
                    sample_rate = decoded.sample_rate,
                    "Decoded with symphonia"
                );
                return Self::encode(&decoded);
            }
            Err(e) => {
                debug!(error = %e, "Symphonia decode failed, trying hound");
                reasons.push(format!("symphonia: {e}"));
            }
        }

        match decode::with_hound(data) {
            Ok(decoded) => {
                debug!(
                    channels = decoded.channels,
                    sample_rate = decoded.sample_rate,
                    "Decoded with hound"
                );
                return Self::encode(&decoded);
            }
            Err(e) => {
                debug!(error = %e, "Hound decode failed, trying FFmpeg");
                reasons.push(format!("hound: {e}"));
            }
        }

        match self.transcoder.to_canonical_wav(data).await {
            Ok(wav) => return Ok(wav),
            // A blown subprocess budget is a timeout, not a format problem.
            Err(AudioError::Timeout(ms)) => return Err(AudioError::Timeout(ms)),
            Err(e) => reasons.push(format!("ffmpeg: {e}")),
        }

        Err(AudioError::UnsupportedFormat {
            reasons: reasons.join("; "),
        })
    }

    fn encode(decoded: &decode::DecodedAudio) -> Result<Vec<u8>, AudioError> {
        PcmAudio::from_interleaved_f32(&decoded.samples, decoded.channels, decoded.sample_rate)
            .to_wav_bytes()
    }
}
