//! ASR Audio - decoding and canonical WAV normalization
//!
//! Converts arbitrary input audio (any container/codec a decoder can
//! make sense of) into the one shape every ASR backend accepts:
//! mono, 16-bit signed little-endian PCM in a standard RIFF/WAVE
//! container.
//!
//! # Decode strategy
//!
//! [`AudioNormalizer::normalize`] walks an ordered fallback chain:
//!
//! 1. Symphonia probe + decode (WAV/FLAC/OGG/MP3/M4A and friends)
//! 2. Hound WAV reader (tolerant of WAVs symphonia rejects)
//! 3. FFmpeg subprocess (format of last resort, e.g. mobile-recorded
//!    containers), with an enforced wall-clock timeout
//!
//! Only when every stage fails does the input count as unsupported.
//!
//! # Example
//!
//! ```ignore
//! use asr_audio::AudioNormalizer;
//!
//! let normalizer = AudioNormalizer::new();
//! let wav = normalizer.normalize(&raw_bytes).await?;
//! // `wav` is guaranteed mono / 16-bit / little-endian PCM
//! ```

mod decode;
mod error;
mod normalizer;
mod pcm;
mod transcoder;

pub use error::AudioError;
pub use normalizer::AudioNormalizer;
pub use pcm::{PcmAudio, wav_bytes_from_pcm};
pub use transcoder::FfmpegTranscoder;
