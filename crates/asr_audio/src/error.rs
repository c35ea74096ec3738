//! Audio processing errors

use thiserror::Error;

/// Errors that can occur while normalizing audio
#[derive(Debug, Error)]
pub enum AudioError {
    /// Input was zero bytes; rejected before any decoder runs
    #[error("Audio data is empty")]
    Empty,

    /// Every decode strategy was exhausted
    #[error("Unsupported audio format: {reasons}")]
    UnsupportedFormat {
        /// Per-stage failure reasons, in the order the stages ran
        reasons: String,
    },

    /// An in-process decoder rejected the input
    #[error("Decoding failed: {0}")]
    Decode(String),

    /// Re-encoding decoded samples as WAV failed
    #[error("WAV encoding failed: {0}")]
    Encode(String),

    /// The subprocess transcoder failed (spawn, exit status, or I/O)
    #[error("Transcoding failed: {0}")]
    Transcode(String),

    /// The subprocess transcoder exceeded its wall-clock budget
    #[error("Transcoder timed out after {0}ms")]
    Timeout(u64),
}
