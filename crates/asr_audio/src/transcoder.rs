//! Subprocess transcoder, the format of last resort
//!
//! Shells out to FFmpeg for containers the in-process decoders
//! reject (certain mobile-recorded formats in particular). Output is
//! forced to the canonical shape: 16-bit PCM little-endian, 16 kHz,
//! mono. FFmpeg must be installed on the system.

use std::process::Stdio;
use std::time::Duration;

use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::AudioError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// FFmpeg-based transcoder with an enforced wall-clock timeout
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    /// FFmpeg binary path (defaults to "ffmpeg" in PATH)
    ffmpeg_path: Option<String>,
    timeout: Duration,
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FfmpegTranscoder {
    /// Create a new transcoder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transcoder with a custom FFmpeg path
    #[must_use]
    pub fn with_ffmpeg_path(path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: Some(path.into()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the wall-clock timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn ffmpeg_path(&self) -> &str {
        self.ffmpeg_path.as_deref().unwrap_or("ffmpeg")
    }

    /// Check if FFmpeg is available on the system
    #[instrument(skip(self))]
    pub async fn is_available(&self) -> bool {
        Command::new(self.ffmpeg_path())
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|status| status.success())
    }

    /// Transcode arbitrary audio bytes to canonical mono 16-bit WAV
    ///
    /// Input and output go through temp files that are removed on
    /// every exit path: success, non-zero exit, timeout, and error.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::Timeout`] when the subprocess exceeds
    /// its budget and [`AudioError::Transcode`] for every other
    /// failure.
    #[instrument(skip(self, data), fields(input_size = data.len()))]
    pub async fn to_canonical_wav(&self, data: &[u8]) -> Result<Vec<u8>, AudioError> {
        // Temp files clean themselves up when dropped, which covers
        // the timeout and error returns below as well.
        let input = NamedTempFile::with_suffix(".bin")
            .map_err(|e| AudioError::Transcode(format!("Failed to create temp file: {e}")))?;
        let output = NamedTempFile::with_suffix(".wav")
            .map_err(|e| AudioError::Transcode(format!("Failed to create temp file: {e}")))?;

        let mut file = tokio::fs::File::create(input.path())
            .await
            .map_err(|e| AudioError::Transcode(format!("Failed to open temp file: {e}")))?;
        file.write_all(data)
            .await
            .map_err(|e| AudioError::Transcode(format!("Failed to write input: {e}")))?;
        file.flush()
            .await
            .map_err(|e| AudioError::Transcode(format!("Failed to flush input: {e}")))?;
        drop(file);

        let mut cmd = Command::new(self.ffmpeg_path());
        cmd.arg("-y")
            .arg("-i")
            .arg(input.path())
            .arg("-f")
            .arg("wav")
            .arg("-acodec")
            .arg("pcm_s16le")
            .arg("-ar")
            .arg("16000")
            .arg("-ac")
            .arg("1")
            .arg("-loglevel")
            .arg("error")
            .arg(output.path())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Running FFmpeg: {:?}", cmd);

        let result = tokio::time::timeout(self.timeout, cmd.output()).await;

        let process_output = match result {
            Err(_) => {
                #[allow(clippy::cast_possible_truncation)]
                return Err(AudioError::Timeout(self.timeout.as_millis() as u64));
            }
            Ok(Err(e)) => {
                return Err(AudioError::Transcode(format!("Failed to run FFmpeg: {e}")));
            }
            Ok(Ok(o)) => o,
        };

        if !process_output.status.success() {
            let stderr = String::from_utf8_lossy(&process_output.stderr);
            return Err(AudioError::Transcode(format!(
                "FFmpeg exited with status {}: {}",
                process_output.status,
                stderr.trim()
            )));
        }

        let wav = tokio::fs::read(output.path())
            .await
            .map_err(|e| AudioError::Transcode(format!("Failed to read output: {e}")))?;

        if wav.is_empty() {
            return Err(AudioError::Transcode(
                "FFmpeg produced empty output".to_string(),
            ));
        }

        debug!(output_size = wav.len(), "Transcode successful");

        Ok(wav)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_ffmpeg() {
        let transcoder = FfmpegTranscoder::new();
        assert_eq!(transcoder.ffmpeg_path(), "ffmpeg");
    }

    #[test]
    fn custom_path_is_used() {
        let transcoder = FfmpegTranscoder::with_ffmpeg_path("/opt/bin/ffmpeg");
        assert_eq!(transcoder.ffmpeg_path(), "/opt/bin/ffmpeg");
    }

    #[test]
    fn timeout_defaults_to_thirty_seconds() {
        let transcoder = FfmpegTranscoder::new();
        assert_eq!(transcoder.timeout, Duration::from_secs(30));
    }

    #[test]
    fn with_timeout_overrides_budget() {
        let transcoder = FfmpegTranscoder::new().with_timeout(Duration::from_secs(5));
        assert_eq!(transcoder.timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn is_available_returns_false_for_invalid_path() {
        let transcoder = FfmpegTranscoder::with_ffmpeg_path("/nonexistent/ffmpeg");
        assert!(!transcoder.is_available().await);
    }

    #[tokio::test]
    async fn transcode_fails_with_invalid_ffmpeg() {
        let transcoder = FfmpegTranscoder::with_ffmpeg_path("/nonexistent/ffmpeg");
        let result = transcoder.to_canonical_wav(&[1, 2, 3]).await;
        assert!(matches!(result, Err(AudioError::Transcode(_))));
    }
}
