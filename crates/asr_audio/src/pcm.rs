//! Canonical PCM representation and WAV encoding
//!
//! Every successfully decoded input collapses into a [`PcmAudio`]:
//! mono, 16-bit signed samples at an explicit rate. Multi-channel
//! input is averaged down; float samples in [-1, 1] are scaled by
//! `i16::MAX` and truncated.

use std::io::Cursor;

use crate::error::AudioError;

/// Canonical mono 16-bit PCM audio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmAudio {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl PcmAudio {
    /// Create from already-canonical samples
    #[must_use]
    pub const fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Collapse interleaved float frames into canonical mono PCM
    ///
    /// Frames with more than one channel are averaged; a trailing
    /// partial frame is averaged over the samples it actually has.
    #[must_use]
    pub fn from_interleaved_f32(samples: &[f32], channels: usize, sample_rate: u32) -> Self {
        let channels = channels.max(1);
        let mono: Vec<i16> = if channels == 1 {
            samples.iter().copied().map(f32_to_i16).collect()
        } else {
            samples
                .chunks(channels)
                .map(|frame| {
                    #[allow(clippy::cast_precision_loss)]
                    let avg = frame.iter().sum::<f32>() / frame.len() as f32;
                    f32_to_i16(avg)
                })
                .collect()
        };

        Self {
            samples: mono,
            sample_rate,
        }
    }

    /// Get the samples
    #[must_use]
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Get the sample rate in Hz
    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples (equals frames, audio is mono)
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check whether there are no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Encode as a standard RIFF/WAVE byte stream
    ///
    /// The header declares 1 channel, 16-bit samples, little-endian,
    /// at this audio's sample rate.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, AudioError> {
        wav_bytes_from_pcm(&self.samples, self.sample_rate)
    }
}

/// Encode mono 16-bit samples as a standard PCM WAV byte stream
pub fn wav_bytes_from_pcm(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, AudioError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec)
        .map_err(|e| AudioError::Encode(e.to_string()))?;

    for sample in samples {
        writer
            .write_sample(*sample)
            .map_err(|e| AudioError::Encode(e.to_string()))?;
    }

    writer
        .finalize()
        .map_err(|e| AudioError::Encode(e.to_string()))?;

    Ok(cursor.into_inner())
}

/// Scale a float sample in [-1, 1] to i16, saturating out of range
#[allow(clippy::cast_possible_truncation)]
fn f32_to_i16(sample: f32) -> i16 {
    (sample * f32::from(i16::MAX)) as i16
}
