//! In-process decode stages
//!
//! Stage 1 runs the symphonia probe, which covers WAV/FLAC/OGG
//! natively plus the compressed formats enabled at build time
//! (MP3, AAC/M4A). Stage 2 is a hound WAV reader that tolerates
//! headers symphonia refuses. Both stages hand back interleaved
//! float samples with the native channel layout and sample rate;
//! downmixing happens later.

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::warn;

use crate::error::AudioError;

/// Decoded audio prior to normalization
#[derive(Debug)]
pub(crate) struct DecodedAudio {
    /// Interleaved float samples in [-1, 1]
    pub samples: Vec<f32>,
    /// Native channel count
    pub channels: usize,
    /// Native sample rate in Hz
    pub sample_rate: u32,
}

/// Stage 1: generic multi-format decode through symphonia
pub(crate) fn with_symphonia(data: &[u8]) -> Result<DecodedAudio, AudioError> {
    let cursor = Cursor::new(data.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &Hint::new(),
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AudioError::Decode(format!("probe: {e}")))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| AudioError::Decode("no audio track found".to_string()))?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| AudioError::Decode("unknown sample rate".to_string()))?;
    let channels = codec_params.channels.map_or(1, |c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| AudioError::Decode(format!("codec: {e}")))?;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(AudioError::Decode(format!("packet: {e}"))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                warn!(error = %e, "Skipping corrupt audio frame");
                continue;
            }
            Err(e) => return Err(AudioError::Decode(format!("decode: {e}"))),
        };

        let spec = *decoded.spec();
        let frames = decoded.frames();
        if frames == 0 {
            continue;
        }

        let mut buf = SampleBuffer::<f32>::new(frames as u64, spec);
        buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(buf.samples());
    }

    if samples.is_empty() {
        return Err(AudioError::Decode("no audio samples decoded".to_string()));
    }

    Ok(DecodedAudio {
        samples,
        channels,
        sample_rate,
    })
}

/// Stage 2: tolerant WAV read through hound
///
/// Handles integer WAVs of any bit depth up to 32 and float WAVs,
/// preserving channel layout and the native sample rate.
pub(crate) fn with_hound(data: &[u8]) -> Result<DecodedAudio, AudioError> {
    let mut reader = hound::WavReader::new(Cursor::new(data))
        .map_err(|e| AudioError::Decode(format!("wav header: {e}")))?;

    let spec = reader.spec();
    let channels = usize::from(spec.channels).max(1);
    let sample_rate = spec.sample_rate;

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| AudioError::Decode(format!("wav samples: {e}")))?,
        hound::SampleFormat::Int => {
            let shift = 1i64 << (spec.bits_per_sample - 1);
            #[allow(clippy::cast_precision_loss)]
            let scale = shift as f32;
            reader
                .samples::<i32>()
                .map(|s| {
                    #[allow(clippy::cast_precision_loss)]
                    s.map(|v| v as f32 / scale)
                })
                .collect::<Result<_, _>>()
                .map_err(|e| AudioError::Decode(format!("wav samples: {e}")))?
        }
    };

    if samples.is_empty() {
        return Err(AudioError::Decode("no audio samples decoded".to_string()));
    }

    Ok(DecodedAudio {
        samples,
        channels,
        sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcm::wav_bytes_from_pcm;

    fn mono_wav(samples: &[i16], rate: u32) -> Vec<u8> {
        wav_bytes_from_pcm(samples, rate).unwrap()
    }

    #[test]
    fn symphonia_decodes_canonical_wav() {
        let wav = mono_wav(&[0, 1000, -1000, 500], 16000);
        let decoded = with_symphonia(&wav).unwrap();

        assert_eq!(decoded.channels, 1);
        assert_eq!(decoded.sample_rate, 16000);
        assert_eq!(decoded.samples.len(), 4);
        assert!(decoded.samples.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn symphonia_rejects_garbage() {
        let result = with_symphonia(b"definitely not audio");
        assert!(matches!(result, Err(AudioError::Decode(_))));
    }

    #[test]
    fn symphonia_rejects_empty_wav() {
        let wav = mono_wav(&[], 16000);
        assert!(matches!(with_symphonia(&wav), Err(AudioError::Decode(_))));
    }

    #[test]
    fn hound_decodes_int16_wav() {
        let wav = mono_wav(&[i16::MAX, 0, i16::MIN], 8000);
        let decoded = with_hound(&wav).unwrap();

        assert_eq!(decoded.channels, 1);
        assert_eq!(decoded.sample_rate, 8000);
        assert_eq!(decoded.samples.len(), 3);
        assert!((decoded.samples[0] - (f32::from(i16::MAX) / 32768.0)).abs() < 1e-6);
    }

    #[test]
    fn hound_decodes_stereo_float_wav() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for s in [0.25f32, 0.75, -0.25, -0.75] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let decoded = with_hound(&cursor.into_inner()).unwrap();
        assert_eq!(decoded.channels, 2);
        assert_eq!(decoded.sample_rate, 44100);
        assert_eq!(decoded.samples, vec![0.25, 0.75, -0.25, -0.75]);
    }

    #[test]
    fn hound_rejects_garbage() {
        let result = with_hound(b"still not audio");
        assert!(matches!(result, Err(AudioError::Decode(_))));
    }
}
