//! Integration tests for the audio normalization pipeline
//!
//! Every input shape that decodes must come out as canonical WAV:
//! 1 channel, 16-bit samples, positive sample rate.

use std::io::Cursor;

use asr_audio::{AudioError, AudioNormalizer, FfmpegTranscoder, wav_bytes_from_pcm};

/// Normalizer whose subprocess fallback can never run, so tests
/// exercise only the in-process stages deterministically.
fn normalizer() -> AudioNormalizer {
    AudioNormalizer::with_transcoder(FfmpegTranscoder::with_ffmpeg_path("/nonexistent/ffmpeg"))
}

fn assert_canonical(wav: &[u8], expected_rate: u32) {
    let reader = hound::WavReader::new(Cursor::new(wav.to_vec())).expect("output must parse");
    let spec = reader.spec();
    assert_eq!(spec.channels, 1, "canonical audio is mono");
    assert_eq!(spec.bits_per_sample, 16, "canonical audio is 16-bit");
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    assert!(spec.sample_rate > 0);
    assert_eq!(spec.sample_rate, expected_rate);
}

fn wav_with_spec(spec: hound::WavSpec, write: impl FnOnce(&mut hound::WavWriter<&mut Cursor<Vec<u8>>>)) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("writer");
    write(&mut writer);
    writer.finalize().expect("finalize");
    cursor.into_inner()
}

#[tokio::test]
async fn mono_int16_wav_normalizes() {
    let wav = wav_bytes_from_pcm(&[0, 500, -500, 1000], 16000).expect("encode");
    let out = normalizer().normalize(&wav).await.expect("normalize");
    assert_canonical(&out, 16000);
}

#[tokio::test]
async fn stereo_int16_wav_becomes_mono() {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 48000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let wav = wav_with_spec(spec, |w| {
        for s in [1000i16, 3000, -1000, -3000] {
            w.write_sample(s).expect("sample");
        }
    });

    let out = normalizer().normalize(&wav).await.expect("normalize");
    assert_canonical(&out, 48000);

    let mut reader = hound::WavReader::new(Cursor::new(out)).expect("reader");
    let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
    assert_eq!(samples.len(), 2);
    // Channels averaged: (1000 + 3000) / 2, within scaling tolerance.
    assert!((i32::from(samples[0]) - 2000).abs() <= 2);
}

#[tokio::test]
async fn float32_wav_normalizes() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let wav = wav_with_spec(spec, |w| {
        for s in [0.5f32, -0.5, 0.0, 1.0] {
            w.write_sample(s).expect("sample");
        }
    });

    let out = normalizer().normalize(&wav).await.expect("normalize");
    assert_canonical(&out, 44100);
}

#[tokio::test]
async fn high_bit_depth_wav_normalizes() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 96000,
        bits_per_sample: 24,
        sample_format: hound::SampleFormat::Int,
    };
    let wav = wav_with_spec(spec, |w| {
        for s in [0i32, 1 << 20, -(1 << 20)] {
            w.write_sample(s).expect("sample");
        }
    });

    let out = normalizer().normalize(&wav).await.expect("normalize");
    assert_canonical(&out, 96000);
}

#[tokio::test]
async fn empty_input_fails_before_decoding() {
    let result = normalizer().normalize(&[]).await;
    assert!(matches!(result, Err(AudioError::Empty)));
}

#[tokio::test]
async fn normalize_twice_preserves_shape_and_rate() {
    let wav = wav_bytes_from_pcm(&[10, 20, 30], 32000).expect("encode");
    let once = normalizer().normalize(&wav).await.expect("first pass");
    let twice = normalizer().normalize(&once).await.expect("second pass");

    assert_canonical(&once, 32000);
    assert_canonical(&twice, 32000);

    let first = hound::WavReader::new(Cursor::new(once)).expect("reader");
    let second = hound::WavReader::new(Cursor::new(twice)).expect("reader");
    assert_eq!(first.len(), second.len());
}

#[tokio::test]
async fn undecodable_input_reports_every_stage() {
    let result = normalizer().normalize(&[0xDE, 0xAD, 0xBE, 0xEF]).await;
    match result {
        Err(AudioError::UnsupportedFormat { reasons }) => {
            assert!(reasons.contains("symphonia"));
            assert!(reasons.contains("hound"));
            assert!(reasons.contains("ffmpeg"));
        }
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}
