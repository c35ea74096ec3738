//! End-to-end routing tests against mock providers
//!
//! Adapters are constructed with explicit configs pointing at
//! wiremock servers, then driven through the `ModelAdapter` trait
//! object the way the service drives them.

use std::sync::Arc;

use asr_audio::wav_bytes_from_pcm;
use asr_models::providers::{ChunkformerAdapter, WhisperHttpAdapter};
use asr_models::{AdapterConfig, AsrError, AsrService, ModelAdapter, Task, TuningParams};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wav_fixture() -> Vec<u8> {
    wav_bytes_from_pcm(&[0i16; 1600], 16000).unwrap()
}

#[tokio::test]
async fn whisper_flow_through_trait_object() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "good morning"})))
        .expect(1)
        .mount(&server)
        .await;

    let adapter: Arc<dyn ModelAdapter> = Arc::new(
        WhisperHttpAdapter::new(AdapterConfig {
            endpoint: format!("{}/transcribe", server.uri()),
            api_key: None,
            timeout_ms: 5000,
        })
        .unwrap(),
    );

    let text = adapter
        .transcribe(
            wav_fixture(),
            Task::Transcribe,
            Some("en"),
            &TuningParams::default(),
        )
        .await
        .unwrap();

    assert_eq!(text, "good morning");
}

#[tokio::test]
async fn chunkformer_flow_normalizes_and_authenticates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/asr_chunkformer"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "xin chào"})))
        .expect(1)
        .mount(&server)
        .await;

    let adapter: Arc<dyn ModelAdapter> = Arc::new(
        ChunkformerAdapter::new(AdapterConfig {
            endpoint: format!("{}/asr_chunkformer", server.uri()),
            api_key: Some("secret".to_string()),
            timeout_ms: 5000,
        })
        .unwrap(),
    );

    let text = adapter
        .transcribe(wav_fixture(), Task::Transcribe, None, &TuningParams::default())
        .await
        .unwrap();

    assert_eq!(text, "xin chào");
}

#[tokio::test]
async fn provider_timeout_is_attributed_to_the_budget() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"text": "late"}))
                .set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let adapter = WhisperHttpAdapter::new(AdapterConfig {
        endpoint: format!("{}/transcribe", server.uri()),
        api_key: None,
        timeout_ms: 50,
    })
    .unwrap();

    let result = adapter
        .transcribe(vec![1], Task::Transcribe, None, &TuningParams::default())
        .await;

    assert!(matches!(result, Err(AsrError::Timeout(50))));
}

#[tokio::test]
async fn service_rejects_empty_audio() {
    let service = AsrService::new();
    let result = service
        .transcribe(
            Vec::new(),
            None,
            Task::Transcribe,
            None,
            &TuningParams::default(),
        )
        .await;
    assert!(matches!(result, Err(AsrError::EmptyAudio)));
}

#[tokio::test]
async fn service_rejects_unknown_model() {
    let service = AsrService::new();
    let result = service
        .transcribe(
            vec![1, 2, 3],
            Some("parakeet"),
            Task::Transcribe,
            None,
            &TuningParams::default(),
        )
        .await;

    match result {
        Err(AsrError::UnknownModel { name, known }) => {
            assert_eq!(name, "parakeet");
            assert!(known.iter().any(|k| k == "whisper_jax"));
        }
        other => panic!("expected UnknownModel, got {other:?}"),
    }
}

#[test]
fn model_listing_serializes_cleanly() {
    let service = AsrService::new();
    let listing = service.list_models();

    let json = serde_json::to_value(&listing).unwrap();
    let whisper = &json["whisper_jax"];
    assert_eq!(whisper["name"], "Whisper JAX");
    assert!(whisper.get("error").is_none());

    let omni = &json["omni_lingual"];
    assert_eq!(omni["supported_language_count"], 14);

    let qwen = &json["qwen3"];
    assert_eq!(qwen["supported_language_count"], 14);
    assert_eq!(qwen["supported_languages"].as_array().unwrap().len(), 10);
}
