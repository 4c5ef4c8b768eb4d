//! Backend client tests against a mock HTTP server.
//!
//! These pin the wire behavior of the three Azure REST clients: request
//! shape (paths, headers, query), response parsing, and the status-code to
//! error-category mapping.

use bytes::Bytes;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voxlate_gateway::core::recognition::{
    AudioFormatDescriptor, RecognitionBackend, RecognitionError, RecognitionOutcome,
    RecognizerSession,
};
use voxlate_gateway::core::stt::{AzureSpeechClient, AzureSpeechConfig};
use voxlate_gateway::core::translate::{
    TranslateError, TranslationBackend, TranslatorClient, TranslatorConfig,
};
use voxlate_gateway::core::tts::{SynthesisBackend, SynthesisClient, SynthesisConfig};

fn speech_client(server: &MockServer) -> AzureSpeechClient {
    AzureSpeechClient::new(AzureSpeechConfig {
        subscription_key: "test-speech-key".to_string(),
        region: String::new(),
        language: "en-US".to_string(),
        endpoint: Some(server.uri()),
    })
    .unwrap()
}

fn translator_client(server: &MockServer) -> TranslatorClient {
    TranslatorClient::new(TranslatorConfig {
        subscription_key: "test-translator-key".to_string(),
        region: Some("westeurope".to_string()),
        endpoint: server.uri(),
    })
    .unwrap()
}

fn synthesis_client(server: &MockServer) -> SynthesisClient {
    SynthesisClient::new(SynthesisConfig {
        subscription_key: "test-speech-key".to_string(),
        region: String::new(),
        endpoint: Some(server.uri()),
        ..Default::default()
    })
    .unwrap()
}

// =============================================================================
// Speech-to-text client
// =============================================================================

#[tokio::test]
async fn test_stt_success_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/speech/recognition/conversation/cognitiveservices/v1"))
        .and(header("Ocp-Apim-Subscription-Key", "test-speech-key"))
        .and(query_param("language", "en-US"))
        .and(query_param("format", "simple"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "RecognitionStatus": "Success",
            "DisplayText": "Hello world.",
            "Offset": 300000,
            "Duration": 12800000
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = speech_client(&server);
    let mut session = client
        .open_session(
            Bytes::from_static(b"RIFF fake wav"),
            AudioFormatDescriptor::PcmWav { sample_rate: 16000 },
        )
        .await
        .unwrap();

    let outcome = session.recognize_once().await.unwrap();
    session.close().await;

    assert_eq!(
        outcome,
        RecognitionOutcome::Recognized {
            text: "Hello world.".to_string()
        }
    );
}

#[tokio::test]
async fn test_stt_pcm_content_type_carries_sample_rate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Content-Type", "audio/wav; codecs=audio/pcm; samplerate=8000"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"RecognitionStatus": "NoMatch"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = speech_client(&server);
    let mut session = client
        .open_session(
            Bytes::from_static(b"..."),
            AudioFormatDescriptor::PcmWav { sample_rate: 8000 },
        )
        .await
        .unwrap();

    let outcome = session.recognize_once().await.unwrap();
    assert_eq!(outcome, RecognitionOutcome::NoMatch);
}

#[tokio::test]
async fn test_stt_auto_detect_uses_octet_stream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Content-Type", "application/octet-stream"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"RecognitionStatus": "Success", "DisplayText": "ok"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = speech_client(&server);
    let mut session = client
        .open_session(Bytes::from_static(b"mp3data"), AudioFormatDescriptor::AutoDetect)
        .await
        .unwrap();

    let outcome = session.recognize_once().await.unwrap();
    assert_eq!(
        outcome,
        RecognitionOutcome::Recognized {
            text: "ok".to_string()
        }
    );
}

#[tokio::test]
async fn test_stt_auth_failure_is_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = speech_client(&server);
    let mut session = client
        .open_session(
            Bytes::from_static(b"..."),
            AudioFormatDescriptor::PcmWav { sample_rate: 16000 },
        )
        .await
        .unwrap();

    let err = session.recognize_once().await.unwrap_err();
    let RecognitionError::Backend(details) = err else {
        panic!("expected Backend error, got {err}");
    };
    assert!(details.contains("authentication"));
}

#[tokio::test]
async fn test_stt_service_error_status_maps_to_error_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"RecognitionStatus": "Error"})),
        )
        .mount(&server)
        .await;

    let client = speech_client(&server);
    let mut session = client
        .open_session(
            Bytes::from_static(b"..."),
            AudioFormatDescriptor::PcmWav { sample_rate: 16000 },
        )
        .await
        .unwrap();

    let outcome = session.recognize_once().await.unwrap();
    assert!(matches!(outcome, RecognitionOutcome::Error { .. }));
}

// =============================================================================
// Translation client
// =============================================================================

#[tokio::test]
async fn test_translate_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(query_param("api-version", "3.0"))
        .and(query_param("from", "en"))
        .and(query_param("to", "fr"))
        .and(header("Ocp-Apim-Subscription-Key", "test-translator-key"))
        .and(header("Ocp-Apim-Subscription-Region", "westeurope"))
        .and(body_string_contains("Hello world"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"translations": [{"text": "Bonjour le monde", "to": "fr"}]}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = translator_client(&server);
    let translated = client.translate("Hello world", "en", "fr").await.unwrap();
    assert_eq!(translated, "Bonjour le monde");
}

#[tokio::test]
async fn test_translate_status_mapping() {
    for (status, check) in [
        (401, "auth"),
        (403, "denied"),
        (429, "rate"),
        (500, "provider"),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": {"code": status * 1000, "message": "service detail"}
            })))
            .mount(&server)
            .await;

        let client = translator_client(&server);
        let err = client.translate("hi", "en", "fr").await.unwrap_err();
        match check {
            "auth" => assert!(matches!(err, TranslateError::AuthenticationFailed(_))),
            "denied" => assert!(matches!(err, TranslateError::AccessDenied(_))),
            "rate" => assert!(matches!(err, TranslateError::RateLimited(_))),
            _ => assert!(matches!(err, TranslateError::Provider(_))),
        }
    }
}

#[tokio::test]
async fn test_translate_empty_result_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"translations": []}])))
        .mount(&server)
        .await;

    let client = translator_client(&server);
    let err = client.translate("hi", "en", "fr").await.unwrap_err();
    assert!(matches!(err, TranslateError::InvalidResponse(_)));
}

// =============================================================================
// Synthesis client
// =============================================================================

#[tokio::test]
async fn test_synthesize_success_returns_audio_bytes() {
    let server = MockServer::start().await;
    let wav_bytes = b"RIFF....WAVEfmt synthesized audio".to_vec();
    Mock::given(method("POST"))
        .and(path("/cognitiveservices/v1"))
        .and(header("Ocp-Apim-Subscription-Key", "test-speech-key"))
        .and(header("Content-Type", "application/ssml+xml"))
        .and(header("X-Microsoft-OutputFormat", "riff-16khz-16bit-mono-pcm"))
        .and(body_string_contains("fr-FR-DeniseNeural"))
        .and(body_string_contains("Bonjour"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(wav_bytes.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = synthesis_client(&server);
    let audio = client
        .synthesize("Bonjour", "fr-FR", "fr-FR-DeniseNeural")
        .await
        .unwrap();
    assert_eq!(audio.as_ref(), wav_bytes.as_slice());
}

#[tokio::test]
async fn test_synthesize_empty_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = synthesis_client(&server);
    let err = client
        .synthesize("Bonjour", "fr-FR", "fr-FR-DeniseNeural")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        voxlate_gateway::core::tts::SynthesisError::InvalidResponse(_)
    ));
}

#[tokio::test]
async fn test_synthesize_escapes_ssml_markup() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("R&amp;D"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"audio".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let client = synthesis_client(&server);
    client
        .synthesize("R&D", "fr-FR", "fr-FR-DeniseNeural")
        .await
        .unwrap();
}
