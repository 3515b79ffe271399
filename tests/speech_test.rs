//! Read-aloud relay and speech-to-text.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::Engine;
use common::{assert_error, TestHarness};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

fn audio_bytes() -> Vec<u8> {
    (0..64 * 1024).map(|i| (i % 251) as u8).collect()
}

#[tokio::test]
async fn ios_gets_mp3_relayed_unchanged() {
    let harness = TestHarness::new().await;
    let audio = audio_bytes();
    Mock::given(method("POST"))
        .and(path(common::SPEECH_PATH))
        .and(body_string_contains(r#""response_format":"mp3""#))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(audio.clone()))
        .expect(1)
        .mount(&harness.mock)
        .await;

    let request = Request::builder()
        .uri("/api/read?text=Once%20upon%20a%20time&os=ios")
        .body(Body::empty())
        .unwrap();
    let (status, content_type, bytes) = harness.send_raw(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("audio/mpeg"));
    assert_eq!(bytes, audio);
}

#[tokio::test]
async fn other_platforms_get_ogg() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path(common::SPEECH_PATH))
        .and(body_string_contains(r#""response_format":"opus""#))
        .and(body_string_contains("Tom sang a song."))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"OggS-audio".to_vec()))
        .expect(1)
        .mount(&harness.mock)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/read")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"text": "Tom sang a song.", "os": "android"}).to_string(),
        ))
        .unwrap();
    let (status, content_type, bytes) = harness.send_raw(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("audio/ogg"));
    assert_eq!(bytes, b"OggS-audio");
}

#[tokio::test]
async fn read_without_text_is_rejected() {
    let harness = TestHarness::new().await;

    let (status, body) = harness.get("/api/read?os=ios").await;
    assert_error(
        status,
        &body,
        StatusCode::BAD_REQUEST,
        "Missing required field: text",
    );
}

#[tokio::test]
async fn speech_failure_is_an_error_envelope() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path(common::SPEECH_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&harness.mock)
        .await;

    let (status, body) = harness.get("/api/read?text=hello").await;
    assert_error(
        status,
        &body,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
    );
}

#[tokio::test]
async fn speech_to_text_returns_transcript() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path(common::TRANSCRIPTION_PATH))
        .and(body_string_contains("audio.webm"))
        .and(body_string_contains("whisper-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "Ciao a tutti"})))
        .expect(1)
        .mount(&harness.mock)
        .await;

    let audio = base64::engine::general_purpose::STANDARD.encode(b"fake webm recording");
    let (status, body) = harness
        .post_json(
            "/api/story/speech-to-text",
            json!({
                "audio": format!("data:audio/webm;base64,{audio}"),
                "type": "audio/webm;codecs=opus",
                "language": "it"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["message"], "Audio transcribed");
    assert_eq!(body["data"], json!({"text": "Ciao a tutti"}));
}

#[tokio::test]
async fn speech_to_text_rejects_bad_audio() {
    let harness = TestHarness::new().await;

    let (status, body) = harness
        .post_json("/api/story/speech-to-text", json!({"type": "webm"}))
        .await;
    assert_error(
        status,
        &body,
        StatusCode::BAD_REQUEST,
        "Missing required field: audio",
    );

    let (status, body) = harness
        .post_json("/api/story/speech-to-text", json!({"audio": "%%% not base64 %%%"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid base64 data"));
    assert!(harness.mock.received_requests().await.unwrap().is_empty());
}
