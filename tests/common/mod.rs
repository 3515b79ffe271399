//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which stands up a mock model service with
//! `wiremock`, points a default config at it, and builds the full router
//! over a temporary upload directory. Requests go through the router with
//! `oneshot`; [`TestHarness::with_server`] also binds a random port for
//! HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use storyteller::config::Config;
use storyteller::server::{create_router, AppContext};
use storyteller_llm::{OpenAiBackend, Storyteller};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CHAT_PATH: &str = "/v1/chat/completions";
pub const IMAGE_PATH: &str = "/v1/images/generations";
pub const SPEECH_PATH: &str = "/v1/audio/speech";
pub const TRANSCRIPTION_PATH: &str = "/v1/audio/transcriptions";

/// Test harness wrapping an [`AppContext`] backed by a mock model service.
pub struct TestHarness {
    pub ctx: AppContext,
    pub mock: MockServer,
    pub uploads: TempDir,
}

impl TestHarness {
    /// Create a new harness with default configuration.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a new harness, adjusting the default configuration first.
    pub async fn with_config(adjust: impl FnOnce(&mut Config)) -> Self {
        let mock = MockServer::start().await;
        let uploads = TempDir::new().expect("failed to create upload dir");

        let mut config = Config::default();
        config.openai.api_key = "sk-test".to_string();
        config.openai.base_url = format!("{}/v1", mock.uri());
        config.openai.timeout_secs = 5;
        config.uploads.dir = uploads.path().join("uploads");
        adjust(&mut config);

        let backend = OpenAiBackend::new(config.openai.settings()).expect("failed to build backend");
        let storyteller = Storyteller::new(Arc::new(backend));
        let ctx = AppContext::new(config, storyteller);

        Self {
            ctx,
            mock,
            uploads,
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.ctx.clone(), None)
    }

    /// Start an Axum server on a random port and return the bound address.
    pub async fn with_server(&self) -> SocketAddr {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        addr
    }

    /// Answer every chat completion with `content`.
    pub async fn mock_chat(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
            .mount(&self.mock)
            .await;
    }

    /// Answer chat completions with `replies`, one per request, in order.
    pub async fn mock_chat_sequence(&self, replies: &[&str]) {
        for reply in replies {
            Mock::given(method("POST"))
                .and(path(CHAT_PATH))
                .respond_with(ResponseTemplate::new(200).set_body_json(completion(reply)))
                .up_to_n_times(1)
                .mount(&self.mock)
                .await;
        }
    }

    pub async fn mock_image(&self, url: &str) {
        Mock::given(method("POST"))
            .and(path(IMAGE_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"created": 1, "data": [{"url": url}]})),
            )
            .mount(&self.mock)
            .await;
    }

    pub async fn mock_speech(&self, audio: &[u8]) {
        Mock::given(method("POST"))
            .and(path(SPEECH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(audio.to_vec()))
            .mount(&self.mock)
            .await;
    }

    pub async fn mock_transcription(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path(TRANSCRIPTION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": text})))
            .mount(&self.mock)
            .await;
    }

    /// Bodies of every chat completion request the mock received.
    pub async fn chat_requests(&self) -> Vec<Value> {
        self.mock
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == CHAT_PATH)
            .map(|r| serde_json::from_slice(&r.body).expect("chat body is JSON"))
            .collect()
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send_json(request).await
    }

    pub async fn post(&self, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap();
        self.send_json(request).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post(uri, body.to_string()).await
    }

    /// Send a request and return status, content type, and raw body.
    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, bytes.to_vec())
    }

    async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, _, bytes) = self.send_raw(request).await;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is JSON")
        };
        (status, body)
    }
}

/// A chat completion response carrying `content`.
pub fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

/// Wrap a JSON value in a ```json fence, as chat models often reply.
pub fn fenced(value: &Value) -> String {
    format!("```json\n{}\n```", serde_json::to_string_pretty(value).unwrap())
}

/// A tiny PNG drawing, base64-encoded.
pub fn png_base64() -> String {
    use base64::Engine;
    let img = image::RgbImage::from_pixel(8, 8, image::Rgb([10, 120, 200]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    base64::engine::general_purpose::STANDARD.encode(buf.into_inner())
}

pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, message: &str) {
    assert_eq!(status, expected, "unexpected status, body: {body}");
    assert_eq!(body["type"], "error");
    assert_eq!(body["status"], expected.as_u16());
    assert_eq!(body["message"], message);
    assert!(body["data"].is_null());
}
