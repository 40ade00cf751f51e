//! Mock LLM provider for integration tests
//!
//! Serves both the OpenAI `/v1/chat/completions` shape and the Gemini
//! `/v1beta/models/{model}:generateContent` shape, and records every request
//! it receives.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// How the mock answers every request
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Well-formed answer with this text
    Answer(String),
    /// Valid JSON that carries no answer
    NoAnswer,
    /// Body that is not JSON
    Malformed,
    /// Error status with a provider-style error body
    Fail(StatusCode),
}

/// A request as the mock received it
#[derive(Debug, Clone)]
pub struct Recorded {
    /// Request path
    pub path: String,
    /// Decoded JSON body (`Null` if the body was not JSON)
    pub body: serde_json::Value,
    /// `Authorization` header value
    pub authorization: Option<String>,
    /// `x-goog-api-key` header value
    pub goog_api_key: Option<String>,
}

struct MockState {
    behavior: Behavior,
    requests: Mutex<Vec<Recorded>>,
}

/// Mock provider server bound to a random local port
pub struct MockProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockProvider {
    /// Start a mock that answers with `text`
    pub async fn answering(text: &str) -> anyhow::Result<Self> {
        Self::start(Behavior::Answer(text.to_owned())).await
    }

    /// Start a mock with the given behavior
    pub async fn start(behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            behavior,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_openai))
            .route("/v1beta/models/{model_action}", routing::post(handle_gemini))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// OpenAI-style chat completions endpoint
    pub fn openai_url(&self) -> String {
        format!("http://{}/v1/chat/completions", self.addr)
    }

    /// Gemini-style endpoint naming `model`
    pub fn gemini_url(&self, model: &str) -> String {
        format!("http://{}/v1beta/models/{model}:generateContent", self.addr)
    }

    /// Gemini-style endpoint with a `{model}` placeholder
    pub fn gemini_template_url(&self) -> String {
        format!("http://{}/v1beta/models/{{model}}:generateContent", self.addr)
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().expect("mock state poisoned").clone()
    }

    /// The only request received, panicking if there were zero or several
    pub fn single_request(&self) -> Recorded {
        let mut requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
        requests.remove(0)
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn record(state: &MockState, path: String, headers: &HeaderMap, body: &Bytes) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned)
    };

    let recorded = Recorded {
        path,
        body: serde_json::from_slice(body).unwrap_or(serde_json::Value::Null),
        authorization: header("authorization"),
        goog_api_key: header("x-goog-api-key"),
    };

    state.requests.lock().expect("mock state poisoned").push(recorded);
}

async fn handle_openai(State(state): State<Arc<MockState>>, headers: HeaderMap, body: Bytes) -> Response {
    record(&state, "/v1/chat/completions".to_owned(), &headers, &body);

    match &state.behavior {
        Behavior::Answer(text) => Json(serde_json::json!({
            "id": "chatcmpl-test-123",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "mock-model",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 3, "completion_tokens": 4, "total_tokens": 7}
        }))
        .into_response(),
        Behavior::NoAnswer => Json(serde_json::json!({"id": "chatcmpl-test-123", "choices": []})).into_response(),
        Behavior::Malformed => "<html>gateway timeout</html>".into_response(),
        Behavior::Fail(status) => (
            *status,
            Json(serde_json::json!({
                "error": {"message": "mock provider intentional failure", "type": "server_error"}
            })),
        )
            .into_response(),
    }
}

async fn handle_gemini(
    State(state): State<Arc<MockState>>,
    Path(model_action): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&state, format!("/v1beta/models/{model_action}"), &headers, &body);

    match &state.behavior {
        Behavior::Answer(text) => Json(serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP",
                "index": 0
            }],
            "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 4, "totalTokenCount": 7}
        }))
        .into_response(),
        Behavior::NoAnswer => Json(serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": []}, "finishReason": "SAFETY"}]
        }))
        .into_response(),
        Behavior::Malformed => "<html>gateway timeout</html>".into_response(),
        Behavior::Fail(status) => (
            *status,
            Json(serde_json::json!({
                "error": {"code": status.as_u16(), "message": "mock provider intentional failure", "status": "INTERNAL"}
            })),
        )
            .into_response(),
    }
}
