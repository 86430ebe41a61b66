#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use review_feedback_api::api::{self, AppState};
use review_feedback_api::config::LlmConfig;
use review_feedback_api::enrichment::FeedbackEnricher;
use review_feedback_api::storage::{JsonFileStore, ReviewStore};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// Endpoint that refuses connections.
pub const UNREACHABLE_LLM: &str = "http://127.0.0.1:1/v1/chat/completions";

pub const MODEL_FEEDBACK: &str = r#"{"summary":"Customer praises fast shipping","actions":["Thank the courier team","Feature review on site"],"user_response":"Thanks so much for the kind words!"}"#;

/// What the stand-in model endpoint answers with
#[derive(Clone)]
pub enum MockReply {
    /// 200 with this string as `choices[0].message.content`
    Content(&'static str),
    /// Bare status code with an error body
    Status(StatusCode),
    /// Feedback describing the request it received
    Echo,
}

pub struct MockLlm {
    pub endpoint: String,
    calls: Arc<AtomicUsize>,
}

impl MockLlm {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub async fn spawn_llm(reply: MockReply) -> MockLlm {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let handler = move |headers: HeaderMap, Json(body): Json<Value>| {
        let reply = reply.clone();
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            mock_response(reply, &headers, &body)
        }
    };

    let app = Router::new().route("/v1/chat/completions", post(handler));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockLlm {
        endpoint: format!("http://{}/v1/chat/completions", addr),
        calls,
    }
}

fn mock_response(reply: MockReply, headers: &HeaderMap, body: &Value) -> Response {
    let content = match reply {
        MockReply::Status(status) => {
            return (status, Json(json!({"error": {"message": "upstream failure"}}))).into_response();
        }
        MockReply::Content(content) => content.to_string(),
        MockReply::Echo => {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            json!({
                "summary": body["model"],
                "actions": [
                    body["messages"][1]["content"],
                    body["response_format"]["type"],
                    body["messages"][0]["role"],
                ],
                "user_response": auth,
            })
            .to_string()
        }
    };

    Json(json!({
        "id": "gen-123",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    }))
    .into_response()
}

pub fn llm_config(endpoint: &str, api_key: Option<&str>) -> LlmConfig {
    LlmConfig {
        endpoint: endpoint.to_string(),
        api_key: api_key.map(str::to_string),
        timeout_secs: 5,
        ..LlmConfig::default()
    }
}

pub fn app(data_file: &Path, llm_endpoint: &str) -> Router {
    let store = ReviewStore::File(JsonFileStore::new(data_file));
    let enricher = FeedbackEnricher::new(llm_config(llm_endpoint, Some("sk-test"))).unwrap();
    api::router(AppState {
        store: Arc::new(store),
        enricher: Arc::new(enricher),
    })
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn submit(app: &Router, rating: i64, review_text: &str) -> (StatusCode, Value) {
    post_json(app, "/api/reviews", json!({"rating": rating, "review_text": review_text})).await
}
