//! Shared helpers for handler tests: app state wired to stub provider
//! endpoints, stub routers for each upstream behavior, and request/body
//! shorthand.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::routing::get as get_route;
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::cache::{DocumentCache, TermCache};
use crate::providers::{GeminiClient, GeminiConfig, OpenAiClient, OpenAiConfig};
use crate::state::AppState;

// Short provider timeouts so timeout tests finish quickly.
const TEST_TIMEOUT: Duration = Duration::from_millis(500);

pub fn make_state(
    openai_key: Option<&str>,
    openai_url: &str,
    gemini_key: Option<&str>,
    gemini_url: &str,
) -> Arc<AppState> {
    let client = reqwest::Client::new();
    let ttl = Duration::from_secs(3600);
    let openai = OpenAiConfig::new(openai_key.map(String::from))
        .with_base_url(openai_url)
        .with_request_timeout(TEST_TIMEOUT)
        .with_probe_timeout(TEST_TIMEOUT);
    let gemini = GeminiConfig::new(gemini_key.map(String::from))
        .with_base_url(gemini_url)
        .with_request_timeout(TEST_TIMEOUT);
    Arc::new(AppState {
        term_cache: TermCache::new(ttl),
        document_cache: DocumentCache::new(ttl),
        openai: OpenAiClient::new(openai, client.clone()),
        gemini: GeminiClient::new(gemini, client),
    })
}

// Serve a stub provider on an ephemeral port, returning its base URL.
pub async fn serve_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

// Chat-completions stub that counts calls and answers with the given
// message content.
pub fn chat_stub(content: &str, hits: Arc<AtomicUsize>) -> Router {
    let content = content.to_string();
    Router::new().route(
        "/chat/completions",
        axum::routing::post(move || {
            let content = content.clone();
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": content}}]
                }))
            }
        }),
    )
}

// generateContent stub that counts calls and answers with the given text.
// Registered as a fallback so the model-specific path doesn't matter.
pub fn gemini_stub(text: &str, hits: Arc<AtomicUsize>) -> Router {
    let text = text.to_string();
    Router::new().fallback(move || {
        let text = text.clone();
        let hits = hits.clone();
        async move {
            hits.fetch_add(1, Ordering::SeqCst);
            Json(json!({
                "candidates": [{"content": {"parts": [{"text": text}]}}]
            }))
        }
    })
}

// Model-list stub for the key probe.
pub fn models_stub() -> Router {
    Router::new().route(
        "/models",
        get_route(|| async { Json(json!({"data": [{"id": "gpt-3.5-turbo"}]})) }),
    )
}

// Answers every request with the given status code.
pub fn status_stub(code: u16, hits: Arc<AtomicUsize>) -> Router {
    Router::new().fallback(move || {
        let hits = hits.clone();
        async move {
            hits.fetch_add(1, Ordering::SeqCst);
            (StatusCode::from_u16(code).unwrap(), "upstream says no")
        }
    })
}

// Sleeps longer than the client timeout before answering.
pub fn slow_stub(delay: Duration) -> Router {
    Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        Json(json!({}))
    })
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
