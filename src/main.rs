mod cache;
mod config;
mod error;
mod fallback;
mod handlers;
mod metrics;
mod models;
mod providers;
mod state;
#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cache::{DocumentCache, TermCache};
use crate::config::Args;
use crate::providers::{GeminiClient, GeminiConfig, OpenAiClient, OpenAiConfig};
use crate::state::AppState;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let ttl = Duration::from_secs(args.cache_ttl);
    let client = reqwest::Client::new();

    let openai_config = OpenAiConfig::new(config::openai_key())
        .with_base_url(args.openai_url.clone())
        .with_request_timeout(Duration::from_secs(args.request_timeout))
        .with_probe_timeout(Duration::from_secs(args.probe_timeout));
    let gemini_config = GeminiConfig::new(config::gemini_key())
        .with_base_url(args.gemini_url.clone())
        .with_request_timeout(Duration::from_secs(args.request_timeout));

    // caches and clients are built once here and injected everywhere
    let state = Arc::new(AppState {
        term_cache: TermCache::new(ttl),
        document_cache: DocumentCache::new(ttl),
        openai: OpenAiClient::new(openai_config, client.clone()),
        gemini: GeminiClient::new(gemini_config, client),
    });

    let app = router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    info!(
        port = args.port,
        cache_ttl = args.cache_ttl,
        openai_url = %args.openai_url,
        gemini_url = %args.gemini_url,
        "lexiclear gateway listening"
    );
    axum::serve(listener, app).await.unwrap();
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .route("/api/explain", post(handlers::explain_handler))
        .route("/api/simplify", post(handlers::simplify_handler))
        .route("/api/check-status", get(handlers::check_status_handler))
        .with_state(state)
}
