use std::sync::Arc;
use std::time::Instant;

use axum::{Json, extract::State};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::fallback;
use crate::metrics::{
    CACHE_HITS, CACHE_MISSES, CACHE_SIZE, FALLBACKS_TOTAL, REQUEST_LATENCY, REQUEST_TOTAL,
};
use crate::models::{SimplifyRequest, SimplifyResponse};
use crate::providers::ProviderError;
use crate::state::AppState;

// POST /api/simplify
//
// Same pipeline as the explanation path: validate -> cache -> provider ->
// fallback, keyed by a digest of the document text.
pub async fn simplify_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SimplifyRequest>,
) -> Result<Json<SimplifyResponse>, ApiError> {
    REQUEST_TOTAL.inc();
    let start_time = Instant::now();

    let text = payload.text.trim().to_string();
    if text.is_empty() {
        return Err(ApiError::bad_request("No text provided"));
    }

    if let Some(cached) = state.document_cache.get(&text) {
        CACHE_HITS.inc();
        info!(chars = text.len(), "simplification cache hit");
        REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());
        return Ok(Json(SimplifyResponse { simplified: cached }));
    }
    CACHE_MISSES.inc();

    let simplified = match state.gemini.simplify_text(&text).await {
        Ok(simplified) => simplified,
        Err(ProviderError::NotConfigured | ProviderError::BadKeyFormat) => {
            degrade(&text, "API not configured")
        }
        Err(ProviderError::RateLimited { .. }) => degrade(&text, "API rate limit exceeded"),
        Err(ProviderError::Timeout) => degrade(&text, "request timeout"),
        Err(ProviderError::Parse(err)) => {
            warn!(%err, "unparseable provider response");
            degrade(&text, "API response parsing failed")
        }
        Err(ProviderError::Transport(err)) => {
            warn!(%err, "transport failure reaching provider");
            degrade(&text, "service temporarily unavailable")
        }
        Err(err) => {
            warn!(%err, "surfacing upstream failure");
            return Err(ApiError::upstream(
                &err,
                "Invalid API key - please check your Google API key",
                "Gemini service is temporarily unavailable",
                "Failed to simplify document",
            ));
        }
    };

    state.document_cache.put(&text, simplified.clone());
    CACHE_SIZE.set((state.term_cache.len() + state.document_cache.len()) as f64);
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());
    Ok(Json(SimplifyResponse { simplified }))
}

fn degrade(text: &str, reason: &str) -> String {
    FALLBACKS_TOTAL.inc();
    info!(reason, "serving fallback simplification");
    fallback::simplify_fallback(text, reason)
}
