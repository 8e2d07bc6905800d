use std::sync::Arc;
use std::time::Instant;

use axum::{Json, extract::State};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::fallback;
use crate::metrics::{
    CACHE_HITS, CACHE_MISSES, CACHE_SIZE, FALLBACKS_TOTAL, REQUEST_LATENCY, REQUEST_TOTAL,
};
use crate::models::{ExplainRequest, ExplainResponse, Explanation};
use crate::providers::ProviderError;
use crate::state::AppState;

// POST /api/explain
//
// validate -> cache -> provider -> parse, degrading to fallback content on
// configuration and transient failures. Only malformed input and
// provider-authoritative rejections (401, 5xx, unexpected status) surface as
// errors; everything else comes back 200 with usable content.
pub async fn explain_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ExplainRequest>,
) -> Result<Json<ExplainResponse>, ApiError> {
    REQUEST_TOTAL.inc();
    let start_time = Instant::now();

    // the term is captured once here and threaded through every branch below
    let term = payload.term.trim().to_string();
    if term.is_empty() {
        return Err(ApiError::bad_request("No term provided"));
    }

    if let Some(cached) = state.term_cache.get(&term) {
        CACHE_HITS.inc();
        info!(%term, "explanation cache hit");
        REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());
        return Ok(Json(ExplainResponse { result: cached }));
    }
    CACHE_MISSES.inc();

    let result = match state.openai.explain_term(&term).await {
        Ok(explanation) => explanation,
        Err(ProviderError::NotConfigured) => degrade(&term, "API not configured"),
        Err(ProviderError::BadKeyFormat) => degrade(&term, "API key format invalid"),
        Err(ProviderError::RateLimited { .. }) => degrade(&term, "API rate limit exceeded"),
        Err(ProviderError::Timeout) => degrade(&term, "request timeout"),
        Err(ProviderError::Parse(err)) => {
            warn!(%term, %err, "unparseable provider response");
            degrade(&term, "API response parsing failed")
        }
        Err(ProviderError::Transport(err)) => {
            warn!(%term, %err, "transport failure reaching provider");
            degrade(&term, "service temporarily unavailable")
        }
        Err(err) => {
            // auth rejections and server errors mean the operator has to act;
            // canned content would hide them
            warn!(%term, %err, "surfacing upstream failure");
            return Err(ApiError::upstream(
                &err,
                "Invalid API key - please check your OpenAI API key",
                "OpenAI service is temporarily unavailable",
                "Failed to get explanation",
            ));
        }
    };

    // fallback results are cached under the same key as real ones
    state.term_cache.put(&term, result.clone());
    CACHE_SIZE.set((state.term_cache.len() + state.document_cache.len()) as f64);
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());
    Ok(Json(ExplainResponse { result }))
}

fn degrade(term: &str, reason: &str) -> Explanation {
    FALLBACKS_TOTAL.inc();
    info!(%term, reason, "serving fallback explanation");
    fallback::generate(term, reason)
}
