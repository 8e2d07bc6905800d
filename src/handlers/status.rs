use std::sync::Arc;

use axum::{Json, extract::State};

use crate::metrics::REQUEST_TOTAL;
use crate::models::StatusReport;
use crate::providers::ProviderError;
use crate::state::AppState;

// GET /api/check-status
//
// Three-stage key diagnostic: existence -> format -> live probe. Always
// answers 200; the report body carries the outcome.
pub async fn check_status_handler(State(state): State<Arc<AppState>>) -> Json<StatusReport> {
    REQUEST_TOTAL.inc();

    if !state.openai.key_exists() {
        return Json(StatusReport {
            status: "no-key",
            message: "OPENAI_API_KEY not found in environment variables".to_string(),
            key_exists: false,
            key_format: false,
            api_access: false,
        });
    }

    if !state.openai.key_format_ok() {
        return Json(StatusReport {
            status: "error",
            message: "API key format is incorrect (should start with sk-)".to_string(),
            key_exists: true,
            key_format: false,
            api_access: false,
        });
    }

    let (status, message, api_access) = match state.openai.probe().await {
        Ok(()) => ("success", "API key is valid and working".to_string(), true),
        Err(ProviderError::AuthRejected { .. }) => {
            ("error", "Invalid API key - authentication failed".to_string(), false)
        }
        Err(ProviderError::Timeout) => (
            "error",
            "API test timed out - check your network connection".to_string(),
            false,
        ),
        Err(err) => match err.status() {
            Some(code) => ("error", format!("API test failed with status: {code}"), false),
            None => ("error", format!("API test failed: {err}"), false),
        },
    };

    Json(StatusReport {
        status,
        message,
        key_exists: true,
        key_format: true,
        api_access,
    })
}
