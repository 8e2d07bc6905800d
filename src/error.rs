use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::providers::ProviderError;

// Error body shared by every endpoint: {"error": ..., "details": ...?}.
// Only validation failures and surfaced upstream failures ever reach this;
// everything else degrades to a 200 with fallback content.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: message.to_string(),
            details: None,
        }
    }

    // A surfaced upstream failure keeps the upstream status code. The caller
    // supplies user-facing messages for the auth / server-error / other cases
    // since they name the provider.
    pub fn upstream(
        err: &ProviderError,
        auth_message: &str,
        server_message: &str,
        other_message: &str,
    ) -> Self {
        let status = err
            .status()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let message = match err {
            ProviderError::AuthRejected { .. } => auth_message,
            ProviderError::ServerError { .. } => server_message,
            _ => other_message,
        };
        Self {
            status,
            error: message.to_string(),
            details: err.detail().filter(|d| !d.is_empty()).map(String::from),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
