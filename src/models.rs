use serde::{Deserialize, Serialize};

// Structured explanation for a legal term. Produced by the provider or the
// fallback generator, immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub definition: String,
    pub example: String,
    pub implications: Vec<String>,
}

// POST /api/explain request body
#[derive(Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub term: String,
}

#[derive(Serialize)]
pub struct ExplainResponse {
    pub result: Explanation,
}

// POST /api/simplify request body
#[derive(Deserialize)]
pub struct SimplifyRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
pub struct SimplifyResponse {
    pub simplified: String,
}

// GET /api/check-status report - camelCase keys to match the frontend
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub status: &'static str,
    pub message: String,
    pub key_exists: bool,
    pub key_format: bool,
    pub api_access: bool,
}
