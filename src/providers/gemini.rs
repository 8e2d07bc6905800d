//! Gemini `generateContent` client for the document-simplification path.
//! Auth is the standard API key sent as a `?key=` query parameter.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use super::ProviderError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub request_timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    // Single generateContent call rewriting the document in plain English.
    pub async fn simplify_text(&self, text: &str) -> Result<String, ProviderError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::NotConfigured)?;

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": simplify_prompt(text)}],
            }]
        });

        debug!(model = %self.config.model, chars = text.len(), "requesting simplification");

        let response = self
            .client
            .post(self.api_url())
            .query(&[("key", key)])
            .header("Content-Type", "application/json")
            .timeout(self.config.request_timeout)
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            // Gemini error bodies carry a message at error.message
            let detail = serde_json::from_str::<Value>(&raw)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(String::from))
                .unwrap_or(raw);
            return Err(ProviderError::from_status(status.as_u16(), detail));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;
        extract_text(&payload)
    }
}

fn simplify_prompt(text: &str) -> String {
    format!(
        "You are a legal expert that simplifies complex legal documents into plain English. \
         Please simplify the following legal text for a non-lawyer audience: \
         replace legal jargon with simple, everyday language; keep the meaning accurate but \
         make it easy to understand; use short sentences and clear formatting; add section \
         headings if helpful for organization.\n\nLegal text to simplify:\n{text}\n\nSimplified version:"
    )
}

// Concatenate the text parts of the first candidate.
fn extract_text(payload: &Value) -> Result<String, ProviderError> {
    let parts = payload["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| ProviderError::Parse("no content parts in response".to_string()))?;
    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.is_empty() {
        return Err(ProviderError::Parse("empty text in response".to_string()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_targets_generate_content() {
        let client = GeminiClient::new(GeminiConfig::new(Some("key".into())), Client::new());
        assert!(client.api_url().ends_with(":generateContent"));
        assert!(client.api_url().contains(DEFAULT_MODEL));
    }

    #[test]
    fn prompt_carries_the_document() {
        let prompt = simplify_prompt("WHEREAS the parties agree");
        assert!(prompt.contains("WHEREAS the parties agree"));
        assert!(prompt.contains("plain English"));
    }

    #[test]
    fn extract_text_joins_parts() {
        let payload = json!({
            "candidates": [{
                "content": {"parts": [{"text": "part one "}, {"text": "part two"}]}
            }]
        });
        assert_eq!(extract_text(&payload).unwrap(), "part one part two");
    }

    #[test]
    fn extract_text_rejects_empty_candidates() {
        assert!(matches!(
            extract_text(&json!({"candidates": []})),
            Err(ProviderError::Parse(_))
        ));
        let no_text = json!({
            "candidates": [{"content": {"parts": [{"inlineData": {}}]}}]
        });
        assert!(matches!(extract_text(&no_text), Err(ProviderError::Parse(_))));
    }
}
