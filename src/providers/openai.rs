//! OpenAI-compatible chat client for the explanation path, plus the key
//! probe used by the diagnostic endpoint.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::models::Explanation;

use super::{OPENAI_KEY_PREFIX, ProviderError};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const SYSTEM_PROMPT: &str = "You are a legal expert. Provide clear, concise explanations of \
     legal terms. Always return valid JSON with definition, example, and implications keys.";

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub request_timeout: Duration,
    pub probe_timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(5),
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

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}

pub struct OpenAiClient {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn key_exists(&self) -> bool {
        self.config.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    pub fn key_format_ok(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|k| k.starts_with(OPENAI_KEY_PREFIX))
    }

    // Syntactic credential check, never touches the network.
    fn check_key(&self) -> Result<&str, ProviderError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::NotConfigured)?;
        if !key.starts_with(OPENAI_KEY_PREFIX) {
            return Err(ProviderError::BadKeyFormat);
        }
        Ok(key)
    }

    // Single chat-completion call asking the model for a structured
    // explanation. Called at most once per request, no retries.
    pub async fn explain_term(&self, term: &str) -> Result<Explanation, ProviderError> {
        let key = self.check_key()?;

        let body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": explain_prompt(term)},
            ],
            "temperature": 0.3,
            "max_tokens": 500,
            "response_format": {"type": "json_object"},
        });

        debug!(%term, model = %self.config.model, "requesting explanation");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {key}"))
            .timeout(self.config.request_timeout)
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), detail));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;
        parse_chat_content(&payload)
    }

    // Live probe against the model-list endpoint, short timeout. Only the
    // diagnostic endpoint calls this.
    pub async fn probe(&self) -> Result<(), ProviderError> {
        let key = self.check_key()?;

        let response = self
            .client
            .get(format!("{}/models", self.config.base_url))
            .header("Authorization", format!("Bearer {key}"))
            .timeout(self.config.probe_timeout)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), detail));
        }
        Ok(())
    }
}

fn explain_prompt(term: &str) -> String {
    format!(
        "Explain the legal term \"{term}\" in plain English. \
         Provide a concise definition, a practical example, and 2-3 implications. \
         Return your response as valid JSON with these keys: \
         definition (string), example (string), implications (array of strings)"
    )
}

// The model returns its JSON as the text content of the first choice.
fn parse_chat_content(payload: &Value) -> Result<Explanation, ProviderError> {
    let content = payload["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| ProviderError::Parse("no message content in response".to_string()))?;
    serde_json::from_str(content).map_err(|e| ProviderError::Parse(e.to_string()))
}
