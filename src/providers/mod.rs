mod gemini;
mod openai;

pub use gemini::{GeminiClient, GeminiConfig};
pub use openai::{OpenAiClient, OpenAiConfig};

use thiserror::Error;

// Expected prefix for OpenAI secret keys.
pub const OPENAI_KEY_PREFIX: &str = "sk-";

// Everything that can go wrong talking to a provider. Handlers decide which
// variants degrade to fallback content and which surface to the caller.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API key configured")]
    NotConfigured,
    #[error("API key format is invalid")]
    BadKeyFormat,
    #[error("rate limit exceeded")]
    RateLimited { detail: String },
    #[error("authentication rejected ({status})")]
    AuthRejected { status: u16, detail: String },
    #[error("provider server error ({status})")]
    ServerError { status: u16, detail: String },
    #[error("unexpected provider status {status}")]
    UnexpectedStatus { status: u16, detail: String },
    #[error("request timed out")]
    Timeout,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("could not parse provider response: {0}")]
    Parse(String),
}

impl ProviderError {
    // Classify a non-success HTTP status from the provider.
    pub(crate) fn from_status(status: u16, detail: String) -> Self {
        match status {
            429 => Self::RateLimited { detail },
            401 => Self::AuthRejected { status, detail },
            s if s >= 500 => Self::ServerError { status: s, detail },
            s => Self::UnexpectedStatus { status: s, detail },
        }
    }

    // reqwest reports timeouts as transport errors with is_timeout set.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }

    // The upstream HTTP status, for variants that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::AuthRejected { status, .. }
            | Self::ServerError { status, .. }
            | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    // The upstream response body, for variants that carry one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::RateLimited { detail }
            | Self::AuthRejected { detail, .. }
            | Self::ServerError { detail, .. }
            | Self::UnexpectedStatus { detail, .. } => Some(detail.as_str()),
            _ => None,
        }
    }
}
