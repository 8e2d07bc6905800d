use crate::cache::{DocumentCache, TermCache};
use crate::providers::{GeminiClient, OpenAiClient};

// App's shared state. Built once in main and handed to every handler behind
// an Arc; the caches live and die with the process.
pub struct AppState {
    pub term_cache: TermCache,
    pub document_cache: DocumentCache,
    pub openai: OpenAiClient,
    pub gemini: GeminiClient,
}
