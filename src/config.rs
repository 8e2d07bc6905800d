use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "lexiclear-gateway")]
#[command(about = "API server for LexiClear legal term explanations and document simplification")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Cache TTL in seconds
    #[arg(short, long, default_value_t = 3600)]
    pub cache_ttl: u64,

    // Base URL of the OpenAI-compatible explanation provider
    #[arg(long, default_value = "https://api.openai.com/v1")]
    pub openai_url: String,

    // Base URL of the Gemini simplification provider
    #[arg(long, default_value = "https://generativelanguage.googleapis.com/v1beta")]
    pub gemini_url: String,

    // Upstream request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub request_timeout: u64,

    // Key probe timeout in seconds (diagnostic endpoint)
    #[arg(long, default_value_t = 5)]
    pub probe_timeout: u64,
}

// Provider keys come from the environment rather than the CLI so they stay
// out of process listings. Empty values count as unset.
pub fn openai_key() -> Option<String> {
    std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty())
}

pub fn gemini_key() -> Option<String> {
    std::env::var("GOOGLE_API_KEY").ok().filter(|k| !k.is_empty())
}
