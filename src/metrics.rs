use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("lexiclear_requests_total", "Total number of API requests").unwrap();
    pub static ref CACHE_HITS: Counter =
        register_counter!("lexiclear_cache_hits_total", "Total cache hits").unwrap();
    pub static ref CACHE_MISSES: Counter =
        register_counter!("lexiclear_cache_misses_total", "Total cache misses").unwrap();
    pub static ref FALLBACKS_TOTAL: Counter = register_counter!(
        "lexiclear_fallbacks_total",
        "Responses served from locally generated fallback content"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "lexiclear_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
    pub static ref CACHE_SIZE: Gauge =
        register_gauge!("lexiclear_cache_size", "Current number of cached entries").unwrap();
}
