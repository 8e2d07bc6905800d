use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};

use crate::models::Explanation;

// Cache entry with timestamp
#[derive(Clone)]
struct Entry<V> {
    value: V,
    created_at: Instant,
}

// Shared TTL-on-read store. An entry past the TTL is treated as absent and
// removed when touched; there is no background eviction and no size bound.
// Writes always overwrite, last write wins.
pub struct TtlCache<V> {
    entries: DashMap<String, Entry<V>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => {
                if entry.created_at.elapsed() < self.ttl {
                    return Some(entry.value.clone());
                }
                true
            }
            None => false,
        };
        // the read guard is gone by here, safe to remove
        if expired {
            self.entries.remove(key);
        }
        None
    }

    pub fn put(&self, key: String, value: V) {
        self.entries.insert(
            key,
            Entry {
                value,
                created_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // backdated insert so tests can sit right on the TTL boundary
    #[cfg(test)]
    fn put_with_age(&self, key: String, value: V, age: Duration) {
        let created_at = Instant::now()
            .checked_sub(age)
            .expect("backdate exceeds monotonic clock range");
        self.entries.insert(key, Entry { value, created_at });
    }
}

// Term keys are case-insensitive and whitespace-trimmed.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

// Digest of the document text. Documents are too large to key the map with
// directly, so the key is a sha-256 of the trimmed input.
pub fn document_key(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.trim().as_bytes());
    format!("{:x}", hasher.finalize())
}

// Explanation cache keyed by normalized term.
pub struct TermCache(TtlCache<Explanation>);

impl TermCache {
    pub fn new(ttl: Duration) -> Self {
        Self(TtlCache::new(ttl))
    }

    pub fn get(&self, term: &str) -> Option<Explanation> {
        self.0.get(&normalize_term(term))
    }

    pub fn put(&self, term: &str, explanation: Explanation) {
        self.0.put(normalize_term(term), explanation);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

// Simplified-document cache keyed by text digest.
pub struct DocumentCache(TtlCache<String>);

impl DocumentCache {
    pub fn new(ttl: Duration) -> Self {
        Self(TtlCache::new(ttl))
    }

    pub fn get(&self, text: &str) -> Option<String> {
        self.0.get(&document_key(text))
    }

    pub fn put(&self, text: &str, simplified: String) {
        self.0.put(document_key(text), simplified);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explanation(definition: &str) -> Explanation {
        Explanation {
            definition: definition.to_string(),
            example: "example".to_string(),
            implications: vec!["one".to_string()],
        }
    }

    #[test]
    fn hit_and_miss() {
        let cache = TtlCache::new(Duration::from_secs(3600));
        assert_eq!(cache.get("k"), None::<String>);
        cache.put("k".to_string(), "v".to_string());
        assert_eq!(cache.get("k"), Some("v".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn put_overwrites() {
        let cache = TtlCache::new(Duration::from_secs(3600));
        cache.put("k".to_string(), "old".to_string());
        cache.put("k".to_string(), "new".to_string());
        assert_eq!(cache.get("k"), Some("new".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn entry_just_under_ttl_is_a_hit() {
        let ttl = Duration::from_millis(50);
        let cache = TtlCache::new(ttl);
        cache.put_with_age("k".to_string(), "v".to_string(), ttl - Duration::from_millis(1));
        assert_eq!(cache.get("k"), Some("v".to_string()));
    }

    #[test]
    fn entry_just_over_ttl_is_a_miss() {
        let ttl = Duration::from_millis(50);
        let cache = TtlCache::new(ttl);
        cache.put_with_age("k".to_string(), "v".to_string(), ttl + Duration::from_millis(1));
        assert_eq!(cache.get("k"), None);
        // the stale entry is dropped on read, not left behind
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn term_lookup_is_trimmed_and_case_insensitive() {
        let cache = TermCache::new(Duration::from_secs(3600));
        cache.put("  Force Majeure ", explanation("d"));
        assert_eq!(cache.get("force majeure"), Some(explanation("d")));
        assert_eq!(cache.get("FORCE MAJEURE"), Some(explanation("d")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn term_entry_expires_on_read() {
        let cache = TermCache::new(Duration::from_millis(30));
        cache.put("lien", explanation("d"));
        assert!(cache.get("lien").is_some());
        std::thread::sleep(Duration::from_millis(60));
        assert!(cache.get("lien").is_none());
    }

    #[test]
    fn document_key_ignores_surrounding_whitespace() {
        assert_eq!(document_key("  some text  "), document_key("some text"));
        assert_ne!(document_key("some text"), document_key("other text"));
    }

    #[test]
    fn document_cache_round_trip() {
        let cache = DocumentCache::new(Duration::from_secs(3600));
        assert!(cache.get("the agreement").is_none());
        cache.put("the agreement", "short version".to_string());
        assert_eq!(cache.get("the agreement"), Some("short version".to_string()));
    }
}
