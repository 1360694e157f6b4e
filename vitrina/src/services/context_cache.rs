use lru::LruCache;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// Thread-safe LRU cache for contextualized queries.
///
/// Uses the Arc<Mutex<>> pattern for safe concurrent access across threads.
/// Keys hash the full conversation prefix plus the current query, so the
/// same utterance under different histories never collides.
#[derive(Clone)]
pub struct ContextCache {
    cache: Arc<Mutex<LruCache<String, String>>>,
}

impl ContextCache {
    /// # Panics
    /// Panics if capacity is 0
    pub fn new(capacity: usize) -> Self {
        let cache = LruCache::new(NonZeroUsize::new(capacity).expect("Capacity must be non-zero"));
        Self {
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let mut cache = self.cache.lock().unwrap();
        cache.get(key).cloned()
    }

    pub fn put(&self, key: String, value: String) {
        let mut cache = self.cache.lock().unwrap();
        cache.put(key, value);
    }

    /// Stable hash key over the history sequence and the current query.
    pub fn generate_key(&self, history: &[String], query: &str) -> String {
        let mut hasher = DefaultHasher::new();
        for turn in history {
            turn.as_bytes().hash(&mut hasher);
            // Separator guards against boundary ambiguity between turns.
            0u8.hash(&mut hasher);
        }
        query.as_bytes().hash(&mut hasher);
        format!("{:x}", hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit_after_put() {
        let cache = ContextCache::new(10);
        let history = vec!["shoes".to_string()];
        let key = cache.generate_key(&history, "blue color");

        cache.put(key.clone(), "shoes with blue color".to_string());

        assert_eq!(cache.get(&key), Some("shoes with blue color".to_string()));
    }

    #[test]
    fn test_cache_miss() {
        let cache = ContextCache::new(10);
        assert_eq!(cache.get("nonexistent_key"), None);
    }

    #[test]
    fn test_key_depends_on_history() {
        let cache = ContextCache::new(10);
        let empty: Vec<String> = Vec::new();
        let shoes = vec!["shoes".to_string()];

        let key_no_history = cache.generate_key(&empty, "blue color");
        let key_with_history = cache.generate_key(&shoes, "blue color");

        assert_ne!(
            key_no_history, key_with_history,
            "Same query under different histories must not collide"
        );
    }

    #[test]
    fn test_key_boundary_between_turns() {
        let cache = ContextCache::new(10);
        let split = vec!["ab".to_string(), "c".to_string()];
        let joined = vec!["a".to_string(), "bc".to_string()];

        assert_ne!(
            cache.generate_key(&split, "q"),
            cache.generate_key(&joined, "q")
        );
    }

    #[test]
    fn test_key_generation_stability() {
        let cache = ContextCache::new(10);
        let history = vec!["shoes".to_string(), "black color".to_string()];

        let key1 = cache.generate_key(&history, "blue color");
        let key2 = cache.generate_key(&history, "blue color");

        assert_eq!(key1, key2, "Same inputs should generate identical keys");
    }

    #[test]
    fn test_cache_capacity_enforcement() {
        let cache = ContextCache::new(2);
        let empty: Vec<String> = Vec::new();

        let key1 = cache.generate_key(&empty, "query1");
        let key2 = cache.generate_key(&empty, "query2");
        let key3 = cache.generate_key(&empty, "query3");

        cache.put(key1.clone(), "rewrite1".to_string());
        cache.put(key2.clone(), "rewrite2".to_string());
        cache.put(key3.clone(), "rewrite3".to_string());

        // key1 should be evicted (LRU)
        assert_eq!(cache.get(&key1), None);
        assert_eq!(cache.get(&key2), Some("rewrite2".to_string()));
        assert_eq!(cache.get(&key3), Some("rewrite3".to_string()));
    }
}
