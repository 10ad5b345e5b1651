// Content-addressed memo cache for the pure pipeline stages.
//
// Extraction, normalization and topic fitting are deterministic functions of
// their inputs, so results are keyed by a SHA-256 over the input bytes plus
// the parameters. Inputs never change once hashed, so there is no
// invalidation and no eviction; entries live as long as the session.

use std::collections::HashMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::debug;

/// Hex SHA-256 identifying one (input, parameters) combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey(String);

impl ContentKey {
    /// Hash a raw byte buffer with no extra parameters.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        KeyBuilder::new("bytes").bytes(bytes).finish()
    }

    /// Hash an ordered token sequence.
    pub fn of_tokens(tokens: &[String]) -> Self {
        KeyBuilder::new("tokens").tokens(tokens).finish()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Short prefix is plenty for log lines
        write!(f, "{}", &self.0[..self.0.len().min(12)])
    }
}

/// Incrementally builds a [`ContentKey`].
///
/// Every field is length-prefixed so `["ab", "c"]` and `["a", "bc"]` never
/// collide.
pub struct KeyBuilder {
    hasher: Sha256,
}

impl KeyBuilder {
    /// Start a key in the given namespace (stage name).
    pub fn new(namespace: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((namespace.len() as u64).to_le_bytes());
        hasher.update(namespace.as_bytes());
        Self { hasher }
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.hasher.update((bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
        self
    }

    pub fn tokens(mut self, tokens: &[String]) -> Self {
        self.hasher.update((tokens.len() as u64).to_le_bytes());
        for token in tokens {
            self = self.bytes(token.as_bytes());
        }
        self
    }

    pub fn param(mut self, value: u64) -> Self {
        self.hasher.update(value.to_le_bytes());
        self
    }

    pub fn finish(self) -> ContentKey {
        ContentKey(hex::encode(self.hasher.finalize()))
    }
}

/// Eviction-free memo table. Values are shared behind `Arc` so callers can
/// hold results without cloning large text buffers.
pub struct MemoCache<V> {
    name: &'static str,
    entries: HashMap<ContentKey, Arc<V>>,
}

impl<V> MemoCache<V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &ContentKey) -> Option<Arc<V>> {
        self.entries.get(key).cloned()
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// Errors are not cached: a failed computation is retried next time.
    pub fn get_or_try_insert<E>(
        &mut self,
        key: ContentKey,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        if let Some(hit) = self.entries.get(&key) {
            debug!(cache = self.name, key = %key, "Cache hit");
            return Ok(Arc::clone(hit));
        }

        let value = Arc::new(compute()?);
        debug!(cache = self.name, key = %key, "Cache fill");
        self.entries.insert(key, Arc::clone(&value));
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_stable_and_parameter_sensitive() {
        let tokens = vec!["steel".to_string(), "growth".to_string()];
        let a = KeyBuilder::new("topics").tokens(&tokens).param(5).finish();
        let b = KeyBuilder::new("topics").tokens(&tokens).param(5).finish();
        let c = KeyBuilder::new("topics").tokens(&tokens).param(6).finish();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_length_prefix_prevents_concatenation_collisions() {
        let left = vec!["ab".to_string(), "c".to_string()];
        let right = vec!["a".to_string(), "bc".to_string()];
        assert_ne!(ContentKey::of_tokens(&left), ContentKey::of_tokens(&right));
    }

    #[test]
    fn test_memo_computes_once() {
        let mut cache: MemoCache<String> = MemoCache::new("test");
        let key = ContentKey::of_bytes(b"hello");
        let mut calls = 0;

        for _ in 0..3 {
            let value = cache
                .get_or_try_insert::<()>(key.clone(), || {
                    calls += 1;
                    Ok("world".to_string())
                })
                .unwrap();
            assert_eq!(value.as_str(), "world");
        }

        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache: MemoCache<u32> = MemoCache::new("test");
        let key = ContentKey::of_bytes(b"x");

        let first = cache.get_or_try_insert(key.clone(), || Err("boom"));
        assert!(first.is_err());
        assert!(cache.is_empty());

        let second = cache.get_or_try_insert::<&str>(key, || Ok(7)).unwrap();
        assert_eq!(*second, 7);
    }
}
