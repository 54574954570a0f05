//! Bounded, TTL-based in-memory cache for translations and detection results.
//!
//! The cache is the middle tier of the cost ladder: a hit here saves a
//! provider round trip without the strictness of the static phrase table.
//! Capacity is bounded by an LRU map and entries carry an expiry instant;
//! expired entries are treated as misses and removed lazily on access.
//!
//! A coarse mutex serializes access. Contention is low (one lock per cache
//! probe, held only for the map operation) and there is deliberately no
//! single-flight coalescing: two concurrent cold-cache requests for the same
//! key may both miss and both go to the provider.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;

/// Maximum number of characters of source text used in a translation key.
const TRANSLATION_KEY_PREFIX_CHARS: usize = 100;

/// Maximum number of characters of source text used in a detection key.
const DETECTION_KEY_PREFIX_CHARS: usize = 50;

/// Composite cache key.
///
/// Translation keys combine a truncated prefix of the source text with the
/// target language and the source language (or "auto" when detecting).
/// Detection keys use a shorter prefix under a `detect:` namespace so the two
/// families never collide on the same text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a translation of `text` into `target_lang`.
    pub fn translation(text: &str, target_lang: &str, source_lang: Option<&str>) -> Self {
        let prefix: String = text.chars().take(TRANSLATION_KEY_PREFIX_CHARS).collect();
        CacheKey(format!(
            "{}:{}:{}",
            prefix,
            target_lang,
            source_lang.unwrap_or("auto")
        ))
    }

    /// Key for a language-detection result for `text`.
    pub fn detection(text: &str) -> Self {
        let prefix: String = text.chars().take(DETECTION_KEY_PREFIX_CHARS).collect();
        CacheKey(format!("detect:{}", prefix))
    }

    /// Key built from an already-composed string (archive records).
    pub fn raw(key: impl Into<String>) -> Self {
        CacheKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Bounded key/value store with per-entry expiry.
///
/// Thread-safe: all methods take `&self` and may be called concurrently from
/// multiple in-flight request handlers.
pub struct TranslationCache {
    entries: Mutex<LruCache<CacheKey, CacheEntry>>,
    default_ttl: Duration,
}

impl TranslationCache {
    /// Create a cache bounded to `capacity` entries, with `default_ttl`
    /// applied by [`set`](Self::set).
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            default_ttl,
        }
    }

    /// Fetch a live value. Expired entries are removed and reported as a
    /// miss.
    pub fn get(&self, key: &CacheKey) -> Option<String> {
        let mut entries = self.entries.lock().unwrap();
        let expired = match entries.get(key) {
            Some(entry) if entry.is_expired() => true,
            Some(entry) => return Some(entry.value.clone()),
            None => return None,
        };
        if expired {
            entries.pop(key);
        }
        None
    }

    /// Store a value under the default TTL. Overwrite replaces, never merges.
    pub fn set(&self, key: CacheKey, value: impl Into<String>) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Store a value with an explicit TTL.
    pub fn set_with_ttl(&self, key: CacheKey, value: impl Into<String>, ttl: Duration) {
        let entry = CacheEntry {
            value: value.into(),
            expires_at: Instant::now() + ttl,
        };
        let mut entries = self.entries.lock().unwrap();
        entries.put(key, entry);
    }

    /// Push an existing entry's expiry out to `ttl` from now, keeping its
    /// value. Returns false when the entry is absent or already expired.
    pub fn extend_ttl(&self, key: &CacheKey, ttl: Duration) -> bool {
        let mut entries = self.entries.lock().unwrap();
        let expired = match entries.get_mut(key) {
            Some(entry) if !entry.is_expired() => {
                entry.expires_at = Instant::now() + ttl;
                return true;
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        false
    }

    /// Number of entries currently held, including not-yet-collected expired
    /// ones.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}
