//! Usage ledger: frequency tracking and cache-lifetime promotion.
//!
//! Every successful provider-backed translation is recorded here. Once a
//! (phrase, target language) pair has been translated three times, the phrase
//! is evidently popular and its cache entry is promoted to a 24-hour
//! lifetime, so the channel stops paying for it.
//!
//! Records are keyed by the normalized phrase and are never evicted: the
//! ledger grows for the lifetime of the process. That matches the original
//! behavior and is an accepted property for long-lived deployments, where
//! distinct (phrase, language) pairs accumulate far more slowly than
//! messages.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheKey, TranslationCache};
use crate::phrases::normalize;

/// Frequency record for one (normalized phrase, target language) pair.
#[derive(Debug, Clone)]
pub struct UsageRecord {
    /// How many times this pair has been translated by the provider.
    /// Monotonically non-decreasing for the process lifetime.
    pub occurrence_count: u64,

    /// The most recent translation produced for the pair.
    pub last_translation: String,
}

/// In-memory frequency tracker deciding when a phrase earns an extended
/// cache lifetime.
pub struct UsageLedger {
    records: Mutex<HashMap<(String, String), UsageRecord>>,
    cache: Arc<TranslationCache>,
    promotion_threshold: u64,
    promotion_ttl: Duration,
}

impl UsageLedger {
    /// Create a ledger that promotes entries in `cache` to `promotion_ttl`
    /// once a pair's count reaches `promotion_threshold`.
    pub fn new(
        cache: Arc<TranslationCache>,
        promotion_threshold: u64,
        promotion_ttl: Duration,
    ) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            cache,
            promotion_threshold,
            promotion_ttl,
        }
    }

    /// Record one provider-backed translation of `text` into `target_lang`.
    ///
    /// Exactly when the occurrence count crosses the promotion threshold, the
    /// translation's cache entry has its TTL extended. The extension is
    /// fire-and-forget: a missing or already-expired cache entry is logged
    /// and ignored, never reported to the caller.
    pub fn record_use(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
        translation: &str,
    ) {
        let ledger_key = (normalize(text), target_lang.to_string());

        let crossed_threshold = {
            let mut records = self.records.lock().unwrap();
            let record = records.entry(ledger_key).or_insert_with(|| UsageRecord {
                occurrence_count: 0,
                last_translation: String::new(),
            });
            record.occurrence_count += 1;
            record.last_translation = translation.to_string();
            record.occurrence_count == self.promotion_threshold
        };

        if crossed_threshold {
            let cache_key = CacheKey::translation(text, target_lang, source_lang);
            if self.cache.extend_ttl(&cache_key, self.promotion_ttl) {
                debug!(
                    target_lang,
                    "promoted popular phrase to {}s cache lifetime",
                    self.promotion_ttl.as_secs()
                );
            } else {
                debug!(target_lang, "promotion skipped, cache entry already gone");
            }
        }
    }

    /// Current occurrence count for a (phrase, target language) pair.
    pub fn occurrences(&self, text: &str, target_lang: &str) -> u64 {
        let key = (normalize(text), target_lang.to_string());
        self.records
            .lock()
            .unwrap()
            .get(&key)
            .map(|record| record.occurrence_count)
            .unwrap_or(0)
    }

    /// The most recent translation recorded for a pair, if any.
    pub fn last_translation(&self, text: &str, target_lang: &str) -> Option<String> {
        let key = (normalize(text), target_lang.to_string());
        self.records
            .lock()
            .unwrap()
            .get(&key)
            .map(|record| record.last_translation.clone())
    }

    /// Number of distinct (phrase, target language) pairs tracked.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
