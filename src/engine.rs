//! Translation engine: the cost ladder walked for every request.
//!
//! Resolution order, first hit wins:
//!
//! 1. Static phrase table (free, synchronous)
//! 2. Bounded TTL cache
//! 3. The metered provider — the result is cached and the usage ledger
//!    records the phrase, promoting it to a longer lifetime on frequent use
//!
//! A provider failure propagates to the caller as-is; there is no silent
//! fallback text. Caching happens before usage recording, and there is no
//! single-flight coalescing, so two concurrent cold-cache requests for the
//! same key may both pay for a provider call.
//!
//! All state is owned by the engine instance. Construct one engine per
//! process and hand it by reference to every request handler.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::cache::{CacheKey, TranslationCache};
use crate::config::Config;
use crate::error::ProviderError;
use crate::phrases::{normalize, PhraseTable};
use crate::provider::{ProviderUsage, TranslationProvider, TranslationRequest};
use crate::usage::UsageLedger;

/// Per-instance counters, reported through [`TranslationEngine::report`].
#[derive(Default)]
struct EngineMetrics {
    phrase_hits: AtomicUsize,
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,
    provider_calls: AtomicUsize,
    provider_failures: AtomicUsize,
}

/// Snapshot of engine activity since construction.
#[derive(Debug, Clone, Serialize)]
pub struct EngineReport {
    pub phrase_hits: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub provider_calls: usize,
    pub provider_failures: usize,
    /// Cache hit rate as a percentage (0-100), phrase hits excluded
    pub cache_hit_rate: f64,
    /// Distinct (phrase, language) pairs in the usage ledger
    pub tracked_phrases: usize,
}

/// Orchestrator for cost-optimized translation.
pub struct TranslationEngine {
    phrases: PhraseTable,
    cache: Arc<TranslationCache>,
    ledger: UsageLedger,
    provider: Arc<dyn TranslationProvider>,
    metrics: EngineMetrics,
}

impl TranslationEngine {
    pub fn new(config: &Config, provider: Arc<dyn TranslationProvider>) -> Self {
        let cache = Arc::new(TranslationCache::new(
            config.translation_cache_capacity,
            config.translation_cache_ttl(),
        ));
        let ledger = UsageLedger::new(
            cache.clone(),
            config.promotion_threshold,
            config.promotion_ttl(),
        );

        Self {
            phrases: PhraseTable::new(),
            cache,
            ledger,
            provider,
            metrics: EngineMetrics::default(),
        }
    }

    /// The shared cache, also used by `LanguageDetector` for detection
    /// results.
    pub fn cache(&self) -> Arc<TranslationCache> {
        self.cache.clone()
    }

    pub fn ledger(&self) -> &UsageLedger {
        &self.ledger
    }

    /// Translate `text` into `target_lang`.
    ///
    /// `source_lang` is optional; when absent the provider auto-detects and
    /// the cache key records "auto". Returns the provider's error unchanged
    /// when the paid tier fails.
    pub async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<String, ProviderError> {
        let normalized = normalize(text);
        if let Some(translation) = self.phrases.lookup(&normalized, target_lang) {
            self.metrics.phrase_hits.fetch_add(1, Ordering::Relaxed);
            debug!(target_lang, "phrase table hit");
            return Ok(translation.to_string());
        }

        let key = CacheKey::translation(text, target_lang, source_lang);
        if let Some(translation) = self.cache.get(&key) {
            self.metrics.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(translation);
        }
        self.metrics.cache_misses.fetch_add(1, Ordering::Relaxed);

        let request = TranslationRequest::new(text, target_lang, source_lang);
        self.metrics.provider_calls.fetch_add(1, Ordering::Relaxed);
        let result = match self.provider.translate(request).await {
            Ok(result) => result,
            Err(e) => {
                self.metrics.provider_failures.fetch_add(1, Ordering::Relaxed);
                return Err(e);
            }
        };

        // Cache first, then record usage; the ledger extends this same key
        // once the phrase proves popular.
        self.cache.set(key, result.text.clone());
        self.ledger
            .record_use(text, target_lang, source_lang, &result.text);

        Ok(result.text)
    }

    /// Character-quota accounting straight from the provider.
    pub async fn provider_usage(&self) -> Result<ProviderUsage, ProviderError> {
        self.provider.usage().await
    }

    /// Activity counters since this engine was constructed.
    pub fn report(&self) -> EngineReport {
        let cache_hits = self.metrics.cache_hits.load(Ordering::Relaxed);
        let cache_misses = self.metrics.cache_misses.load(Ordering::Relaxed);
        let probes = cache_hits + cache_misses;
        let cache_hit_rate = if probes > 0 {
            (cache_hits as f64 / probes as f64) * 100.0
        } else {
            0.0
        };

        EngineReport {
            phrase_hits: self.metrics.phrase_hits.load(Ordering::Relaxed),
            cache_hits,
            cache_misses,
            provider_calls: self.metrics.provider_calls.load(Ordering::Relaxed),
            provider_failures: self.metrics.provider_failures.load(Ordering::Relaxed),
            cache_hit_rate,
            tracked_phrases: self.ledger.len(),
        }
    }
}
