//! Source-language detection: cached, heuristic-first, provider-last.
//!
//! Detection is best-effort and must never fail a request: the provider is
//! consulted only when the stop-word heuristic is inconclusive, and a
//! provider failure resolves to the configured fallback language instead of
//! an error.

pub mod patterns;

pub use patterns::PatternDetector;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{CacheKey, TranslationCache};
use crate::languages::LanguageRegistry;
use crate::provider::{TranslationProvider, TranslationRequest};

/// Orchestrates fast-path (pattern) vs. authoritative (provider) detection,
/// with results cached in the shared translation cache under a `detect:`
/// namespace.
pub struct LanguageDetector {
    patterns: PatternDetector,
    cache: Arc<TranslationCache>,
    provider: Arc<dyn TranslationProvider>,
    fallback_language: String,
}

impl LanguageDetector {
    pub fn new(
        cache: Arc<TranslationCache>,
        provider: Arc<dyn TranslationProvider>,
        fallback_language: impl Into<String>,
    ) -> Self {
        Self {
            patterns: PatternDetector::new(),
            cache,
            provider,
            fallback_language: fallback_language.into(),
        }
    }

    /// Detect the language of `text`, returning a lowercased 2-letter code.
    ///
    /// Resolution order: cached result, stop-word heuristic (no provider
    /// call), then a detect-only provider request. Provider trouble at the
    /// last step is swallowed and the fallback code returned.
    pub async fn detect_language(&self, text: &str) -> String {
        let key = CacheKey::detection(text);

        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        if let Some(code) = self.patterns.detect(text) {
            debug!(code, "language detected from lexical signature");
            self.cache.set(key, code);
            return code.to_string();
        }

        // Detect-only provider request: translate toward the canonical
        // language with no source set and read back what it detected.
        let canonical = LanguageRegistry::get().canonical().code;
        let request = TranslationRequest::new(text, canonical, None);

        match self.provider.translate(request).await {
            Ok(result) => match result.detected_source_lang {
                Some(lang) => {
                    let lang = lang.to_lowercase();
                    self.cache.set(key, lang.clone());
                    lang
                }
                None => {
                    warn!("provider reported no source language, using fallback");
                    self.fallback_language.clone()
                }
            },
            Err(e) => {
                warn!("language detection failed, using fallback: {}", e);
                self.fallback_language.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::provider::{ProviderTranslation, ProviderUsage};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Provider stub that reports a fixed detection result and counts calls.
    struct StubProvider {
        detected: Option<&'static str>,
        fail: bool,
        calls: AtomicU32,
    }

    impl StubProvider {
        fn detecting(code: &'static str) -> Self {
            Self {
                detected: Some(code),
                fail: false,
                calls: AtomicU32::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                detected: None,
                fail: true,
                calls: AtomicU32::new(0),
            }
        }

        fn without_detection() -> Self {
            Self {
                detected: None,
                fail: false,
                calls: AtomicU32::new(0),
            }
        }

        fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationProvider for StubProvider {
        async fn translate(
            &self,
            _request: TranslationRequest<'_>,
        ) -> Result<ProviderTranslation, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ProviderError::Api {
                    status: 503,
                    body: "unavailable".to_string(),
                });
            }
            Ok(ProviderTranslation {
                text: "translated".to_string(),
                detected_source_lang: self.detected.map(|code| code.to_string()),
            })
        }

        async fn usage(&self) -> Result<ProviderUsage, ProviderError> {
            Ok(ProviderUsage {
                character_count: 0,
                character_limit: 500_000,
            })
        }
    }

    fn detector_with(provider: Arc<StubProvider>) -> LanguageDetector {
        let cache = Arc::new(TranslationCache::new(100, Duration::from_secs(3600)));
        LanguageDetector::new(cache, provider, "en")
    }

    #[tokio::test]
    async fn test_pattern_hit_skips_provider() {
        let provider = Arc::new(StubProvider::detecting("ja"));
        let detector = detector_with(provider.clone());

        let code = detector.detect_language("the and is are").await;

        assert_eq!(code, "en");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_pattern_result_is_cached() {
        let provider = Arc::new(StubProvider::detecting("ja"));
        let cache = Arc::new(TranslationCache::new(100, Duration::from_secs(3600)));
        let detector = LanguageDetector::new(cache.clone(), provider, "en");

        detector.detect_language("the and is are").await;

        let key = CacheKey::detection("the and is are");
        assert_eq!(cache.get(&key), Some("en".to_string()));
    }

    #[tokio::test]
    async fn test_cached_result_wins() {
        let provider = Arc::new(StubProvider::detecting("ja"));
        let cache = Arc::new(TranslationCache::new(100, Duration::from_secs(3600)));
        let detector = LanguageDetector::new(cache.clone(), provider.clone(), "en");

        // Seed a cached detection that disagrees with everything else.
        cache.set(CacheKey::detection("the and is are"), "fr");

        let code = detector.detect_language("the and is are").await;

        assert_eq!(code, "fr");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_inconclusive_pattern_falls_through_to_provider() {
        let provider = Arc::new(StubProvider::detecting("JA"));
        let detector = detector_with(provider.clone());

        let code = detector.detect_language("xyzzy plugh 42").await;

        // Lowercased even when the provider reports uppercase.
        assert_eq!(code, "ja");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_provider_result_is_cached() {
        let provider = Arc::new(StubProvider::detecting("ja"));
        let detector = detector_with(provider.clone());

        detector.detect_language("xyzzy plugh 42").await;
        detector.detect_language("xyzzy plugh 42").await;

        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_resolves_to_fallback() {
        let provider = Arc::new(StubProvider::failing());
        let detector = detector_with(provider.clone());

        let code = detector.detect_language("xyzzy plugh 42").await;

        assert_eq!(code, "en");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fallback_is_not_cached() {
        let provider = Arc::new(StubProvider::failing());
        let detector = detector_with(provider.clone());

        detector.detect_language("xyzzy plugh 42").await;
        detector.detect_language("xyzzy plugh 42").await;

        // A failed detection is retried next time, not pinned in the cache.
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_detection_resolves_to_fallback() {
        let provider = Arc::new(StubProvider::without_detection());
        let detector = detector_with(provider.clone());

        let code = detector.detect_language("xyzzy plugh 42").await;

        assert_eq!(code, "en");
    }
}
