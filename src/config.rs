use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Translation provider
    pub provider_api_key: String,
    pub provider_api_url: String,

    // Persistent key/value store (absent = memory-only mode)
    pub store_url: Option<String>,
    pub store_token: Option<String>,

    // Detection
    pub fallback_language: String,

    // Caching
    pub translation_cache_capacity: usize,
    pub translation_cache_ttl_secs: u64,
    pub archive_cache_capacity: usize,
    pub archive_ttl_secs: u64,

    // Promotion
    pub promotion_threshold: u64,
    pub promotion_ttl_secs: u64,

    // Channel sampling
    pub channel_sample_size: usize,
    pub sample_min_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Translation provider (DeepL-compatible API)
            provider_api_key: std::env::var("DEEPL_API_KEY").context("DEEPL_API_KEY not set")?,
            provider_api_url: std::env::var("DEEPL_API_URL")
                .unwrap_or_else(|_| "https://api-free.deepl.com/v2".to_string()),

            // Persistent store; either variable missing means memory-only
            store_url: std::env::var("KV_STORE_URL").ok(),
            store_token: std::env::var("KV_STORE_TOKEN").ok(),

            // Detection
            fallback_language: std::env::var("FALLBACK_LANGUAGE")
                .unwrap_or_else(|_| "en".to_string()),

            // Caching
            translation_cache_capacity: std::env::var("TRANSLATION_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            translation_cache_ttl_secs: std::env::var("TRANSLATION_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            archive_cache_capacity: std::env::var("ARCHIVE_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5_000),
            archive_ttl_secs: std::env::var("ARCHIVE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7 * 24 * 3600),

            // Promotion
            promotion_threshold: std::env::var("PROMOTION_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            promotion_ttl_secs: std::env::var("PROMOTION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24 * 3600),

            // Channel sampling
            channel_sample_size: std::env::var("CHANNEL_SAMPLE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            sample_min_chars: std::env::var("SAMPLE_MIN_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }

    pub fn translation_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.translation_cache_ttl_secs)
    }

    pub fn archive_ttl(&self) -> Duration {
        Duration::from_secs(self.archive_ttl_secs)
    }

    pub fn promotion_ttl(&self) -> Duration {
        Duration::from_secs(self.promotion_ttl_secs)
    }

    /// Whether a persistent store is configured (both URL and token present).
    pub fn has_store(&self) -> bool {
        self.store_url.is_some() && self.store_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "DEEPL_API_KEY",
            "DEEPL_API_URL",
            "KV_STORE_URL",
            "KV_STORE_TOKEN",
            "FALLBACK_LANGUAGE",
            "TRANSLATION_CACHE_CAPACITY",
            "TRANSLATION_CACHE_TTL_SECS",
            "ARCHIVE_CACHE_CAPACITY",
            "ARCHIVE_TTL_SECS",
            "PROMOTION_THRESHOLD",
            "PROMOTION_TTL_SECS",
            "CHANNEL_SAMPLE_SIZE",
            "SAMPLE_MIN_CHARS",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_requires_api_key() {
        clear_env();
        let result = Config::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("DEEPL_API_KEY"));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        std::env::set_var("DEEPL_API_KEY", "test-key");

        let config = Config::from_env().expect("Should succeed");

        assert_eq!(config.provider_api_url, "https://api-free.deepl.com/v2");
        assert_eq!(config.store_url, None);
        assert_eq!(config.fallback_language, "en");
        assert_eq!(config.translation_cache_capacity, 10_000);
        assert_eq!(config.translation_cache_ttl_secs, 3600);
        assert_eq!(config.archive_cache_capacity, 5_000);
        assert_eq!(config.archive_ttl_secs, 604_800);
        assert_eq!(config.promotion_threshold, 3);
        assert_eq!(config.promotion_ttl_secs, 86_400);
        assert_eq!(config.channel_sample_size, 3);
        assert_eq!(config.sample_min_chars, 10);
        assert!(!config.has_store());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("DEEPL_API_KEY", "test-key");
        std::env::set_var("DEEPL_API_URL", "http://localhost:9000/v2");
        std::env::set_var("KV_STORE_URL", "http://localhost:9001");
        std::env::set_var("KV_STORE_TOKEN", "store-token");
        std::env::set_var("FALLBACK_LANGUAGE", "es");
        std::env::set_var("TRANSLATION_CACHE_CAPACITY", "50");
        std::env::set_var("PROMOTION_THRESHOLD", "5");

        let config = Config::from_env().expect("Should succeed");

        assert_eq!(config.provider_api_url, "http://localhost:9000/v2");
        assert!(config.has_store());
        assert_eq!(config.fallback_language, "es");
        assert_eq!(config.translation_cache_capacity, 50);
        assert_eq!(config.promotion_threshold, 5);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unparsable_numeric_falls_back_to_default() {
        clear_env();
        std::env::set_var("DEEPL_API_KEY", "test-key");
        std::env::set_var("TRANSLATION_CACHE_CAPACITY", "not-a-number");

        let config = Config::from_env().expect("Should succeed");
        assert_eq!(config.translation_cache_capacity, 10_000);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_store_requires_both_url_and_token() {
        clear_env();
        std::env::set_var("DEEPL_API_KEY", "test-key");
        std::env::set_var("KV_STORE_URL", "http://localhost:9001");

        let config = Config::from_env().expect("Should succeed");
        assert!(!config.has_store());

        clear_env();
    }

    #[test]
    fn test_duration_accessors() {
        let config = Config {
            provider_api_key: "k".to_string(),
            provider_api_url: "http://localhost".to_string(),
            store_url: None,
            store_token: None,
            fallback_language: "en".to_string(),
            translation_cache_capacity: 10,
            translation_cache_ttl_secs: 60,
            archive_cache_capacity: 10,
            archive_ttl_secs: 120,
            promotion_threshold: 3,
            promotion_ttl_secs: 180,
            channel_sample_size: 3,
            sample_min_chars: 10,
        };

        assert_eq!(config.translation_cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.archive_ttl(), Duration::from_secs(120));
        assert_eq!(config.promotion_ttl(), Duration::from_secs(180));
    }
}
