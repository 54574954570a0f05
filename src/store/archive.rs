//! Archive of pre-translation message originals.
//!
//! When a channel message is translated in place, the original text would be
//! lost; this archive keeps it addressable by (channel, message timestamp) so
//! a "show original" action can reconstruct it. Records live in a bounded
//! 7-day cache and are shadow-written to the persistent store with the same
//! expiry when one is configured.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::KeyValueStore;
use crate::cache::{CacheKey, TranslationCache};

/// One archived original, serialized to JSON for the persistent store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginalMessageRecord {
    pub channel_id: String,
    pub message_ts: String,
    pub original_text: String,
    pub source_lang: String,
    pub translated_text: String,
    pub target_lang: String,
    pub archived_at: DateTime<Utc>,
}

/// Bounded archive with optional persistent shadow.
pub struct MessageArchive {
    cache: TranslationCache,
    ttl: Duration,
    store: Option<Arc<dyn KeyValueStore>>,
}

impl MessageArchive {
    pub fn new(capacity: usize, ttl: Duration, store: Option<Arc<dyn KeyValueStore>>) -> Self {
        Self {
            cache: TranslationCache::new(capacity, ttl),
            ttl,
            store,
        }
    }

    fn record_key(channel_id: &str, message_ts: &str) -> String {
        format!("orig:{}:{}", channel_id, message_ts)
    }

    /// Archive a record in memory and, when configured, in the store.
    pub async fn archive(&self, record: &OriginalMessageRecord) {
        let key = Self::record_key(&record.channel_id, &record.message_ts);
        let json = match serde_json::to_string(record) {
            Ok(json) => json,
            Err(e) => {
                // Serialization of a plain struct does not fail in practice.
                warn!("failed to serialize archive record: {}", e);
                return;
            }
        };

        self.cache.set(CacheKey::raw(key.clone()), json.clone());

        if let Some(store) = self.store.as_ref() {
            if let Err(e) = store
                .set_with_expiry(&key, &json, self.ttl.as_secs())
                .await
            {
                warn!("archive write degraded to memory-only: {}", e);
            }
        }
    }

    /// Fetch an archived original, consulting memory first and then the
    /// store. Malformed persisted records are treated as absent.
    pub async fn original(
        &self,
        channel_id: &str,
        message_ts: &str,
    ) -> Option<OriginalMessageRecord> {
        let key = Self::record_key(channel_id, message_ts);
        let cache_key = CacheKey::raw(key.clone());

        if let Some(json) = self.cache.get(&cache_key) {
            return Self::parse(&json);
        }

        let store = self.store.as_ref()?;
        let json = match store.get(&key).await {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                warn!("archive read degraded to memory-only: {}", e);
                return None;
            }
        };

        let record = Self::parse(&json)?;
        // Backfill memory so the next lookup skips the store.
        self.cache.set(cache_key, json);
        Some(record)
    }

    fn parse(json: &str) -> Option<OriginalMessageRecord> {
        match serde_json::from_str(json) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("discarding malformed archive record: {}", e);
                None
            }
        }
    }

    /// Number of records currently held in memory.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
