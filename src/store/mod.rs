//! Optional persistent key/value store.
//!
//! Language preferences and original-message archives survive restarts only
//! when a store is configured; everything also lives in process memory, so a
//! missing or failing store degrades the engine to memory-only semantics.
//! The capability is selected once at construction: components hold an
//! `Option<Arc<dyn KeyValueStore>>` and the absent case simply skips the
//! shadow reads and writes.
//!
//! Store failures are never surfaced to the end user. Call sites log them as
//! degradation events and carry on.

pub mod archive;
pub mod prefs;

pub use archive::{MessageArchive, OriginalMessageRecord};
pub use prefs::PreferenceStore;

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::StoreError;

/// Durable key/value capability. Any call may fail; callers catch and
/// continue in memory-only mode.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), StoreError>;
}

/// REST-backed store client (Upstash-style HTTP key/value API).
///
/// Wire format: `GET {base}/get/{key}`, `POST {base}/set/{key}` and
/// `POST {base}/setex/{key}/{ttl}` with the value as the request body;
/// responses wrap the payload in `{"result": ...}` with `null` for a missing
/// key. Bearer-token auth.
pub struct RestKvStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

#[derive(Deserialize)]
struct StoreResponse {
    result: Option<String>,
}

impl RestKvStore {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(StoreError::Api { status, body })
        }
    }
}

#[async_trait]
impl KeyValueStore for RestKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let response = self
            .client
            .get(format!("{}/get/{}", self.base_url, key))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let payload: StoreResponse = response
            .json()
            .await
            .map_err(|e| StoreError::MalformedResponse(e.to_string()))?;
        Ok(payload.result)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .post(format!("{}/set/{}", self.base_url, key))
            .bearer_auth(&self.token)
            .body(value.to_string())
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .post(format!("{}/setex/{}/{}", self.base_url, key, ttl_seconds))
            .bearer_auth(&self.token)
            .body(value.to_string())
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// In-memory store used in tests and store-less local development.
///
/// Expiry is accepted but not enforced; the archive and preference layers
/// apply their own lifetimes on top.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        _ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        self.set(key, value).await
    }
}
