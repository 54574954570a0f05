//! User and channel language preferences.
//!
//! The in-memory maps are authoritative for the process lifetime; the
//! persistent store is a shadow that seeds memory lazily on a cold start and
//! receives write-through copies on update. Store trouble on either path is
//! logged and otherwise invisible.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::warn;

use super::KeyValueStore;

/// Layered preference storage for per-user and per-channel language codes.
pub struct PreferenceStore {
    users: Mutex<HashMap<String, String>>,
    channels: Mutex<HashMap<String, String>>,
    store: Option<Arc<dyn KeyValueStore>>,
}

impl PreferenceStore {
    pub fn new(store: Option<Arc<dyn KeyValueStore>>) -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            channels: Mutex::new(HashMap::new()),
            store,
        }
    }

    fn user_key(user_id: &str) -> String {
        format!("lang:user:{}", user_id)
    }

    fn channel_key(channel_id: &str) -> String {
        format!("lang:channel:{}", channel_id)
    }

    /// Preferred language for a user, if one was ever set.
    pub async fn user_language(&self, user_id: &str) -> Option<String> {
        if let Some(code) = self.users.lock().unwrap().get(user_id).cloned() {
            return Some(code);
        }
        let code = self.load_from_store(&Self::user_key(user_id)).await?;
        self.users
            .lock()
            .unwrap()
            .insert(user_id.to_string(), code.clone());
        Some(code)
    }

    /// Set a user's preferred language, shadow-writing to the store.
    pub async fn set_user_language(&self, user_id: &str, code: &str) {
        self.users
            .lock()
            .unwrap()
            .insert(user_id.to_string(), code.to_string());
        self.write_to_store(&Self::user_key(user_id), code).await;
    }

    /// Preferred language for a channel, if one was ever set.
    pub async fn channel_language(&self, channel_id: &str) -> Option<String> {
        if let Some(code) = self.channels.lock().unwrap().get(channel_id).cloned() {
            return Some(code);
        }
        let code = self.load_from_store(&Self::channel_key(channel_id)).await?;
        self.channels
            .lock()
            .unwrap()
            .insert(channel_id.to_string(), code.clone());
        Some(code)
    }

    /// Set a channel's language, shadow-writing to the store.
    pub async fn set_channel_language(&self, channel_id: &str, code: &str) {
        self.channels
            .lock()
            .unwrap()
            .insert(channel_id.to_string(), code.to_string());
        self.write_to_store(&Self::channel_key(channel_id), code)
            .await;
    }

    async fn load_from_store(&self, key: &str) -> Option<String> {
        let store = self.store.as_ref()?;
        match store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("preference read degraded to memory-only: {}", e);
                None
            }
        }
    }

    async fn write_to_store(&self, key: &str, value: &str) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        if let Err(e) = store.set(key, value).await {
            warn!("preference write degraded to memory-only: {}", e);
        }
    }
}
