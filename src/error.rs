//! Error types for the translation engine.
//!
//! Only `ProviderError` ever reaches the end user, and only when it happens
//! during an explicit translation request. Detection failures resolve to a
//! fallback language inside `LanguageDetector`, and `StoreError` is caught at
//! every call site so persistent-store trouble degrades the engine to
//! memory-only behavior instead of failing the request.

use thiserror::Error;

/// Failure talking to the external translation provider.
///
/// Propagated from `TranslationEngine::translate`; callers should surface it
/// as a user-visible error rather than substituting fallback text.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (connection, TLS, timeout).
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("translation API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The provider answered 200 but the payload carried no translation.
    #[error("translation API returned no translations")]
    EmptyResponse,
}

impl ProviderError {
    /// Whether the provider client should retry this failure.
    ///
    /// Rate limits (429) and server errors (5xx) are transient; other API
    /// statuses (bad request, auth, unknown language code) are not. Transport
    /// errors are always worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Request(_) => true,
            ProviderError::Api { status, .. } => *status == 429 || *status >= 500,
            ProviderError::EmptyResponse => false,
        }
    }
}

/// Failure talking to the optional persistent key/value store.
///
/// Never surfaced to callers: every use site logs it and continues with the
/// in-memory state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The HTTP request itself failed (connection, malformed URL, drop).
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The store answered 200 with a payload we could not interpret.
    #[error("store returned a malformed response: {0}")]
    MalformedResponse(String),
}
