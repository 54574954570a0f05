//! Translation provider boundary.
//!
//! The engine only ever talks to the provider through the
//! [`TranslationProvider`] trait; [`DeeplProvider`] is the production
//! implementation over the DeepL HTTP API. Tests substitute their own
//! implementations to count calls or fail on demand.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::error::ProviderError;
use crate::retry::{with_retry_if, RetryConfig};

/// One outbound translation request.
#[derive(Debug, Clone)]
pub struct TranslationRequest<'a> {
    pub text: &'a str,
    /// Source language code, or `None` to let the provider detect it.
    pub source_lang: Option<&'a str>,
    pub target_lang: &'a str,
    /// Keep the original formatting (line breaks, punctuation) intact.
    pub preserve_formatting: bool,
    /// Allow the provider to re-split sentences. Chat messages arrive
    /// line-oriented, so the engine always disables this.
    pub split_sentences: bool,
}

impl<'a> TranslationRequest<'a> {
    /// Request with the engine's defaults: formatting preserved,
    /// sentence-splitting disabled.
    pub fn new(text: &'a str, target_lang: &'a str, source_lang: Option<&'a str>) -> Self {
        Self {
            text,
            source_lang,
            target_lang,
            preserve_formatting: true,
            split_sentences: false,
        }
    }
}

/// A successful provider response.
#[derive(Debug, Clone)]
pub struct ProviderTranslation {
    pub text: String,
    /// Source language the provider detected, lowercased. Present whenever
    /// the request left `source_lang` unset.
    pub detected_source_lang: Option<String>,
}

/// Character-quota accounting reported by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderUsage {
    pub character_count: u64,
    pub character_limit: u64,
}

/// Capability interface for the external translation service.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(
        &self,
        request: TranslationRequest<'_>,
    ) -> Result<ProviderTranslation, ProviderError>;

    async fn usage(&self) -> Result<ProviderUsage, ProviderError>;
}

/// DeepL-backed provider client.
///
/// Transient failures (429, 5xx, transport errors) are retried with backoff
/// inside this client; anything else fails fast and propagates.
pub struct DeeplProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    retry: RetryConfig,
}

impl DeeplProvider {
    pub fn new(config: &Config) -> Self {
        Self::with_url(&config.provider_api_url, &config.provider_api_key)
    }

    pub fn with_url(api_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            retry: RetryConfig::provider_call(),
        }
    }

    /// Map an ISO 639-1 code to the provider's target-language code.
    ///
    /// Known codes get their regional form where the provider requires one;
    /// unknown codes are passed through uppercased and the provider rejects
    /// them with its own error.
    fn target_code(code: &str) -> String {
        match code.to_lowercase().as_str() {
            "en" => "EN-US".to_string(),
            "pt" => "PT-BR".to_string(),
            other => other.to_uppercase(),
        }
    }

    async fn send_translate(
        &self,
        request: &TranslationRequest<'_>,
    ) -> Result<ProviderTranslation, ProviderError> {
        let mut params = vec![
            ("text", request.text.to_string()),
            ("target_lang", Self::target_code(request.target_lang)),
            (
                "preserve_formatting",
                if request.preserve_formatting { "1" } else { "0" }.to_string(),
            ),
            (
                "split_sentences",
                if request.split_sentences { "1" } else { "0" }.to_string(),
            ),
        ];
        if let Some(source) = request.source_lang {
            params.push(("source_lang", source.to_uppercase()));
        }

        let response = self
            .client
            .post(format!("{}/translate", self.api_url))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        #[derive(Deserialize)]
        struct TranslateResponse {
            translations: Vec<Translation>,
        }

        #[derive(Deserialize)]
        struct Translation {
            text: String,
            detected_source_language: Option<String>,
        }

        let payload: TranslateResponse = response.json().await?;
        let translation = payload
            .translations
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?;

        Ok(ProviderTranslation {
            text: translation.text,
            detected_source_lang: translation
                .detected_source_language
                .map(|lang| lang.to_lowercase()),
        })
    }
}

#[async_trait]
impl TranslationProvider for DeeplProvider {
    async fn translate(
        &self,
        request: TranslationRequest<'_>,
    ) -> Result<ProviderTranslation, ProviderError> {
        with_retry_if(
            &self.retry,
            "DeepL translate",
            || self.send_translate(&request),
            ProviderError::is_retryable,
        )
        .await
    }

    async fn usage(&self) -> Result<ProviderUsage, ProviderError> {
        let response = self
            .client
            .get(format!("{}/usage", self.api_url))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        Ok(response.json().await?)
    }
}
