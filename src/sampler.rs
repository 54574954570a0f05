//! Channel language sampling.
//!
//! To pick a sensible default target language for a channel, the sampler
//! looks at a small window of recent human messages and takes the most
//! frequent detected language. The sample is bounded purely to cap provider
//! cost; results are deliberately never cached, because channel composition
//! drifts and a stale answer is worse than three cheap detections.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::warn;

use crate::detect::LanguageDetector;

/// How many recent messages to request from the history source before
/// filtering. Larger than the sample so bot chatter and reactions do not
/// starve it.
const FETCH_WINDOW: usize = 20;

/// One message from the channel history collaborator.
#[derive(Debug, Clone)]
pub struct ChannelMessage {
    pub text: String,
    pub is_bot: bool,
    pub timestamp: String,
}

/// External message-history source (the chat platform).
#[async_trait]
pub trait MessageHistory: Send + Sync {
    /// The most recent messages of a channel, newest first.
    async fn fetch_recent_messages(
        &self,
        channel_id: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<ChannelMessage>>;
}

/// Infers a channel's dominant language from a bounded sample of recent
/// messages.
pub struct ChannelLanguageSampler {
    detector: Arc<LanguageDetector>,
    history: Arc<dyn MessageHistory>,
    sample_size: usize,
    min_chars: usize,
    fallback_language: String,
}

impl ChannelLanguageSampler {
    pub fn new(
        detector: Arc<LanguageDetector>,
        history: Arc<dyn MessageHistory>,
        sample_size: usize,
        min_chars: usize,
        fallback_language: impl Into<String>,
    ) -> Self {
        Self {
            detector,
            history,
            sample_size,
            min_chars,
            fallback_language: fallback_language.into(),
        }
    }

    /// Detect the channel's dominant language.
    ///
    /// At most `sample_size` recent non-bot messages longer than `min_chars`
    /// characters are analyzed; the most frequent detected code wins, ties
    /// broken by the order languages were first observed. Returns the
    /// fallback code when no message qualifies or the history source fails.
    pub async fn sample_channel_language(&self, channel_id: &str) -> String {
        let messages = match self
            .history
            .fetch_recent_messages(channel_id, FETCH_WINDOW)
            .await
        {
            Ok(messages) => messages,
            Err(e) => {
                warn!(channel_id, "history fetch failed, using fallback: {}", e);
                return self.fallback_language.clone();
            }
        };

        let sample: Vec<&ChannelMessage> = messages
            .iter()
            .filter(|msg| !msg.is_bot && msg.text.chars().count() > self.min_chars)
            .take(self.sample_size)
            .collect();

        if sample.is_empty() {
            return self.fallback_language.clone();
        }

        let detections = join_all(
            sample
                .iter()
                .map(|msg| self.detector.detect_language(&msg.text)),
        )
        .await;

        // Count occurrences preserving first-observed order for the
        // tie-break.
        let mut tally: Vec<(String, usize)> = Vec::new();
        for code in detections {
            match tally.iter_mut().find(|(seen, _)| *seen == code) {
                Some((_, count)) => *count += 1,
                None => tally.push((code, 1)),
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (code, count) in &tally {
            match best {
                Some((_, best_count)) if *count <= best_count => {}
                _ => best = Some((code.as_str(), *count)),
            }
        }

        best.map(|(code, _)| code.to_string())
            .unwrap_or_else(|| self.fallback_language.clone())
    }
}
