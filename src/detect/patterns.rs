//! Heuristic source-language detection from lexical signatures.
//!
//! Each registered language carries a set of high-frequency function words;
//! the detector counts signature matches in the lowercased text and picks the
//! language with the highest non-zero score. Ties go to the first registered
//! language — a deterministic but arbitrary rule that callers can rely on.
//!
//! Pure and synchronous: no provider call ever happens here. An inconclusive
//! result (`None`) is what sends `LanguageDetector` to the provider.

use std::sync::OnceLock;

use regex::Regex;

use crate::languages::LanguageRegistry;

/// Compiled signature patterns, one per enabled language, in registration
/// order.
static SIGNATURES: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();

fn signatures() -> &'static [(&'static str, Regex)] {
    SIGNATURES.get_or_init(|| {
        LanguageRegistry::get()
            .list_enabled()
            .iter()
            .map(|lang| {
                let pattern = format!(r"\b(?:{})\b", lang.stop_words.join("|"));
                let regex = Regex::new(&pattern).expect("signature patterns are static and valid");
                (lang.code, regex)
            })
            .collect()
    })
}

/// Stop-word based language guesser.
pub struct PatternDetector;

impl PatternDetector {
    pub fn new() -> Self {
        Self
    }

    /// Guess the language of `text`, or `None` when no signature matches.
    pub fn detect(&self, text: &str) -> Option<&'static str> {
        let lowered = text.to_lowercase();

        let mut best: Option<(&'static str, usize)> = None;
        for (code, regex) in signatures() {
            let score = regex.find_iter(&lowered).count();
            if score == 0 {
                continue;
            }
            // Strict comparison keeps the first registered language on ties.
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((*code, score)),
            }
        }

        best.map(|(code, _)| code)
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}
