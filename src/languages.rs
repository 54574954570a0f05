//! Language registry: single source of truth for all supported languages.
//!
//! The registry is an ordered table initialized once behind `OnceLock`.
//! Registration order is part of the contract: pattern detection breaks score
//! ties by taking the first registered language, so reordering rows changes
//! observable behavior.

use std::sync::OnceLock;

/// Metadata for one supported language.
#[derive(Debug, Clone)]
pub struct LanguageInfo {
    /// ISO 639-1 language code (e.g., "en", "es", "fr")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Spanish")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "Español")
    pub native_name: &'static str,

    /// Whether this is the canonical language used for detect-only provider
    /// requests (only one row should be true)
    pub is_canonical: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,

    /// High-frequency function words used as the lexical signature for
    /// heuristic source-language detection. Words here should be distinctive:
    /// a word shared between two languages inflates both scores.
    pub stop_words: &'static [&'static str],
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageInfo>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Look up a language by its ISO 639-1 code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageInfo> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All enabled languages, in registration order.
    pub fn list_enabled(&self) -> Vec<&LanguageInfo> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// All languages, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &LanguageInfo> {
        self.languages.iter()
    }

    /// The canonical language, used as the target of detect-only provider
    /// requests.
    ///
    /// # Panics
    /// Panics if zero or multiple canonical languages are registered; that is
    /// a table-definition error, not a runtime condition.
    pub fn canonical(&self) -> &LanguageInfo {
        let canonical: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }

    /// Whether a language code is registered and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

/// The supported-language table.
///
/// English is registered first on purpose: it wins pattern-detection ties.
fn default_languages() -> Vec<LanguageInfo> {
    vec![
        LanguageInfo {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            enabled: true,
            stop_words: &[
                "the", "and", "is", "are", "was", "have", "this", "that", "with", "you",
            ],
        },
        LanguageInfo {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_canonical: false,
            enabled: true,
            stop_words: &[
                "el", "los", "las", "una", "que", "está", "por", "como", "pero", "muy",
            ],
        },
        LanguageInfo {
            code: "fr",
            name: "French",
            native_name: "Français",
            is_canonical: false,
            enabled: true,
            stop_words: &[
                "le", "les", "est", "une", "dans", "pour", "pas", "vous", "avec", "c'est",
            ],
        },
        LanguageInfo {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            is_canonical: false,
            enabled: true,
            stop_words: &[
                "der", "die", "das", "und", "ist", "nicht", "ich", "sie", "ein", "mit",
            ],
        },
        LanguageInfo {
            code: "it",
            name: "Italian",
            native_name: "Italiano",
            is_canonical: false,
            enabled: true,
            stop_words: &[
                "il", "gli", "sono", "che", "per", "non", "questo", "della", "anche", "più",
            ],
        },
        LanguageInfo {
            code: "pt",
            name: "Portuguese",
            native_name: "Português",
            is_canonical: false,
            enabled: true,
            stop_words: &[
                "os", "uma", "não", "com", "você", "para", "está", "mais", "isso", "são",
            ],
        },
        LanguageInfo {
            code: "nl",
            name: "Dutch",
            native_name: "Nederlands",
            is_canonical: false,
            enabled: true,
            stop_words: &[
                "de", "het", "een", "van", "niet", "ik", "dat", "zijn", "maar", "voor",
            ],
        },
        LanguageInfo {
            code: "ru",
            name: "Russian",
            native_name: "Русский",
            is_canonical: false,
            enabled: true,
            stop_words: &[
                "и", "не", "на", "что", "это", "как", "он", "она", "его", "был",
            ],
        },
    ]
}
