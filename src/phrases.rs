//! Static phrase table: common short expressions and their translations.
//!
//! The table is consulted before any cache or provider work. A hit costs
//! nothing and never counts against the provider quota, so the entries skew
//! toward the short conversational phrases chat channels repeat constantly.
//!
//! Keys are stored in normal form (lowercased, trimmed); callers are expected
//! to pass text through [`normalize`] first.

/// Lowercase and trim text into the form used for phrase lookup and usage
/// tracking.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// One phrase and its translations, keyed by language code.
struct PhraseRow {
    phrase: &'static str,
    by_language: &'static [(&'static str, &'static str)],
}

/// Static mapping of known short phrases across the supported language set.
///
/// Immutable after startup; lookups are pure.
pub struct PhraseTable {
    rows: &'static [PhraseRow],
}

impl PhraseTable {
    pub fn new() -> Self {
        Self { rows: PHRASES }
    }

    /// Look up a translation for an already-normalized phrase.
    ///
    /// Returns `None` (not an error) for any unmapped phrase or unmapped
    /// target language column.
    pub fn lookup(&self, normalized_text: &str, target_lang: &str) -> Option<&'static str> {
        let row = self.rows.iter().find(|row| row.phrase == normalized_text)?;
        row.by_language
            .iter()
            .find(|(lang, _)| *lang == target_lang)
            .map(|(_, translation)| *translation)
    }

    /// Number of phrases in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for PhraseTable {
    fn default() -> Self {
        Self::new()
    }
}

const PHRASES: &[PhraseRow] = &[
    PhraseRow {
        phrase: "hello",
        by_language: &[
            ("en", "hello"),
            ("es", "hola"),
            ("fr", "bonjour"),
            ("de", "hallo"),
            ("it", "ciao"),
            ("pt", "olá"),
            ("nl", "hallo"),
            ("ru", "привет"),
        ],
    },
    PhraseRow {
        phrase: "hi",
        by_language: &[
            ("en", "hi"),
            ("es", "hola"),
            ("fr", "salut"),
            ("de", "hi"),
            ("it", "ciao"),
            ("pt", "oi"),
            ("nl", "hoi"),
            ("ru", "привет"),
        ],
    },
    PhraseRow {
        phrase: "goodbye",
        by_language: &[
            ("en", "goodbye"),
            ("es", "adiós"),
            ("fr", "au revoir"),
            ("de", "auf wiedersehen"),
            ("it", "arrivederci"),
            ("pt", "adeus"),
            ("nl", "tot ziens"),
            ("ru", "до свидания"),
        ],
    },
    PhraseRow {
        phrase: "thank you",
        by_language: &[
            ("en", "thank you"),
            ("es", "gracias"),
            ("fr", "merci"),
            ("de", "danke"),
            ("it", "grazie"),
            ("pt", "obrigado"),
            ("nl", "dank je"),
            ("ru", "спасибо"),
        ],
    },
    PhraseRow {
        phrase: "thanks",
        by_language: &[
            ("en", "thanks"),
            ("es", "gracias"),
            ("fr", "merci"),
            ("de", "danke"),
            ("it", "grazie"),
            ("pt", "obrigado"),
            ("nl", "bedankt"),
            ("ru", "спасибо"),
        ],
    },
    PhraseRow {
        phrase: "please",
        by_language: &[
            ("en", "please"),
            ("es", "por favor"),
            ("fr", "s'il vous plaît"),
            ("de", "bitte"),
            ("it", "per favore"),
            ("pt", "por favor"),
            ("nl", "alsjeblieft"),
            ("ru", "пожалуйста"),
        ],
    },
    PhraseRow {
        phrase: "yes",
        by_language: &[
            ("en", "yes"),
            ("es", "sí"),
            ("fr", "oui"),
            ("de", "ja"),
            ("it", "sì"),
            ("pt", "sim"),
            ("nl", "ja"),
            ("ru", "да"),
        ],
    },
    PhraseRow {
        phrase: "no",
        by_language: &[
            ("en", "no"),
            ("es", "no"),
            ("fr", "non"),
            ("de", "nein"),
            ("it", "no"),
            ("pt", "não"),
            ("nl", "nee"),
            ("ru", "нет"),
        ],
    },
    PhraseRow {
        phrase: "good morning",
        by_language: &[
            ("en", "good morning"),
            ("es", "buenos días"),
            ("fr", "bonjour"),
            ("de", "guten morgen"),
            ("it", "buongiorno"),
            ("pt", "bom dia"),
            ("nl", "goedemorgen"),
            ("ru", "доброе утро"),
        ],
    },
    PhraseRow {
        phrase: "good night",
        by_language: &[
            ("en", "good night"),
            ("es", "buenas noches"),
            ("fr", "bonne nuit"),
            ("de", "gute nacht"),
            ("it", "buonanotte"),
            ("pt", "boa noite"),
            ("nl", "goedenacht"),
            ("ru", "спокойной ночи"),
        ],
    },
    PhraseRow {
        phrase: "how are you",
        by_language: &[
            ("en", "how are you"),
            ("es", "¿cómo estás?"),
            ("fr", "comment ça va ?"),
            ("de", "wie geht's?"),
            ("it", "come stai?"),
            ("pt", "como vai?"),
            ("nl", "hoe gaat het?"),
            ("ru", "как дела?"),
        ],
    },
    PhraseRow {
        phrase: "welcome",
        by_language: &[
            ("en", "welcome"),
            ("es", "bienvenido"),
            ("fr", "bienvenue"),
            ("de", "willkommen"),
            ("it", "benvenuto"),
            ("pt", "bem-vindo"),
            ("nl", "welkom"),
            ("ru", "добро пожаловать"),
        ],
    },
    PhraseRow {
        phrase: "sorry",
        by_language: &[
            ("en", "sorry"),
            ("es", "lo siento"),
            ("fr", "désolé"),
            ("de", "entschuldigung"),
            ("it", "scusa"),
            ("pt", "desculpa"),
            ("nl", "sorry"),
            ("ru", "извините"),
        ],
    },
    PhraseRow {
        phrase: "ok",
        by_language: &[
            ("en", "ok"),
            ("es", "vale"),
            ("fr", "d'accord"),
            ("de", "okay"),
            ("it", "va bene"),
            ("pt", "tá bom"),
            ("nl", "oké"),
            ("ru", "хорошо"),
        ],
    },
];
