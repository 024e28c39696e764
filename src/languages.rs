//! Static registry of the language codes the phonemizer accepts.

use serde::Serialize;

/// Registered languages, in listing order.
static LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("cs", "Czech"),
    ("cs-cz", "Czech (CZ)"),
    ("de", "German"),
    ("de-de", "German (DE)"),
    ("en", "English"),
    ("en-us", "English (US)"),
    ("es", "Spanish"),
    ("es-es", "Spanish (ES)"),
    ("fa", "Persian"),
    ("fr", "French"),
    ("fr-fr", "French (FR)"),
    ("it", "Italian"),
    ("it-it", "Italian (IT)"),
    ("lb", "Luxembourgish"),
    ("nl", "Dutch"),
    ("ru", "Russian"),
    ("ru-ru", "Russian (RU)"),
    ("sv", "Swedish"),
    ("sv-se", "Swedish (SE)"),
    ("sw", "Swahili"),
];

/// A language code known to be present in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageCode(&'static str);

impl LanguageCode {
    pub fn parse(code: &str) -> Option<Self> {
        lookup(code).map(|&(c, _)| LanguageCode(c))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageEntry {
    pub code: &'static str,
    pub name: &'static str,
}

fn lookup(code: &str) -> Option<&'static (&'static str, &'static str)> {
    LANGUAGES.iter().find(|(c, _)| *c == code)
}

pub fn is_supported(code: &str) -> bool {
    lookup(code).is_some()
}

pub fn list() -> impl Iterator<Item = LanguageEntry> {
    LANGUAGES
        .iter()
        .map(|&(code, name)| LanguageEntry { code, name })
}

/// Comma separated list of every registered code, for error messages.
pub fn supported_codes() -> String {
    LANGUAGES
        .iter()
        .map(|(code, _)| *code)
        .collect::<Vec<_>>()
        .join(", ")
}
