//! Language resolution: free-form hints to one of the six joke languages.
//!
//! A hint may be a code (`de`), a tagged code (`pt_BR`), an English or native
//! name with or without diacritics (`Español`, `espanol`), or unrelated text.
//! Only the first three resolve. Free text is never guessed at.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A language the joke service can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportedLanguage {
    #[serde(rename = "cs")]
    Czech,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "pt")]
    Portuguese,
}

impl SupportedLanguage {
    /// Every supported language, in the order the selection prompt lists them.
    pub const ALL: [SupportedLanguage; 6] = [
        Self::Czech,
        Self::German,
        Self::English,
        Self::Spanish,
        Self::French,
        Self::Portuguese,
    ];

    /// Two-letter code understood by the joke service.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Czech => "cs",
            Self::German => "de",
            Self::English => "en",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::Portuguese => "pt",
        }
    }

    pub fn english_name(&self) -> &'static str {
        match self {
            Self::Czech => "Czech",
            Self::German => "German",
            Self::English => "English",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::Portuguese => "Portuguese",
        }
    }

    /// Name of the language in the language itself; used as the prompt label.
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::Czech => "Čeština",
            Self::German => "Deutsch",
            Self::English => "English",
            Self::Spanish => "Español",
            Self::French => "Français",
            Self::Portuguese => "Português",
        }
    }

    /// Lower-cased spellings that resolve to this language, code included.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Czech => &["cs", "czech", "čeština", "cestina"],
            Self::German => &["de", "german", "deutsch"],
            Self::English => &["en", "english", "anglais"],
            Self::Spanish => &["es", "spanish", "español", "espanol"],
            Self::French => &["fr", "french", "français", "francais"],
            Self::Portuguese => &["pt", "portuguese", "português", "portugues"],
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    fn from_alias(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.aliases().contains(&name))
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned by [`SupportedLanguage::from_str`] for anything but a bare code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language code: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for SupportedLanguage {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(&s.trim().to_lowercase()).ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Trim everything that is not a letter or digit from both ends, then lower-case.
///
/// Pasted quotes (`“”`, `«»`, `‘’`), `¿`/`¡` and `…` go with the whitespace.
/// Inner separators survive so `"de-DE"` stays splittable.
pub fn canonicalize(hint: &str) -> String {
    hint.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Resolve a hint to a supported language, or `None` when it names none.
pub fn resolve(hint: &str) -> Option<SupportedLanguage> {
    let canonical = canonicalize(hint);
    if canonical.is_empty() {
        return None;
    }

    if let Some(lang) = SupportedLanguage::from_alias(&canonical) {
        return Some(lang);
    }

    // de-DE -> de, pt_BR -> pt
    let base = canonical.split(['-', '_']).next().unwrap_or_default();
    SupportedLanguage::from_code(base)
}

/// Resolve a hint, falling back to English when it names no supported language.
pub fn resolve_or_default(hint: &str) -> SupportedLanguage {
    resolve(hint).unwrap_or(SupportedLanguage::English)
}
