use crate::{error::JesterError, language::SupportedLanguage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A joke fetched from a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joke {
    pub text: String,
    pub lang: SupportedLanguage,
    /// Source-specific identifier, if the source has one.
    pub id: Option<u64>,
    pub category: Option<String>,
}

/// Joke source trait.
///
/// The dialogue only knows this interface. JokeAPI is the production
/// implementation; tests swap in recording mocks.
#[async_trait]
pub trait JokeSource: Send + Sync {
    /// Human-readable source name.
    fn name(&self) -> &str;

    /// Fetch one joke in `lang`.
    ///
    /// Errors cover error payloads, malformed data and transport failures.
    /// Callers bound the call with their own timeout.
    async fn fetch(&self, lang: SupportedLanguage) -> Result<Joke, JesterError>;
}
