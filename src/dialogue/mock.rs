//! Recording joke source for controller and API tests.

use async_trait::async_trait;
use jester_core::{
    error::JesterError,
    language::SupportedLanguage,
    traits::{Joke, JokeSource},
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How the mock answers `fetch()`.
#[derive(Clone)]
pub(crate) enum Behavior {
    /// Return a joke whose text names the requested language.
    Joke,
    /// Return an upstream error.
    Fail,
    /// Sleep before answering, to trip the caller's timeout.
    Slow(Duration),
    Panic,
}

pub(crate) struct MockSource {
    behavior: Behavior,
    calls: Arc<Mutex<Vec<SupportedLanguage>>>,
}

impl MockSource {
    /// A mock plus a handle to the languages it was asked for.
    pub(crate) fn new(behavior: Behavior) -> (Self, Arc<Mutex<Vec<SupportedLanguage>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                behavior,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

/// Text the mock returns for `lang`.
pub(crate) fn joke_text(lang: SupportedLanguage) -> String {
    format!("a {} joke", lang.english_name())
}

#[async_trait]
impl JokeSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, lang: SupportedLanguage) -> Result<Joke, JesterError> {
        self.calls.lock().unwrap().push(lang);
        match &self.behavior {
            Behavior::Joke => {}
            Behavior::Fail => {
                return Err(JesterError::Upstream(
                    "jokeapi: No matching joke found".to_string(),
                ))
            }
            Behavior::Slow(delay) => tokio::time::sleep(*delay).await,
            Behavior::Panic => panic!("mock source exploded"),
        }
        Ok(Joke {
            text: joke_text(lang),
            lang,
            id: Some(1),
            category: None,
        })
    }
}
