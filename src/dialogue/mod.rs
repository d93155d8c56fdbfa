//! Dialogue controller: ask for a language, then answer with a joke.
//!
//! Two states, carried in the caller's context:
//!
//! | state    | answer resolves? | next state | reply                 |
//! |----------|------------------|------------|-----------------------|
//! | idle     | -                | awaiting   | language prompt       |
//! | awaiting | yes              | idle       | joke (or apology)     |
//! | awaiting | no               | awaiting   | prompt quoting answer |
//!
//! The idle turn never resolves the utterance; it always asks first.

mod replies;

#[cfg(test)]
pub(crate) mod mock;

#[cfg(test)]
pub(crate) use replies::{FALLBACK_APOLOGY, INTERNAL_APOLOGY, LANGUAGE_QUESTION};

use jester_core::{
    config::{DialogueConfig, UnresolvedPolicy},
    context::{ConversationContext, DialogueState},
    error::JesterError,
    language::{self, SupportedLanguage},
    message::Reply,
    traits::JokeSource,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::extract::LanguageHint;

/// Everything the controller needs from one inbound request.
#[derive(Debug, Clone)]
pub struct Turn {
    pub utterance: String,
    pub hint: LanguageHint,
    pub context: ConversationContext,
}

impl Turn {
    /// The text an awaiting dialogue treats as the user's answer.
    ///
    /// The utterance is the reply to our prompt; explicit hint fields only
    /// stand in when the user sent no text at all.
    fn answer(&self) -> &str {
        if self.utterance.trim().is_empty() {
            &self.hint.raw
        } else {
            &self.utterance
        }
    }
}

/// Stateless controller shared by all requests.
pub struct Dialogue {
    source: Arc<dyn JokeSource>,
    config: DialogueConfig,
    fetch_timeout: Duration,
}

impl Dialogue {
    pub fn new(source: Arc<dyn JokeSource>, config: DialogueConfig, fetch_timeout: Duration) -> Self {
        Self {
            source,
            config,
            fetch_timeout,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Handle one turn. Never fails: every outcome is a well-formed reply.
    pub async fn handle(&self, turn: Turn) -> Reply {
        let mut context = turn.context.clone();
        context.set_user_text(&turn.utterance, self.config.user_text_limit);

        match context.state() {
            DialogueState::Idle => {
                context.set_lang_raw(&turn.hint.raw);
                if self.config.explicit_hint_shortcut && turn.hint.source.is_explicit() {
                    if let Some(lang) = language::resolve(&turn.hint.raw) {
                        info!(
                            "dialogue: explicit hint from {} resolved to {lang}, skipping prompt",
                            turn.hint.source.name()
                        );
                        return self.serve(lang, context).await;
                    }
                }
                info!("dialogue: asking for a language");
                context.set_state(DialogueState::AwaitingLanguage);
                Reply {
                    context,
                    responses: vec![replies::language_prompt(None)],
                }
            }
            DialogueState::AwaitingLanguage => {
                let answer = turn.answer();
                context.set_lang_raw(answer);
                match self.resolve(answer) {
                    Some(lang) => self.serve(lang, context).await,
                    None => {
                        warn!("dialogue: '{answer}' names no supported language, asking again");
                        context.set_state(DialogueState::AwaitingLanguage);
                        Reply {
                            context,
                            responses: vec![replies::language_prompt(Some(answer))],
                        }
                    }
                }
            }
        }
    }

    fn resolve(&self, answer: &str) -> Option<SupportedLanguage> {
        match self.config.unresolved {
            UnresolvedPolicy::Reprompt => language::resolve(answer),
            UnresolvedPolicy::DefaultEnglish => Some(language::resolve_or_default(answer)),
        }
    }

    /// Fetch a joke in `lang` and close the dialogue.
    async fn serve(&self, lang: SupportedLanguage, mut context: ConversationContext) -> Reply {
        context.set_state(DialogueState::Idle);

        let fetched = match tokio::time::timeout(self.fetch_timeout, self.source.fetch(lang)).await {
            Ok(result) => result,
            Err(_) => Err(JesterError::Timeout(self.fetch_timeout.as_secs())),
        };

        match fetched {
            Ok(joke) => {
                info!("dialogue: served {} joke in {lang}", self.source.name());
                context.set_lang_used(lang);
                Reply {
                    context,
                    responses: vec![replies::joke(&joke.text)],
                }
            }
            Err(e) => {
                warn!("dialogue: {} failed for {lang}: {e}", self.source.name());
                context.set_lang_used(SupportedLanguage::English);
                Reply {
                    context,
                    responses: vec![replies::fallback()],
                }
            }
        }
    }

    /// Reply for a request that failed before or outside the dialogue.
    pub fn internal_failure(err: &JesterError, mut context: ConversationContext) -> Reply {
        warn!("dialogue: request failed: {err}");
        context.set_state(DialogueState::Idle);
        context.set_error(&err.to_string());
        Reply {
            context,
            responses: vec![replies::internal_failure()],
        }
    }
}
