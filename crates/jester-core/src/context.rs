//! Caller-owned conversation context.
//!
//! The calling platform stores whatever object we return and replays it on the
//! next turn. Nothing is kept server-side, so this is the only place dialogue
//! state lives.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::language::SupportedLanguage;

/// Flag recording that the last reply asked the user to pick a language.
pub const AWAITING_LANG_KEY: &str = "awaiting_lang";
/// Language the joke was actually served in.
pub const LANG_USED_KEY: &str = "lang_used";
/// The hint exactly as it arrived.
pub const LANG_RAW_KEY: &str = "lang_raw";
/// Truncated echo of the user's utterance.
pub const USER_TEXT_KEY: &str = "user_text";
/// Message of an unexpected failure.
pub const ERROR_KEY: &str = "error";

/// Where the dialogue stands between two turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogueState {
    /// Nothing pending; the next turn asks for a language.
    #[default]
    Idle,
    /// A language prompt is outstanding; the next utterance is the answer.
    AwaitingLanguage,
}

/// Opaque key/value context echoed back to the platform every turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationContext(Map<String, Value>);

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from whatever the platform sent. Anything but an object is dropped.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Object(map)) => Self(map.clone()),
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Read the dialogue state from the awaiting flag.
    ///
    /// Platforms that stringify context values send `"true"`, so that and `"1"`
    /// count as set. Absence or any other value is `Idle`.
    pub fn state(&self) -> DialogueState {
        let awaiting = match self.0.get(AWAITING_LANG_KEY) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => matches!(s.trim(), "true" | "1"),
            _ => false,
        };
        if awaiting {
            DialogueState::AwaitingLanguage
        } else {
            DialogueState::Idle
        }
    }

    pub fn set_state(&mut self, state: DialogueState) {
        self.insert(
            AWAITING_LANG_KEY,
            state == DialogueState::AwaitingLanguage,
        );
    }

    pub fn set_lang_used(&mut self, lang: SupportedLanguage) {
        self.insert(LANG_USED_KEY, lang.code());
    }

    pub fn set_lang_raw(&mut self, raw: &str) {
        self.insert(LANG_RAW_KEY, raw);
    }

    /// Echo the utterance, cut to at most `limit` characters.
    pub fn set_user_text(&mut self, text: &str, limit: usize) {
        self.insert(USER_TEXT_KEY, truncate_chars(text, limit));
    }

    pub fn set_error(&mut self, message: &str) {
        self.insert(ERROR_KEY, message);
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Keep at most `limit` characters without splitting a code point.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
