//! Inbound field extraction.
//!
//! Platforms put the user's text and language in different places. Each value
//! is read from an ordered list of locations; the first one present wins, so
//! the order below is behaviour, not style.

use jester_core::context::ConversationContext;
use serde_json::Value;
use std::collections::HashMap;

use crate::dialogue::Turn;

/// A path of object keys into the request body.
type FieldPath = &'static [&'static str];

/// Where the user's latest utterance may live, in priority order.
pub const UTTERANCE_FIELDS: &[FieldPath] = &[
    &["input", "text"],
    &["text"],
    &["message"],
    &["query"],
    &["user_message"],
    &["userMessage"],
    &["payload", "text"],
    &["payload", "message"],
    &["request", "text"],
    &["request", "message"],
    &["event", "text"],
    &["event", "message"],
    &["context", "text"],
    &["context", "message"],
];

/// Where a language hint was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintSource {
    /// `?lang=` on the webhook URL.
    Query,
    /// Top-level `lang` in the body.
    Body,
    ContextLang,
    ContextLanguage,
    ContextUserLanguage,
    /// No explicit hint; the utterance stands in for one.
    Utterance,
}

impl HintSource {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Body => "body",
            Self::ContextLang => "context.lang",
            Self::ContextLanguage => "context.language",
            Self::ContextUserLanguage => "context.user.language",
            Self::Utterance => "utterance",
        }
    }

    /// Whether the hint came from a dedicated language field.
    pub fn is_explicit(&self) -> bool {
        !matches!(self, Self::Utterance)
    }
}

/// Body locations for a language hint, after the query string.
const HINT_FIELDS: &[(HintSource, FieldPath)] = &[
    (HintSource::Body, &["lang"]),
    (HintSource::ContextLang, &["context", "lang"]),
    (HintSource::ContextLanguage, &["context", "language"]),
    (HintSource::ContextUserLanguage, &["context", "user", "language"]),
];

/// A raw language hint and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageHint {
    pub raw: String,
    pub source: HintSource,
}

/// Follow `path` through nested objects.
fn lookup<'a>(body: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(body, |node, key| node.get(key))
}

/// Text of a present scalar. Null, objects and arrays count as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Object(_) | Value::Array(_) => None,
    }
}

/// First present scalar among `paths`.
fn first_present(body: &Value, paths: &[FieldPath]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| lookup(body, path).and_then(scalar_text))
}

/// The user's latest utterance, or `""` when none is present.
pub fn utterance(body: &Value) -> String {
    first_present(body, UTTERANCE_FIELDS).unwrap_or_default()
}

/// The language hint: query string, then body fields, then the utterance.
pub fn language_hint(query: &HashMap<String, String>, body: &Value, utterance: &str) -> LanguageHint {
    if let Some(lang) = query.get("lang") {
        return LanguageHint {
            raw: lang.clone(),
            source: HintSource::Query,
        };
    }

    HINT_FIELDS
        .iter()
        .find_map(|(source, path)| {
            lookup(body, path).and_then(scalar_text).map(|raw| LanguageHint {
                raw,
                source: *source,
            })
        })
        .unwrap_or_else(|| LanguageHint {
            raw: utterance.to_string(),
            source: HintSource::Utterance,
        })
}

/// Assemble one dialogue turn from a webhook request.
pub fn parse_turn(query: &HashMap<String, String>, body: &Value) -> Turn {
    let utterance = utterance(body);
    let hint = language_hint(query, body, &utterance);
    let context = ConversationContext::from_value(body.get("context"));
    Turn {
        utterance,
        hint,
        context,
    }
}
