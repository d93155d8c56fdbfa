//! Reply texts.

use jester_core::{
    context::truncate_chars,
    language::SupportedLanguage,
    message::{ReplyOption, ResponseMessage},
};

/// Question shown with the language buttons.
pub const LANGUAGE_QUESTION: &str = "Which language would you like your joke in?";

/// Sent when the joke service fails; always English.
pub const FALLBACK_APOLOGY: &str =
    "Sorry, I couldn't fetch a joke in that language right now. Please try again later.";

/// Sent when handling the request itself failed.
pub const INTERNAL_APOLOGY: &str = "Sorry, couldn't fetch a joke. Try again.";

/// Longest rejected answer quoted back in a re-prompt.
const QUOTE_LIMIT: usize = 80;

/// One button per supported language; the button sends back the code.
pub fn language_options() -> Vec<ReplyOption> {
    SupportedLanguage::ALL
        .iter()
        .map(|lang| ReplyOption {
            label: lang.native_name().to_string(),
            text: lang.code().to_string(),
        })
        .collect()
}

/// The language prompt, quoting `rejected` when the last answer did not resolve.
pub fn language_prompt(rejected: Option<&str>) -> ResponseMessage {
    let mut texts = Vec::with_capacity(2);
    match rejected.map(str::trim) {
        Some("") => texts.push("I didn't catch a language there.".to_string()),
        Some(raw) => texts.push(format!(
            "Sorry, \"{}\" isn't a language I can tell jokes in.",
            truncate_chars(raw, QUOTE_LIMIT)
        )),
        None => {}
    }
    texts.push(LANGUAGE_QUESTION.to_string());
    ResponseMessage::with_options(texts, language_options())
}

pub fn joke(text: &str) -> ResponseMessage {
    ResponseMessage::text(text)
}

pub fn fallback() -> ResponseMessage {
    ResponseMessage::text(FALLBACK_APOLOGY)
}

pub fn internal_failure() -> ResponseMessage {
    ResponseMessage::text(INTERNAL_APOLOGY)
}
