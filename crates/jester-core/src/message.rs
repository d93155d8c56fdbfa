use serde::{Deserialize, Serialize};

use crate::context::ConversationContext;

/// The reply returned to the calling platform for one turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reply {
    pub context: ConversationContext,
    pub responses: Vec<ResponseMessage>,
}

/// One message in a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Always `"text"`; the platform renders nothing else we send.
    #[serde(rename = "type")]
    pub kind: String,
    pub texts: Vec<String>,
    /// Quick-reply buttons. Only the language prompt carries them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ReplyOption>>,
}

/// A selectable option: `label` is shown, `text` is sent back when picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyOption {
    pub label: String,
    pub text: String,
}

impl ResponseMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            texts: vec![text.into()],
            options: None,
        }
    }

    pub fn with_options(texts: Vec<String>, options: Vec<ReplyOption>) -> Self {
        Self {
            kind: "text".to_string(),
            texts,
            options: Some(options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_text_omits_options() {
        let reply = Reply {
            context: ConversationContext::new(),
            responses: vec![ResponseMessage::text("hello")],
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(
            json,
            json!({
                "context": {},
                "responses": [{"type": "text", "texts": ["hello"]}]
            })
        );
    }

    #[test]
    fn test_options_serialize_as_label_text_pairs() {
        let msg = ResponseMessage::with_options(
            vec!["Pick one".to_string()],
            vec![ReplyOption {
                label: "Deutsch".to_string(),
                text: "de".to_string(),
            }],
        );
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["options"], json!([{"label": "Deutsch", "text": "de"}]));
        assert_eq!(json["type"], "text");
    }
}
