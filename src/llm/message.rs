use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single chat fragment. Only `content` reaches the prompt; `role` is kept
/// for logging and for callers that think in chat terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Coerce an arbitrary JSON value into a message.
    ///
    /// A mapping with a `content` key contributes that content (and its `role`,
    /// defaulting to `user`). Anything else becomes the content as a whole.
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(map) if map.contains_key("content") => {
                let role = map
                    .get("role")
                    .and_then(Value::as_str)
                    .unwrap_or("user");
                Self::new(role, value_to_text(&map["content"]))
            }
            _ => Self::user(value_to_text(value)),
        }
    }
}

/// Join message contents with newlines, in order.
pub fn build_prompt(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// String form of a JSON value: strings as-is, everything else as compact JSON.
pub(crate) fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
