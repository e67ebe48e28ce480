use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::message::value_to_text;

/// Payload posted to the model endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub model_name: String,
    pub prompt: String,
}

/// What happened to a single model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// The server answered 200.
    Success { text: String, raw: String },
    /// The server answered with any other status.
    HttpError { status: u16, text: String, raw: String },
    /// No response was obtained.
    TransportError { message: String },
}

impl Invocation {
    /// Classify a completed exchange and derive the display text from its body.
    pub fn from_response(status: u16, raw: String) -> Self {
        if status == 200 {
            Invocation::Success {
                text: success_text(&raw),
                raw,
            }
        } else {
            Invocation::HttpError {
                status,
                text: failure_text(&raw),
                raw,
            }
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Invocation::TransportError {
            message: message.into(),
        }
    }
}

/// Flat record handed to the presentation layer.
///
/// `status_code` is `None` only for transport failures, so callers can tell
/// the three outcomes apart without a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    pub ok: bool,
    pub text: Option<String>,
    pub raw: String,
    pub status_code: Option<u16>,
}

impl InvocationResult {
    pub fn is_transport_failure(&self) -> bool {
        self.status_code.is_none()
    }
}

impl From<Invocation> for InvocationResult {
    fn from(invocation: Invocation) -> Self {
        match invocation {
            Invocation::Success { text, raw } => Self {
                ok: true,
                text: Some(text),
                raw,
                status_code: Some(200),
            },
            Invocation::HttpError { status, text, raw } => Self {
                ok: false,
                text: Some(text),
                raw,
                status_code: Some(status),
            },
            Invocation::TransportError { message } => Self {
                ok: false,
                text: Some(message),
                raw: String::new(),
                status_code: None,
            },
        }
    }
}

// 200: a usable "response" field, else the whole parsed body, else the raw body.
fn success_text(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(parsed) => parsed
            .as_object()
            .and_then(|map| usable_field(map, "response"))
            .unwrap_or_else(|| value_to_text(&parsed)),
        Err(_) => raw.to_string(),
    }
}

// non-200: "response", then "message", then the raw body.
fn failure_text(raw: &str) -> String {
    serde_json::from_str::<Value>(raw)
        .ok()
        .as_ref()
        .and_then(Value::as_object)
        .and_then(|map| usable_field(map, "response").or_else(|| usable_field(map, "message")))
        .unwrap_or_else(|| raw.to_string())
}

fn usable_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).filter(|v| is_truthy(v)).map(value_to_text)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
