use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm::InvocationResult;

pub const DEFAULT_LANGUAGE: &str = "English";

/// Incoming submission, as posted by the form or the JSON API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub source_text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Translate,
    /// Translate, then have a second model grade the translation.
    Judge,
}

impl Action {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("judge") => Action::Judge,
            _ => Action::Translate,
        }
    }
}

/// A validated submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub source_text: String,
    pub language: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Пожалуйста, введите исходный текст для перевода.")]
    EmptySourceText,
}

impl TryFrom<TranslateRequest> for Submission {
    type Error = SubmissionError;

    fn try_from(request: TranslateRequest) -> Result<Self, Self::Error> {
        let source_text = request.source_text.trim();
        if source_text.is_empty() {
            return Err(SubmissionError::EmptySourceText);
        }

        Ok(Self {
            source_text: source_text.to_string(),
            language: request
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            action: Action::parse(request.action.as_deref()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationOutcome {
    pub source_text: String,
    pub language: String,
    pub action: Action,
    pub translation: InvocationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge: Option<InvocationResult>,
}
