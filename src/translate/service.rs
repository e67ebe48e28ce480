use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::interface::{Action, Submission, SubmissionError, TranslateRequest, TranslationOutcome};
use super::prompts::{judge_prompt, translation_prompt};
use crate::llm::{InvocationResult, LlmInterface, Message};
use crate::settings::LlmSettings;

/// Runs the translate and judge flows against an injected model client.
pub struct TranslationService {
    llm: Arc<dyn LlmInterface>,
    translation_model: String,
    judge_model: String,
}

impl TranslationService {
    pub fn new(
        llm: Arc<dyn LlmInterface>,
        translation_model: impl Into<String>,
        judge_model: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            translation_model: translation_model.into(),
            judge_model: judge_model.into(),
        }
    }

    pub fn from_settings(llm: Arc<dyn LlmInterface>, settings: &LlmSettings) -> Self {
        Self::new(llm, &settings.translation_model, &settings.judge_model)
    }

    pub fn translation_model(&self) -> &str {
        &self.translation_model
    }

    pub fn judge_model(&self) -> &str {
        &self.judge_model
    }

    /// Validate the request, translate, and for [`Action::Judge`] grade the result.
    ///
    /// The judge call is made even when translation failed; its prompt then
    /// carries whatever text the first call reported.
    pub async fn process(
        &self,
        request: TranslateRequest,
    ) -> Result<TranslationOutcome, SubmissionError> {
        let submission = Submission::try_from(request).map_err(|e| {
            warn!("Rejected submission: {}", e);
            e
        })?;

        let span = info_span!(
            "submission",
            id = %Uuid::new_v4(),
            action = ?submission.action,
            language = %submission.language
        );
        Ok(self.run(submission).instrument(span).await)
    }

    async fn run(&self, submission: Submission) -> TranslationOutcome {
        let translation = self
            .ask(
                &self.translation_model,
                translation_prompt(&submission.language, &submission.source_text),
            )
            .await;
        info!(ok = translation.ok, status = ?translation.status_code, "Translation finished");

        let judge = match submission.action {
            Action::Judge => {
                let prompt = judge_prompt(&submission.source_text, translation.text.as_deref());
                let judge = self.ask(&self.judge_model, prompt).await;
                info!(ok = judge.ok, status = ?judge.status_code, "Judging finished");
                Some(judge)
            }
            Action::Translate => None,
        };

        TranslationOutcome {
            source_text: submission.source_text,
            language: submission.language,
            action: submission.action,
            translation,
            judge,
        }
    }

    async fn ask(&self, model_name: &str, prompt: String) -> InvocationResult {
        self.llm.invoke(model_name, &[Message::user(prompt)]).await
    }
}
