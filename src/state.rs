use std::sync::Arc;

use crate::llm::{LlmInterface, MentorpieceLLM};
use crate::settings::Settings;
use crate::translate::TranslationService;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub translator: Arc<TranslationService>,
}

impl AppState {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let llm = Arc::new(MentorpieceLLM::new(&settings.llm)?);
        Ok(Self::with_llm(settings, llm))
    }

    /// Build state around an already constructed model client.
    pub fn with_llm(settings: Settings, llm: Arc<dyn LlmInterface>) -> Self {
        let translator = Arc::new(TranslationService::from_settings(llm, &settings.llm));
        Self {
            settings: Arc::new(settings),
            translator,
        }
    }
}
