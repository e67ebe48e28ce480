pub mod interface;
pub mod prompts;
pub mod service;

pub use interface::{Action, Submission, SubmissionError, TranslateRequest, TranslationOutcome};
pub use service::TranslationService;
