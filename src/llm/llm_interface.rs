use async_trait::async_trait;

use super::invocation::InvocationResult;
use super::message::Message;

/// Interface for a one-shot model call.
///
/// Implementations never fail: transport problems, HTTP errors and odd bodies
/// are all folded into the returned [`InvocationResult`].
#[async_trait]
pub trait LlmInterface: Send + Sync {
    async fn invoke(&self, model_name: &str, messages: &[Message]) -> InvocationResult;
}
