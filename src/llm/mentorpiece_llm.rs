use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, error, info, warn};

use super::invocation::{Invocation, InvocationRequest, InvocationResult};
use super::llm_interface::LlmInterface;
use super::message::{build_prompt, Message};
use crate::settings::LlmSettings;

/// Mentorpiece model API client.
///
/// One POST per call, no retries. The endpoint, timeout and optional bearer
/// token are fixed at construction.
#[derive(Debug, Clone)]
pub struct MentorpieceLLM {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl MentorpieceLLM {
    pub fn new(settings: &LlmSettings) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        info!(
            "Initialized MentorpieceLLM: endpoint={}, timeout={}s, auth={}",
            settings.endpoint,
            settings.timeout_secs,
            settings.api_key.is_some()
        );

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &InvocationRequest) -> Invocation {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return transport_failure(&e),
        };

        let status = response.status().as_u16();
        let raw = match response.text().await {
            Ok(raw) => raw,
            Err(e) => return transport_failure(&e),
        };

        if status != 200 {
            warn!("Mentorpiece returned HTTP {}", status);
        } else {
            debug!("Mentorpiece returned {} bytes", raw.len());
        }

        Invocation::from_response(status, raw)
    }
}

#[async_trait]
impl LlmInterface for MentorpieceLLM {
    async fn invoke(&self, model_name: &str, messages: &[Message]) -> InvocationResult {
        let request = InvocationRequest {
            model_name: model_name.to_string(),
            prompt: build_prompt(messages),
        };

        info!("Calling Mentorpiece model={}", model_name);
        self.send(&request).await.into()
    }
}

fn transport_failure(e: &reqwest::Error) -> Invocation {
    let message = describe(e);
    error!(error = ?e, timeout = e.is_timeout(), "Network error calling Mentorpiece: {}", message);
    Invocation::transport(message)
}

/// The error and its sources, outermost first.
fn describe(e: &(dyn StdError + 'static)) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
