//! OpenAI chat-completions client for the copilot answer path.
//!
//! One HTTPS POST per question: bounded output (300 tokens), fixed
//! temperature, bearer auth from the configured credential. Any failure
//! maps to a [`ProviderError`] variant and the orchestrator falls back to
//! the response catalog.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::config::CompletionConfig;
use super::types::{CompletionApi, ProviderError};

const MAX_RESPONSE_TOKENS: u32 = 300;
const TEMPERATURE: f32 = 0.7;

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::ClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: CompletionConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;
        Ok(Self { http, api_key: config.api_key, base_url: config.base_url, model: config.model })
    }

    /// Configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionApi for OpenAiClient {
    async fn complete(&self, system: &str, question: &str) -> Result<String, ProviderError> {
        let body = CompletionRequest {
            model: &self.model,
            messages: vec![
                WireMessage { role: "system", content: system },
                WireMessage { role: "user", content: question },
            ],
            max_tokens: MAX_RESPONSE_TOKENS,
            temperature: TEMPERATURE,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(ProviderError::HttpStatus { status, body: text });
        }
        parse_completion_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

/// Extract `choices[0].message.content` from a chat-completions response.
pub(crate) fn parse_completion_response(json_text: &str) -> Result<String, ProviderError> {
    let root: Value =
        serde_json::from_str(json_text).map_err(|e| ProviderError::MalformedPayload(e.to_string()))?;
    let content = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .ok_or_else(|| ProviderError::MalformedPayload("missing choices[0].message.content".to_string()))?;
    Ok(content.to_string())
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
