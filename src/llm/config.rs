//! Completion provider configuration parsed from environment variables.

use super::types::ProviderError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeouts: CompletionTimeouts,
}

impl CompletionConfig {
    /// Build typed provider config from environment variables.
    ///
    /// Required:
    /// - `OPENAI_API_KEY`
    ///
    /// Optional:
    /// - `COPILOT_MODEL`: default `gpt-3.5-turbo`
    /// - `COPILOT_BASE_URL`: default OpenAI API base URL
    /// - `COPILOT_REQUEST_TIMEOUT_SECS`: default 30
    /// - `COPILOT_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingCredential`] when `OPENAI_API_KEY`
    /// is absent — callers skip the remote path entirely in that case.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::resolve(
            std::env::var("OPENAI_API_KEY").ok(),
            std::env::var("COPILOT_MODEL").ok(),
            std::env::var("COPILOT_BASE_URL").ok(),
            std::env::var("COPILOT_REQUEST_TIMEOUT_SECS").ok(),
            std::env::var("COPILOT_CONNECT_TIMEOUT_SECS").ok(),
        )
    }

    /// Pure resolution step behind [`CompletionConfig::from_env`], separated
    /// so defaults and overrides are testable without touching process env.
    pub(crate) fn resolve(
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
        request_timeout: Option<String>,
        connect_timeout: Option<String>,
    ) -> Result<Self, ProviderError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(ProviderError::MissingCredential)?;
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url,
            timeouts: CompletionTimeouts {
                request_secs: parse_secs(request_timeout, DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: parse_secs(connect_timeout, DEFAULT_CONNECT_TIMEOUT_SECS),
            },
        })
    }
}

fn parse_secs(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.parse::<u64>().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
