//! Provider-neutral completion types and errors.

use async_trait::async_trait;

/// Errors produced by the remote completion provider.
///
/// Every variant is recovered by the orchestrator's catalog fallback; none
/// of them reach the user as an error turn.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// No API credential configured — the remote path is skipped entirely.
    #[error("no completion credential configured")]
    MissingCredential,

    /// The provider returned a non-2xx HTTP status.
    #[error("completion API returned status {status}")]
    HttpStatus { status: u16, body: String },

    /// The HTTP request itself failed (DNS, connect, timeout).
    #[error("completion request failed: {0}")]
    Network(String),

    /// The response body could not be parsed into an answer string.
    #[error("completion response malformed: {0}")]
    MalformedPayload(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

/// Async trait for the remote completion call. Enables mocking in tests.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// Request one assistant reply for `question` under `system` context.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on any credential, transport, status,
    /// or payload problem.
    async fn complete(&self, system: &str, question: &str) -> Result<String, ProviderError>;
}
