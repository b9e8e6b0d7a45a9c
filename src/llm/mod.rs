//! Remote completion provider for the copilot answer path.
//!
//! DESIGN
//! ======
//! The orchestrator talks to `dyn CompletionApi`, never to a concrete
//! client, so tests can substitute canned or failing providers. The only
//! real implementation is the OpenAI chat-completions client; when no
//! credential is configured the session simply carries no provider and
//! answers come from the response catalog.

pub mod config;
pub mod openai;
pub mod types;

use std::fmt::Write;
use std::sync::Arc;

use tracing::warn;

pub use config::CompletionConfig;
pub use openai::OpenAiClient;
pub use types::{CompletionApi, ProviderError};

use crate::conversation::ConversationContext;

/// How many trailing conversation messages the system prompt embeds.
const PROMPT_CONTEXT_MESSAGES: usize = 5;

/// Build the optional provider from environment variables. Missing or bad
/// configuration is non-fatal: the copilot degrades to catalog-only.
#[must_use]
pub fn provider_from_env() -> Option<Arc<dyn CompletionApi>> {
    let config = match CompletionConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "remote completion not configured — using response catalog only");
            return None;
        }
    };
    match OpenAiClient::new(config) {
        Ok(client) => {
            tracing::info!(model = client.model(), "completion provider initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!(error = %e, "completion client build failed — using response catalog only");
            None
        }
    }
}

/// Build the system instruction for a completion request: the fixed Fin
/// copilot briefing plus customer, company, message count, and the last
/// few transcript lines.
#[must_use]
pub fn build_system_prompt(context: &ConversationContext) -> String {
    let mut prompt = String::from(
        "You are Fin AI, a helpful customer service copilot assistant. You help customer \
         service agents by analyzing conversations and providing helpful suggestions, draft \
         responses, and guidance.\n\n\
         Current conversation context:\n",
    );

    let _ = writeln!(prompt, "- Customer: {}", context.customer_name().unwrap_or("Unknown"));
    let _ = writeln!(prompt, "- Company: {}", context.company().unwrap_or("N/A"));
    let _ = writeln!(prompt, "- Messages in conversation: {}", context.messages.len());

    prompt.push_str("\nRecent conversation:\n");
    let skip = context.messages.len().saturating_sub(PROMPT_CONTEXT_MESSAGES);
    for message in &context.messages[skip..] {
        let _ = writeln!(prompt, "{}: {}", message.sender, message.text);
    }

    prompt.push_str(
        "\nProvide helpful, professional, and actionable advice for customer service agents. \
         Include specific templates they can use. Keep responses concise and practical.",
    );
    prompt
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
