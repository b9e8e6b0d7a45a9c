//! Conversation context consumed by the copilot pipeline.
//!
//! The active conversation is identified by a label of the form
//! `"{name} · {company}"` (or a bare name), plus the ordered message list
//! of that conversation. The copilot reads it for personalization,
//! sentiment, and the provider system prompt; it never mutates it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between customer name and company in a conversation label.
const LABEL_SEPARATOR: &str = " · ";

// =============================================================================
// MESSAGES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Agent,
    Fin,
}

impl fmt::Display for MessageSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::User => "user",
            Self::Agent => "agent",
            Self::Fin => "fin",
        };
        f.write_str(label)
    }
}

/// One message in the main inbox transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: u64,
    pub sender: MessageSender,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    pub timestamp_ms: u64,
    #[serde(default)]
    pub seen: bool,
    #[serde(default)]
    pub is_note: bool,
}

impl ConversationMessage {
    #[must_use]
    pub fn new(id: u64, sender: MessageSender, text: &str, timestamp_ms: u64) -> Self {
        Self { id, sender, text: text.to_string(), html: None, timestamp_ms, seen: false, is_note: false }
    }
}

// =============================================================================
// SENTIMENT
// =============================================================================

/// Coarse mood of the customer, derived from their latest message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Frustrated,
    Neutral,
}

// =============================================================================
// CONTEXT
// =============================================================================

/// The active conversation as seen by the copilot panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Display label, `"{name} · {company}"` or a bare name.
    pub label: String,
    pub messages: Vec<ConversationMessage>,
}

impl ConversationContext {
    #[must_use]
    pub fn new(label: &str, messages: Vec<ConversationMessage>) -> Self {
        Self { label: label.to_string(), messages }
    }

    /// Customer display name parsed from the label. `None` when the label
    /// is empty; callers supply their own default ("the customer" in
    /// templates, "Unknown" in the provider prompt).
    #[must_use]
    pub fn customer_name(&self) -> Option<&str> {
        self.label
            .split(LABEL_SEPARATOR)
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Company parsed from the label, absent for bare-name labels.
    #[must_use]
    pub fn company(&self) -> Option<&str> {
        self.label
            .split(LABEL_SEPARATOR)
            .nth(1)
            .map(str::trim)
            .filter(|company| !company.is_empty())
    }

    /// Most recent user-sender message, ignoring agent and fin entries.
    #[must_use]
    pub fn last_user_message(&self) -> Option<&ConversationMessage> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.sender == MessageSender::User)
    }

    /// Sentiment is computed once per catalog call from the latest user
    /// message: "frustrated"/"disappointed" anywhere in its text flips the
    /// tone, everything else reads neutral.
    #[must_use]
    pub fn sentiment(&self) -> Sentiment {
        let last = self
            .last_user_message()
            .map(|m| m.text.as_str())
            .unwrap_or_default();
        if last.contains("frustrated") || last.contains("disappointed") {
            Sentiment::Frustrated
        } else {
            Sentiment::Neutral
        }
    }

    /// Starter questions shown when the panel history is empty, keyed off
    /// the last message in the transcript.
    #[must_use]
    pub fn suggested_questions(&self) -> &'static [&'static str] {
        let last = self
            .messages
            .last()
            .map(|m| m.text.to_lowercase())
            .unwrap_or_default();

        if last.contains("refund") || last.contains("return") {
            &[
                "How do I process a refund?",
                "What's our refund policy?",
                "Generate a refund confirmation email",
            ]
        } else if last.contains("order") || last.contains("shipping") {
            &[
                "Track order status",
                "Shipping delay response template",
                "How to update shipping address?",
            ]
        } else if last.contains("account") || last.contains("password") {
            &[
                "Account recovery steps",
                "Password reset template",
                "Security verification process",
            ]
        } else {
            &["How do I process a refund?"]
        }
    }
}

#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;
