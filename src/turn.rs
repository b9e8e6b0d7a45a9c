//! Copilot turn history — the shared transcript of the side panel.
//!
//! DESIGN
//! ======
//! `TurnHistory` is append-only except for one in-place mutation: the
//! streaming presenter rewrites a fin turn's `text`/`is_streaming` by id
//! until the reveal completes. The history is shared as
//! `Arc<RwLock<TurnHistory>>`; switching conversations replaces the whole
//! container, so a presenter still holding the old handle writes into a
//! discarded transcript and the new one never sees it.

use std::sync::Arc;
use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Shared handle to a session's turn history.
pub type SharedHistory = Arc<RwLock<TurnHistory>>;

/// Milliseconds since the Unix epoch.
///
/// # Errors
///
/// Returns an error if the system clock reads earlier than the epoch.
pub fn now_ms() -> Result<u64, SystemTimeError> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)?;
    Ok(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

// =============================================================================
// TURN
// =============================================================================

/// Who authored a copilot panel turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnSender {
    User,
    Fin,
}

/// Synthetic answer-quality figures attached to a fin turn at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMetrics {
    /// Percent confidence, 85–99.
    pub confidence: u8,
    /// Similar cases resolved recently, 20–69.
    pub relevant_cases: u32,
    /// Average resolution time in minutes, 30–149.
    pub avg_resolution_time_mins: u32,
}

/// One entry in the copilot panel's conversational history.
///
/// Warning and error turns carry only `text`; `sources`/`metrics` are
/// populated only on substantive fin answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopilotTurn {
    pub id: u64,
    pub sender: TurnSender,
    pub text: String,
    pub timestamp_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ResponseMetrics>,
    #[serde(default)]
    pub is_streaming: bool,
    #[serde(default)]
    pub is_warning: bool,
    #[serde(default)]
    pub is_error: bool,
}

impl CopilotTurn {
    fn base(id: u64, sender: TurnSender, text: String, timestamp_ms: u64) -> Self {
        Self {
            id,
            sender,
            text,
            timestamp_ms,
            sources: Vec::new(),
            metrics: None,
            is_streaming: false,
            is_warning: false,
            is_error: false,
        }
    }
}

// =============================================================================
// HISTORY
// =============================================================================

/// Ordered transcript of copilot turns with monotonically increasing ids.
#[derive(Debug, Default)]
pub struct TurnHistory {
    turns: Vec<CopilotTurn>,
    next_id: u64,
}

impl TurnHistory {
    #[must_use]
    pub fn new() -> Self {
        Self { turns: Vec::new(), next_id: 1 }
    }

    /// Wrap a fresh history in a shared handle.
    #[must_use]
    pub fn shared() -> SharedHistory {
        Arc::new(RwLock::new(Self::new()))
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append the verbatim user question. Returns the new turn's id.
    pub fn push_user(&mut self, question: &str, timestamp_ms: u64) -> u64 {
        let id = self.alloc_id();
        self.turns
            .push(CopilotTurn::base(id, TurnSender::User, question.to_string(), timestamp_ms));
        id
    }

    /// Append an empty streaming fin turn with sources and metrics attached
    /// up front. The presenter fills `text` in afterwards.
    pub fn push_fin_streaming(&mut self, sources: Vec<String>, metrics: ResponseMetrics, timestamp_ms: u64) -> u64 {
        let id = self.alloc_id();
        let mut turn = CopilotTurn::base(id, TurnSender::Fin, String::new(), timestamp_ms);
        turn.sources = sources;
        turn.metrics = Some(metrics);
        turn.is_streaming = true;
        self.turns.push(turn);
        id
    }

    /// Append a rate-limit warning turn.
    pub fn push_warning(&mut self, text: String, timestamp_ms: u64) -> u64 {
        let id = self.alloc_id();
        let mut turn = CopilotTurn::base(id, TurnSender::Fin, text, timestamp_ms);
        turn.is_warning = true;
        self.turns.push(turn);
        id
    }

    /// Append an error turn for internal faults.
    pub fn push_error(&mut self, text: String, timestamp_ms: u64) -> u64 {
        let id = self.alloc_id();
        let mut turn = CopilotTurn::base(id, TurnSender::Fin, text, timestamp_ms);
        turn.is_error = true;
        self.turns.push(turn);
        id
    }

    /// Overwrite a streaming turn's text with the current reveal prefix.
    /// Unknown ids are a no-op: the turn's container may have been replaced
    /// under an in-flight reveal.
    pub fn set_streaming_text(&mut self, id: u64, text: &str) {
        if let Some(turn) = self.turns.iter_mut().find(|t| t.id == id) {
            turn.text = text.to_string();
            turn.is_streaming = true;
        }
    }

    /// Final reveal step: set the exact full text and stop streaming.
    pub fn finalize(&mut self, id: u64, full_text: &str) {
        if let Some(turn) = self.turns.iter_mut().find(|t| t.id == id) {
            turn.text = full_text.to_string();
            turn.is_streaming = false;
        }
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&CopilotTurn> {
        self.turns.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn turns(&self) -> &[CopilotTurn] {
        &self.turns
    }

    #[must_use]
    pub fn last(&self) -> Option<&CopilotTurn> {
        self.turns.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// True while any turn is still being revealed.
    #[must_use]
    pub fn is_revealing(&self) -> bool {
        self.turns.iter().any(|t| t.is_streaming)
    }
}

#[cfg(test)]
#[path = "turn_test.rs"]
mod tests;
