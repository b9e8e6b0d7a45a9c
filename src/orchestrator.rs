//! Copilot session orchestration — throttle, provider fallback, streaming.
//!
//! DESIGN
//! ======
//! `CopilotSession` owns all per-session state explicitly: the shared turn
//! history, the throttle timestamp, the optional remote provider, and the
//! active conversation context. Submitting a query runs the full pipeline:
//! throttle check, user-turn append, answer resolution (remote with catalog
//! fallback, or catalog directly), fin-turn creation with sources and
//! metrics attached up front, then hand-off to the streaming presenter.
//!
//! The throttle check and timestamp update happen inside one mutex guard
//! with no suspension point in between, so the accept/record step stays
//! atomic even if the caller's one-query-at-a-time guard is bypassed.
//!
//! ERROR HANDLING
//! ==============
//! Provider failures are recovered by the catalog and never surface as
//! error turns. Only an internal bookkeeping fault (a system clock reading
//! before the Unix epoch) produces a visible error turn; the session stays
//! usable afterwards.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::catalog;
use crate::conversation::ConversationContext;
use crate::llm::{self, CompletionApi};
use crate::sources;
use crate::stream;
use crate::turn::{SharedHistory, TurnHistory, now_ms};

/// Minimum enforced interval between accepted queries, in milliseconds.
const DEFAULT_THROTTLE_WINDOW_MS: u64 = 2000;

/// Text of the error turn shown for internal faults.
const ERROR_TURN_TEXT: &str = "I apologize, but I encountered an error. Please try again in a moment.";

/// Callback invoked with a finalized turn's text on "Add to composer".
pub type ComposerHook = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum CopilotError {
    #[error("system clock error: {0}")]
    Clock(#[from] std::time::SystemTimeError),
}

/// What happened to a submitted query.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Rejected by the throttle; a warning turn was appended.
    Throttled { turn_id: u64 },
    /// Accepted; `turn_id` is the streaming fin turn and `reveal` resolves
    /// when its text is fully revealed.
    Accepted { turn_id: u64, reveal: JoinHandle<()> },
    /// Internal bookkeeping fault; an error turn was appended.
    Failed { turn_id: u64 },
}

// =============================================================================
// THROTTLE
// =============================================================================

struct ThrottleState {
    last_request: Option<Instant>,
}

struct Throttle {
    state: Mutex<ThrottleState>,
    window_ms: u64,
}

impl Throttle {
    fn new(window_ms: u64) -> Self {
        Self { state: Mutex::new(ThrottleState { last_request: None }), window_ms }
    }

    /// Check the window and, if clear, record `now` as the acceptance time
    /// in the same critical section. A rejected call leaves the recorded
    /// timestamp untouched and returns the whole seconds left to wait.
    fn check_and_record(&self, now: Instant) -> Result<(), u64> {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(last) = state.last_request {
            let elapsed = u64::try_from(now.saturating_duration_since(last).as_millis()).unwrap_or(u64::MAX);
            if elapsed < self.window_ms {
                return Err((self.window_ms - elapsed).div_ceil(1000));
            }
        }
        state.last_request = Some(now);
        Ok(())
    }

    fn reset(&self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last_request = None;
    }
}

fn throttle_warning(wait_secs: u64) -> String {
    let plural = if wait_secs > 1 { "s" } else { "" };
    format!("⏰ Please wait {wait_secs} more second{plural} to avoid rate limits.")
}

// =============================================================================
// SESSION
// =============================================================================

pub struct CopilotSession {
    history: SharedHistory,
    throttle: Throttle,
    provider: Option<Arc<dyn CompletionApi>>,
    context: ConversationContext,
    composer: Option<ComposerHook>,
}

impl CopilotSession {
    #[must_use]
    pub fn new(context: ConversationContext, provider: Option<Arc<dyn CompletionApi>>) -> Self {
        Self {
            history: TurnHistory::shared(),
            throttle: Throttle::new(DEFAULT_THROTTLE_WINDOW_MS),
            provider,
            context,
            composer: None,
        }
    }

    #[must_use]
    pub fn with_composer(mut self, hook: ComposerHook) -> Self {
        self.composer = Some(hook);
        self
    }

    /// Shared handle to the current turn history, for rendering.
    #[must_use]
    pub fn history(&self) -> SharedHistory {
        Arc::clone(&self.history)
    }

    #[must_use]
    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// True while a reveal is in flight. The submit path is expected to be
    /// held closed by the caller while this reads true.
    pub async fn is_revealing(&self) -> bool {
        self.history.read().await.is_revealing()
    }

    /// Switch to another conversation: the transcript is discarded
    /// wholesale (any in-flight reveal now writes into a dropped container)
    /// and the throttle window restarts clean.
    pub fn switch_conversation(&mut self, context: ConversationContext) {
        info!(conversation = %context.label, "copilot: switching conversation");
        self.context = context;
        self.history = TurnHistory::shared();
        self.throttle.reset();
    }

    /// Clear the panel transcript for the current conversation.
    pub fn clear_chat(&mut self) {
        self.history = TurnHistory::shared();
    }

    /// Run the full query pipeline. The caller rejects blank questions and
    /// holds the submit path closed while a previous reveal is in flight.
    pub async fn submit_query(&self, question: &str) -> SubmitOutcome {
        self.submit_query_at(question, Instant::now()).await
    }

    /// Internal: submit with an explicit acceptance time (for testing).
    pub(crate) async fn submit_query_at(&self, question: &str, now: Instant) -> SubmitOutcome {
        if let Err(wait_secs) = self.throttle.check_and_record(now) {
            info!(wait_secs, "copilot: query throttled");
            let turn_id = {
                let mut history = self.history.write().await;
                history.push_warning(throttle_warning(wait_secs), now_ms().unwrap_or_default())
            };
            return SubmitOutcome::Throttled { turn_id };
        }

        match self.run_accepted_query(question).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "copilot: turn bookkeeping failed");
                let turn_id = {
                    let mut history = self.history.write().await;
                    history.push_error(ERROR_TURN_TEXT.to_string(), now_ms().unwrap_or_default())
                };
                SubmitOutcome::Failed { turn_id }
            }
        }
    }

    async fn run_accepted_query(&self, question: &str) -> Result<SubmitOutcome, CopilotError> {
        info!(question_len = question.len(), "copilot: query accepted");
        {
            let mut history = self.history.write().await;
            history.push_user(question, now_ms()?);
        }

        let body = self.resolve_answer(question).await;

        let turn_id = {
            let mut history = self.history.write().await;
            history.push_fin_streaming(sources::sources(question), sources::metrics(question), now_ms()?)
        };
        let reveal = stream::reveal(self.history(), turn_id, body);
        Ok(SubmitOutcome::Accepted { turn_id, reveal })
    }

    /// Resolve the answer body. The remote provider is attempted only when
    /// configured; any provider error falls back to the canned catalog, so
    /// this never fails.
    async fn resolve_answer(&self, question: &str) -> String {
        if let Some(provider) = &self.provider {
            let system = llm::build_system_prompt(&self.context);
            match provider.complete(&system, question).await {
                Ok(text) => {
                    info!("copilot: remote completion answered");
                    return text;
                }
                Err(e) => {
                    warn!(error = %e, "copilot: provider failed; falling back to catalog");
                }
            }
        }
        catalog::answer(question, &self.context)
    }

    /// Hand a finalized turn's text to the composer. Streaming, warning,
    /// and error turns are not eligible.
    pub async fn add_to_composer(&self, turn_id: u64) -> bool {
        let Some(hook) = &self.composer else {
            return false;
        };
        let text = {
            let history = self.history.read().await;
            match history.get(turn_id) {
                Some(turn) if !turn.is_streaming && !turn.is_warning && !turn.is_error => turn.text.clone(),
                _ => return false,
            }
        };
        hook(&text);
        true
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
