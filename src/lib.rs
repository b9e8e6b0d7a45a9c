//! Fin copilot — the AI side-panel pipeline of a support inbox.
//!
//! ARCHITECTURE
//! ============
//! [`orchestrator::CopilotSession`] is the entry point: it throttles
//! queries, resolves answers (remote completion with a canned-catalog
//! fallback), and streams replies word-by-word into a shared turn history.
//! Leaves underneath it: [`catalog`] (deterministic keyword-matched
//! templates), [`sources`] (citation labels and display metrics),
//! [`llm`] (the chat-completions client), [`stream`] (the reveal task),
//! and [`saved`] (the persistent saved-response library).

pub mod catalog;
pub mod conversation;
pub mod inbox;
pub mod llm;
pub mod orchestrator;
pub mod saved;
pub mod sources;
pub mod stream;
pub mod turn;

pub use conversation::{ConversationContext, ConversationMessage, MessageSender, Sentiment};
pub use orchestrator::{CopilotSession, SubmitOutcome};
pub use saved::SavedResponseStore;
pub use turn::{CopilotTurn, ResponseMetrics, TurnSender};
