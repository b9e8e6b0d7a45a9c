//! Simulated streaming — incremental reveal of an already-known answer.
//!
//! DESIGN
//! ======
//! The full response string is known before streaming starts; the reveal
//! task writes growing word-prefixes into the turn with a randomized pause
//! between words, then stamps the exact full text so whitespace can never
//! drift. There is no cancel signal: abandoning a reveal means replacing
//! the history container, after which the task's by-id writes hit a
//! discarded transcript and are no-ops from the session's point of view.

use std::sync::OnceLock;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::turn::SharedHistory;

const DEFAULT_DELAY_MIN_MS: u64 = 30;
const DEFAULT_DELAY_MAX_MS: u64 = 80;

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Per-word delay bounds in milliseconds, `[min, max)`.
fn delay_bounds() -> (u64, u64) {
    static VALUE: OnceLock<(u64, u64)> = OnceLock::new();
    *VALUE.get_or_init(|| {
        let min = env_parse("STREAM_DELAY_MIN_MS", DEFAULT_DELAY_MIN_MS);
        let max = env_parse("STREAM_DELAY_MAX_MS", DEFAULT_DELAY_MAX_MS);
        if min < max { (min, max) } else { (min, min + 1) }
    })
}

/// Growing word-prefixes of `full_text`, split on single spaces:
/// `"a b c"` yields `["a", "a b", "a b c"]`. Empty input yields nothing —
/// the caller finalizes immediately.
#[must_use]
pub fn word_prefixes(full_text: &str) -> Vec<String> {
    if full_text.is_empty() {
        return Vec::new();
    }
    let mut prefixes = Vec::new();
    let mut current = String::new();
    for word in full_text.split(' ') {
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
        prefixes.push(current.clone());
    }
    prefixes
}

/// Spawn the reveal task for one fin turn. Returns the task handle so the
/// caller can await completion; dropping the handle detaches the reveal.
pub fn reveal(history: SharedHistory, turn_id: u64, full_text: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        let (min_ms, max_ms) = delay_bounds();
        debug!(turn_id, words = full_text.split(' ').count(), "stream: reveal started");

        for prefix in word_prefixes(&full_text) {
            history.write().await.set_streaming_text(turn_id, &prefix);
            let delay = rand::rng().random_range(min_ms..max_ms);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        history.write().await.finalize(turn_id, &full_text);
        debug!(turn_id, "stream: reveal complete");
    })
}

#[cfg(test)]
#[path = "stream_test.rs"]
mod tests;
