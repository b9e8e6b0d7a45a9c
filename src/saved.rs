//! Saved responses — a small local library of reusable answer snippets.
//!
//! DESIGN
//! ======
//! One JSON file holds the whole collection; every save or delete rewrites
//! it wholesale, so the file always reflects the in-memory set exactly and
//! there are no partial updates to recover. A missing or corrupt file
//! degrades to an empty collection: persistence problems are logged, never
//! surfaced as failures of the save/delete API itself.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::warn;

const DEFAULT_STORE_PATH: &str = "saved_responses.json";

// =============================================================================
// TYPES
// =============================================================================

/// Snippet category, from a fixed first-match keyword rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Refunds,
    Account,
    Shipping,
    Billing,
    General,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedResponse {
    pub id: u64,
    pub text: String,
    /// RFC 3339 timestamp of the save action.
    pub saved_at: String,
    pub category: Category,
}

/// Classify a response text into its category. First match wins.
#[must_use]
pub fn classify(text: &str) -> Category {
    let t = text.to_lowercase();
    if t.contains("refund") {
        Category::Refunds
    } else if t.contains("account") {
        Category::Account
    } else if t.contains("shipping") {
        Category::Shipping
    } else if t.contains("billing") {
        Category::Billing
    } else {
        Category::General
    }
}

// =============================================================================
// STORE
// =============================================================================

pub struct SavedResponseStore {
    path: PathBuf,
    entries: Vec<SavedResponse>,
    next_id: u64,
}

impl SavedResponseStore {
    /// Open the store at `path`, loading any existing collection. Corrupt
    /// or unreadable data degrades to an empty collection.
    #[must_use]
    pub fn open(path: &Path) -> Self {
        let entries = match std::fs::read(path) {
            Ok(bytes) => match serde_json::from_slice::<Vec<SavedResponse>>(&bytes) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "saved responses unreadable; starting empty");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        let next_id = entries.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self { path: path.to_path_buf(), entries, next_id }
    }

    /// Open the store at `SAVED_RESPONSES_PATH`, or the default file in the
    /// working directory.
    #[must_use]
    pub fn from_env() -> Self {
        let path = std::env::var("SAVED_RESPONSES_PATH").unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());
        Self::open(Path::new(&path))
    }

    /// Save a response text, classifying it and persisting the whole set.
    pub fn save(&mut self, text: &str) -> SavedResponse {
        let id = self.next_id;
        self.next_id += 1;
        let saved_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        let entry = SavedResponse { id, text: text.to_string(), saved_at, category: classify(text) };
        self.entries.push(entry.clone());
        self.persist();
        entry
    }

    /// Delete by id, persisting the remainder. Returns whether an entry
    /// was removed.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|r| r.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn list(&self) -> &[SavedResponse] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite the backing file from the full in-memory set. Failures are
    /// logged and the in-memory state stays authoritative for the session.
    fn persist(&self) {
        let json = match serde_json::to_vec_pretty(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "saved responses serialization failed; skipping write");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            warn!(path = %self.path.display(), error = %e, "saved responses write failed");
        }
    }
}

#[cfg(test)]
#[path = "saved_test.rs"]
mod tests;
