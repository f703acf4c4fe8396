//! History log - Bounded undo stack of whole-document snapshots
//!
//! Every mutating action records the document as it was *before* the action.
//! Undoing pops the newest entry and restores that snapshot, so each call
//! reverts exactly one action. There is no redo.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::domain::entities::CharacterDocument;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("No actions to undo")]
    Empty,
}

/// One undoable action
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub description: String,
    /// Document state before the action was applied
    pub snapshot: CharacterDocument,
    pub timestamp: DateTime<Utc>,
}

/// The undo stack
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryLog {
    /// Create a log keeping at most `limit` entries (at least one)
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Description of the action the next undo would revert
    pub fn peek_description(&self) -> Option<&str> {
        self.entries.back().map(|e| e.description.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Snapshot `document` under `description`, evicting the oldest entry
    /// once the limit is exceeded
    pub fn record(&mut self, description: impl Into<String>, document: &CharacterDocument) {
        self.entries.push_back(HistoryEntry {
            description: description.into(),
            snapshot: document.clone(),
            timestamp: Utc::now(),
        });

        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    /// Restore the newest snapshot into `document`
    ///
    /// Returns the description of the reverted action.
    pub fn undo(&mut self, document: &mut CharacterDocument) -> Result<String, HistoryError> {
        let entry = self.entries.pop_back().ok_or(HistoryError::Empty)?;
        *document = entry.snapshot;
        Ok(entry.description)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
