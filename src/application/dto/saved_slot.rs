//! Saved slots - Named character snapshots kept alongside the current one

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::CharacterDocument;

pub const DEFAULT_SLOT_LIMIT: usize = 10;

/// Name used for characters saved without one
pub const UNNAMED_CHARACTER: &str = "Unnamed Character";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSlot {
    pub name: String,
    pub data: CharacterDocument,
    pub saved_at: DateTime<Utc>,
}

impl SavedSlot {
    pub fn new(document: &CharacterDocument) -> Self {
        Self {
            name: slot_name(document),
            data: document.clone(),
            saved_at: Utc::now(),
        }
    }
}

/// Name a document is saved under
pub fn slot_name(document: &CharacterDocument) -> String {
    if document.name.is_empty() {
        UNNAMED_CHARACTER.to_string()
    } else {
        document.name.clone()
    }
}

/// Ordered slot list, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotList {
    slots: Vec<SavedSlot>,
}

impl SlotList {
    pub fn from_slots(slots: Vec<SavedSlot>) -> Self {
        Self { slots }
    }

    pub fn into_slots(self) -> Vec<SavedSlot> {
        self.slots
    }

    pub fn slots(&self) -> &[SavedSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&SavedSlot> {
        self.slots.iter().find(|s| s.name == name)
    }

    /// Save `document`, replacing a slot of the same name in place
    ///
    /// New slots are appended; once more than `limit` exist the oldest are
    /// evicted. Returns the slot name.
    pub fn upsert(&mut self, document: &CharacterDocument, limit: usize) -> String {
        let slot = SavedSlot::new(document);
        let name = slot.name.clone();

        match self.slots.iter().position(|s| s.name == name) {
            Some(index) => self.slots[index] = slot,
            None => {
                self.slots.push(slot);
                let excess = self.slots.len().saturating_sub(limit.max(1));
                self.slots.drain(..excess);
            }
        }

        name
    }

    /// Remove the slot called `name`, returning whether one existed
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.slots.len();
        self.slots.retain(|s| s.name != name);
        self.slots.len() != before
    }
}
