//! Save Service - Encodes characters and manages the saved-slot list
//!
//! Sits between the session and a [`CharacterStoragePort`]: the current
//! character goes through the character-file encoding, slots go through the
//! [`SlotList`] overwrite and eviction policy.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::dto::{character_file, CharacterFile, SavedSlot, SlotList};
use crate::application::errors::TrackerError;
use crate::application::ports::outbound::CharacterStoragePort;
use crate::domain::entities::CharacterDocument;

pub struct SaveService {
    storage: Arc<dyn CharacterStoragePort>,
    slot_limit: usize,
}

impl SaveService {
    pub fn new(storage: Arc<dyn CharacterStoragePort>, slot_limit: usize) -> Self {
        Self {
            storage,
            slot_limit: slot_limit.max(1),
        }
    }

    pub fn slot_limit(&self) -> usize {
        self.slot_limit
    }

    /// Persist the current character
    pub async fn save_current(&self, document: &CharacterDocument) -> Result<(), TrackerError> {
        let text = CharacterFile::local(document).to_json()?;
        self.storage.save_current(&text).await?;
        debug!(name = %document.name, skills = document.skills.len(), "Saved current character");
        Ok(())
    }

    /// Load the current character, if one was ever saved
    pub async fn load_current(&self) -> Result<Option<CharacterDocument>, TrackerError> {
        match self.storage.load_current().await? {
            Some(text) => Ok(Some(character_file::deserialize(&text)?)),
            None => Ok(None),
        }
    }

    pub async fn list_slots(&self) -> Result<Vec<SavedSlot>, TrackerError> {
        Ok(self.storage.load_slots().await?)
    }

    /// Save `document` into a named slot, returning the slot name
    #[instrument(skip(self, document), fields(name = %document.name))]
    pub async fn save_slot(&self, document: &CharacterDocument) -> Result<String, TrackerError> {
        let mut slots = SlotList::from_slots(self.storage.load_slots().await?);
        let name = slots.upsert(document, self.slot_limit);
        self.storage.store_slots(slots.slots()).await?;

        info!(slot = %name, total = slots.len(), "Saved character slot");
        Ok(name)
    }

    pub async fn load_slot(&self, name: &str) -> Result<CharacterDocument, TrackerError> {
        let slots = SlotList::from_slots(self.storage.load_slots().await?);
        slots
            .find(name)
            .map(|slot| slot.data.clone())
            .ok_or_else(|| TrackerError::SlotNotFound(name.to_string()))
    }

    /// Remove a named slot, returning whether it existed
    #[instrument(skip(self))]
    pub async fn delete_slot(&self, name: &str) -> Result<bool, TrackerError> {
        let mut slots = SlotList::from_slots(self.storage.load_slots().await?);
        if !slots.remove(name) {
            debug!("No slot to delete");
            return Ok(false);
        }
        self.storage.store_slots(slots.slots()).await?;
        info!("Deleted character slot");
        Ok(true)
    }

    pub async fn clear_all(&self) -> Result<(), TrackerError> {
        self.storage.clear().await?;
        info!("Cleared all stored character data");
        Ok(())
    }
}
