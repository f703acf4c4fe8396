use async_trait::async_trait;

use crate::application::dto::SavedSlot;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable storage for the current character and the saved-slot list
///
/// The current character is stored as encoded character-file text; slots are
/// stored as a whole ordered list.
#[async_trait]
pub trait CharacterStoragePort: Send + Sync {
    async fn save_current(&self, data: &str) -> Result<(), StorageError>;
    async fn load_current(&self) -> Result<Option<String>, StorageError>;
    async fn load_slots(&self) -> Result<Vec<SavedSlot>, StorageError>;
    async fn store_slots(&self, slots: &[SavedSlot]) -> Result<(), StorageError>;
    /// Remove the current character and every slot
    async fn clear(&self) -> Result<(), StorageError>;
}
