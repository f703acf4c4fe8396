use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::dto::SavedSlot;
use crate::application::ports::outbound::{CharacterStoragePort, StorageError};

/// Process-local character storage
///
/// Writes can be made to fail on demand to exercise save-failure handling.
#[derive(Default)]
pub struct InMemoryStorage {
    current: RwLock<Option<String>>,
    slots: RwLock<Vec<SavedSlot>>,
    fail_writes: AtomicBool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The stored current-character text
    pub async fn current(&self) -> Option<String> {
        self.current.read().await.clone()
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("storage is read-only".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CharacterStoragePort for InMemoryStorage {
    async fn save_current(&self, data: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        *self.current.write().await = Some(data.to_string());
        Ok(())
    }

    async fn load_current(&self) -> Result<Option<String>, StorageError> {
        Ok(self.current.read().await.clone())
    }

    async fn load_slots(&self) -> Result<Vec<SavedSlot>, StorageError> {
        Ok(self.slots.read().await.clone())
    }

    async fn store_slots(&self, slots: &[SavedSlot]) -> Result<(), StorageError> {
        self.check_writable()?;
        *self.slots.write().await = slots.to_vec();
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.check_writable()?;
        *self.current.write().await = None;
        self.slots.write().await.clear();
        Ok(())
    }
}
