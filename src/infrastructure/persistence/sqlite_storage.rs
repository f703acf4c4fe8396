use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::debug;

use crate::application::dto::SavedSlot;
use crate::application::ports::outbound::{CharacterStoragePort, StorageError};

const CURRENT_CHARACTER_KEY: &str = "molCharacter";
const SAVED_CHARACTERS_KEY: &str = "molSavedCharacters";

/// Character storage in a SQLite key/value table
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open (creating if needed) the database at `database_url`
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        // One long-lived connection; in-memory databases vanish with it
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(database_url)
            .await?;
        Self::new(pool).await
    }

    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS tracker_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
        "#).execute(&pool).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM tracker_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(row.map(|(value,)| value))
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query("INSERT OR REPLACE INTO tracker_store (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl CharacterStoragePort for SqliteStorage {
    async fn save_current(&self, data: &str) -> Result<(), StorageError> {
        self.put(CURRENT_CHARACTER_KEY, data).await
    }

    async fn load_current(&self) -> Result<Option<String>, StorageError> {
        self.get(CURRENT_CHARACTER_KEY).await
    }

    async fn load_slots(&self) -> Result<Vec<SavedSlot>, StorageError> {
        match self.get(SAVED_CHARACTERS_KEY).await? {
            Some(text) => serde_json::from_str(&text)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn store_slots(&self, slots: &[SavedSlot]) -> Result<(), StorageError> {
        let text = serde_json::to_string(slots)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.put(SAVED_CHARACTERS_KEY, &text).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM tracker_store WHERE key IN (?, ?)")
            .bind(CURRENT_CHARACTER_KEY)
            .bind(SAVED_CHARACTERS_KEY)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        debug!(rows = result.rows_affected(), "Cleared tracker store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CharacterDocument;

    async fn memory_storage() -> SqliteStorage {
        SqliteStorage::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_current_character() {
        let storage = memory_storage().await;
        assert_eq!(storage.load_current().await.unwrap(), None);

        storage.save_current("first").await.unwrap();
        storage.save_current("second").await.unwrap();
        assert_eq!(storage.load_current().await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_slots_round_trip() {
        let storage = memory_storage().await;
        assert!(storage.load_slots().await.unwrap().is_empty());

        let slots = vec![
            SavedSlot::new(&CharacterDocument::new("Aria")),
            SavedSlot::new(&CharacterDocument::new("Brannoc")),
        ];
        storage.store_slots(&slots).await.unwrap();

        assert_eq!(storage.load_slots().await.unwrap(), slots);
    }

    #[tokio::test]
    async fn test_corrupt_slot_list() {
        let storage = memory_storage().await;
        storage.put(SAVED_CHARACTERS_KEY, "not json").await.unwrap();

        assert!(matches!(
            storage.load_slots().await,
            Err(StorageError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_clear() {
        let storage = memory_storage().await;
        storage.save_current("data").await.unwrap();
        storage
            .store_slots(&[SavedSlot::new(&CharacterDocument::new("Aria"))])
            .await
            .unwrap();

        storage.clear().await.unwrap();
        assert_eq!(storage.load_current().await.unwrap(), None);
        assert!(storage.load_slots().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_database_persists_across_connections() {
        let dir = tempfile::TempDir::new().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("tracker.db").display());

        {
            let storage = SqliteStorage::connect(&url).await.unwrap();
            storage.save_current("kept").await.unwrap();
            storage.pool().close().await;
        }

        let storage = SqliteStorage::connect(&url).await.unwrap();
        assert_eq!(storage.load_current().await.unwrap().as_deref(), Some("kept"));
    }
}
