//! Background auto-save worker and shutdown save
//!
//! Saves the session's current character on a fixed interval. The session
//! mutex serializes these saves with user actions.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::application::services::CharacterSession;

/// Spawn the auto-save loop; abort the handle to stop it
pub fn spawn_autosave(session: Arc<Mutex<CharacterSession>>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(interval_secs = period.as_secs(), "Starting auto-save worker");

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let mut session = session.lock().await;
            match session.save().await {
                Ok(()) => tracing::debug!("Auto-saved character"),
                Err(e) => tracing::error!("Auto-save failed: {}", e),
            }
        }
    })
}

/// Save the character one last time and export it into `export_dir`
///
/// Unnamed characters cannot be exported and are only saved. Returns the
/// export file path when one was written.
pub async fn save_on_shutdown(
    session: &Mutex<CharacterSession>,
    export_dir: &Path,
) -> Option<PathBuf> {
    let mut session = session.lock().await;
    if let Err(e) = session.save().await {
        tracing::error!("Final save failed: {}", e);
    }

    if session.document().name.trim().is_empty() {
        tracing::debug!("Character has no name, skipping shutdown export");
        return None;
    }

    if let Err(e) = tokio::fs::create_dir_all(export_dir).await {
        tracing::error!("Failed to create export dir {}: {}", export_dir.display(), e);
        return None;
    }

    match session.export_to_dir(export_dir).await {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::error!("Shutdown export failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::SaveService;
    use crate::domain::entities::CharacterField;
    use crate::domain::value_objects::SkillCatalog;
    use crate::infrastructure::persistence::InMemoryStorage;

    fn shared_session() -> (Arc<InMemoryStorage>, Mutex<CharacterSession>) {
        let storage = Arc::new(InMemoryStorage::new());
        let saves = SaveService::new(storage.clone(), 10);
        let session = CharacterSession::new(SkillCatalog::empty(), saves, 50);
        (storage, Mutex::new(session))
    }

    #[tokio::test(start_paused = true)]
    async fn test_autosave_writes_on_interval() {
        let storage = Arc::new(InMemoryStorage::new());
        let saves = SaveService::new(storage.clone(), 10);
        let session = Arc::new(Mutex::new(CharacterSession::new(
            SkillCatalog::empty(),
            saves,
            50,
        )));

        let handle = spawn_autosave(session.clone(), Duration::from_secs(30));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(storage.current().await.is_none());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(storage.current().await.is_some());
        assert_eq!(session.lock().await.status(), Some("Auto-saved"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_shutdown_exports_named_character() {
        let dir = tempfile::TempDir::new().unwrap();
        let export_dir = dir.path().join("exports");
        let (storage, session) = shared_session();
        session
            .lock()
            .await
            .edit_field(CharacterField::Name, "Aria Vell")
            .await;

        let path = save_on_shutdown(&session, &export_dir).await.unwrap();
        assert_eq!(path, export_dir.join("aria_vell_character.json"));
        assert!(tokio::fs::read_to_string(&path).await.unwrap().contains("Aria Vell"));
        assert!(storage.current().await.is_some());
    }

    #[tokio::test]
    async fn test_shutdown_skips_export_for_unnamed_character() {
        let dir = tempfile::TempDir::new().unwrap();
        let (storage, session) = shared_session();

        assert!(save_on_shutdown(&session, dir.path()).await.is_none());
        assert!(storage.current().await.is_some());
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }
}
