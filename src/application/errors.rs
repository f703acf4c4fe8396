//! Application errors - Everything a session operation can fail with

use thiserror::Error;

use crate::application::dto::PersistError;
use crate::application::ports::outbound::StorageError;
use crate::domain::aggregates::HistoryError;
use crate::domain::services::SkillTreeError;
use crate::domain::value_objects::{CatalogKey, SkillId};

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Skill not found: {0}")]
    NotFound(SkillId),

    #[error("{name} is already learned")]
    DuplicateSkill { name: String },

    #[error("Unknown catalog domain: {0}")]
    UnknownCatalogEntry(CatalogKey),

    #[error("{0}")]
    Validation(String),

    #[error("No actions to undo")]
    EmptyHistory,

    #[error("Saved character not found: {0}")]
    SlotNotFound(String),

    #[error("Character file error: {0}")]
    Persist(#[from] PersistError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl TrackerError {
    /// Whether the error came from rejected input rather than a failure
    ///
    /// Covers blank names and character files missing required fields.
    pub fn is_validation(&self) -> bool {
        match self {
            TrackerError::Validation(_) => true,
            TrackerError::Persist(e) => e.is_validation(),
            _ => false,
        }
    }
}

impl From<SkillTreeError> for TrackerError {
    fn from(err: SkillTreeError) -> Self {
        match err {
            SkillTreeError::NotFound(id) => TrackerError::NotFound(id),
            SkillTreeError::DuplicateSkill { name } => TrackerError::DuplicateSkill { name },
            SkillTreeError::UnknownCatalogEntry(key) => TrackerError::UnknownCatalogEntry(key),
            SkillTreeError::Validation(msg) => TrackerError::Validation(msg),
        }
    }
}

impl From<HistoryError> for TrackerError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::Empty => TrackerError::EmptyHistory,
        }
    }
}
