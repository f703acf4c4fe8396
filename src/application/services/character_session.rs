//! Character Session - The live character sheet and every user action on it
//!
//! A session owns the one mutable [`CharacterDocument`]. Each mutating action
//! runs the same sequence: apply to a working copy, record the prior state in
//! the undo history, commit, then save. A rejected action leaves both the
//! document and the history untouched. A failed save never rolls an action
//! back; it is logged and shown in the status line.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::dto::{character_file, export_file_name, SavedSlot};
use crate::application::errors::TrackerError;
use crate::application::ports::outbound::StorageError;
use crate::application::services::SaveService;
use crate::domain::aggregates::HistoryLog;
use crate::domain::entities::{CharacterDocument, CharacterField};
use crate::domain::services::skill_tree::{self, CustomSkill, NewSkill, SkillGroups, XpGain};
use crate::domain::services::{describe_skill, SkillDescription};
use crate::domain::value_objects::{CatalogItem, CatalogKey, SkillCatalog, SkillId, SkillType};

const NO_UNDO: &str = "No actions to undo";

pub struct CharacterSession {
    document: CharacterDocument,
    history: HistoryLog,
    catalog: Arc<SkillCatalog>,
    saves: SaveService,
    status: Option<String>,
}

impl CharacterSession {
    pub fn new(catalog: SkillCatalog, saves: SaveService, history_limit: usize) -> Self {
        Self {
            document: CharacterDocument::default(),
            history: HistoryLog::new(history_limit),
            catalog: Arc::new(catalog),
            saves,
            status: None,
        }
    }

    // ========================================================================
    // Read-only views
    // ========================================================================

    pub fn document(&self) -> &CharacterDocument {
        &self.document
    }

    /// Shared handle to the catalog
    ///
    /// Items browsed from it can be passed straight back to [`Self::learn`].
    pub fn catalog(&self) -> Arc<SkillCatalog> {
        Arc::clone(&self.catalog)
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Last status message, e.g. "Added skill: Fireball"
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn mana(&self) -> i32 {
        self.document.compute_mana()
    }

    pub fn skill_groups(&self) -> SkillGroups<'_> {
        skill_tree::group_by_domain(&self.document.skills)
    }

    pub fn undo_label(&self) -> String {
        match self.history.peek_description() {
            Some(description) => format!("Undo: {description}"),
            None => NO_UNDO.to_string(),
        }
    }

    /// Whether a browsed catalog entry is already learned
    ///
    /// A spell counts as learned only under its own domain.
    pub fn is_learned(&self, item: &CatalogItem<'_>) -> bool {
        let skills = &self.document.skills;
        let parent = match &item.parent_key {
            Some(key) if matches!(item.skill_type, SkillType::Spell | SkillType::AlchemySkill) => {
                let Some(domain) = self.catalog.domain(key) else {
                    return false;
                };
                match skills
                    .iter()
                    .find(|s| s.matches(&domain.name, SkillType::Domain, None))
                {
                    Some(learned) => Some(&learned.id),
                    None => return false,
                }
            }
            _ => None,
        };
        skill_tree::exists(skills, &item.entry.name, item.skill_type, parent)
    }

    pub fn describe(
        &self,
        name: &str,
        skill_type: SkillType,
        parent_key: Option<&CatalogKey>,
    ) -> SkillDescription {
        describe_skill(&self.catalog, &self.document.skills, name, skill_type, parent_key)
    }

    // ========================================================================
    // Startup
    // ========================================================================

    /// Load the auto-saved character, or start a fresh one
    ///
    /// A fresh character is granted the catalog's free domains and spells.
    /// Returns whether a saved character was restored.
    #[instrument(skip(self))]
    pub async fn restore(&mut self) -> bool {
        match self.saves.load_current().await {
            Ok(Some(document)) => {
                info!(
                    name = %document.name,
                    skills = document.skills.len(),
                    "Restored saved character"
                );
                self.document = document;
                self.set_status("Character loaded");
                true
            }
            Ok(None) => {
                debug!("No saved character, starting fresh");
                self.document.initialize_defaults(&self.catalog);
                false
            }
            Err(e) => {
                warn!(error = %e, "Error loading saved character, starting fresh");
                self.document.initialize_defaults(&self.catalog);
                self.set_status("Load failed");
                false
            }
        }
    }

    // ========================================================================
    // Skill actions
    // ========================================================================

    /// Learn a browsed catalog entry
    pub async fn learn(&mut self, item: &CatalogItem<'_>) -> Result<SkillId, TrackerError> {
        self.add_skill(NewSkill::from(item)).await
    }

    #[instrument(skip(self, new), fields(skill = %new.name, skill_type = %new.skill_type))]
    pub async fn add_skill(&mut self, new: NewSkill) -> Result<SkillId, TrackerError> {
        let name = new.name.clone();
        let result = self.apply(format!("Add skill: {name}"), |doc, catalog| {
            Ok(skill_tree::add_skill(&mut doc.skills, catalog, new)?)
        });
        let id = self.check(result)?;

        info!(%id, "Skill added");
        self.set_status(format!("Added skill: {name}"));
        self.persist().await;
        Ok(id)
    }

    #[instrument(skip(self, custom), fields(skill = %custom.name))]
    pub async fn add_custom_skill(&mut self, custom: CustomSkill) -> Result<SkillId, TrackerError> {
        let name = custom.name.trim().to_string();
        let result = self.apply(format!("Add custom skill: {name}"), |doc, _| {
            Ok(skill_tree::add_custom_skill(&mut doc.skills, custom)?)
        });
        let id = self.check(result)?;

        info!(%id, "Custom skill added");
        self.set_status(format!("Added custom skill: {name}"));
        self.persist().await;
        Ok(id)
    }

    /// Delete a skill and its direct children
    #[instrument(skip(self))]
    pub async fn delete_skill(&mut self, id: &SkillId) -> Result<(), TrackerError> {
        let name = self.skill_name(id)?;
        let removed = self.apply(format!("Delete skill: {name}"), |doc, _| {
            Ok(skill_tree::delete_skill(&mut doc.skills, id)?)
        })?;

        info!(skill = %name, removed = removed.len(), "Skill deleted");
        self.set_status(format!("Deleted skill: {name}"));
        self.persist().await;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn add_xp(&mut self, id: &SkillId, amount: u32) -> Result<XpGain, TrackerError> {
        if amount == 0 {
            let err = TrackerError::Validation("Please enter a positive amount of XP.".to_string());
            return self.check(Err(err));
        }

        let name = self.skill_name(id)?;
        let gain = self.apply(format!("Add {amount} XP to {name}"), |doc, _| {
            Ok(skill_tree::add_xp(&mut doc.skills, id, amount)?)
        })?;

        if gain.leveled_up {
            info!(skill = %name, level = gain.new_level, "Skill leveled up");
            self.set_status(format!("{name} leveled up to {}!", gain.new_level));
        } else {
            debug!(skill = %name, xp = gain.new_xp, "XP added");
            self.set_status(format!("Added {amount} XP to {name}"));
        }
        self.persist().await;
        Ok(gain)
    }

    // ========================================================================
    // Sheet actions
    // ========================================================================

    /// Assign a top-level field from raw input text
    #[instrument(skip(self, value))]
    pub async fn edit_field(&mut self, field: CharacterField, value: &str) {
        self.history.record(format!("Edit {field}"), &self.document);
        self.document.apply_field_edit(field, value);
        debug!("Field edited");
        self.persist().await;
    }

    /// Revert the most recent action
    ///
    /// Returns the description of the reverted action.
    #[instrument(skip(self))]
    pub async fn undo(&mut self) -> Result<String, TrackerError> {
        let result = self
            .history
            .undo(&mut self.document)
            .map_err(TrackerError::from);
        let description = self.check(result)?;

        info!(action = %description, "Undid action");
        self.set_status(format!("Undid: {description}"));
        self.persist().await;
        Ok(description)
    }

    /// Replace the sheet with a blank character holding only free skills
    #[instrument(skip(self))]
    pub async fn new_character(&mut self) {
        self.history.record("Create new character", &self.document);
        self.document.reset();
        self.document.initialize_defaults(&self.catalog);

        info!("Created new character");
        self.set_status("Created new character");
        self.persist().await;
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Save the current character, reporting failure to the caller
    pub async fn save(&mut self) -> Result<(), TrackerError> {
        match self.saves.save_current(&self.document).await {
            Ok(()) => {
                self.set_status("Auto-saved");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Error saving character");
                self.set_status("Save failed");
                Err(e)
            }
        }
    }

    /// Store the character in a named slot, returning the slot name
    #[instrument(skip(self))]
    pub async fn save_to_slot(&mut self) -> Result<String, TrackerError> {
        let result = self.saves.save_slot(&self.document).await;
        let name = self.check(result)?;
        self.set_status(format!("Saved character: {name}"));
        Ok(name)
    }

    pub async fn list_slots(&self) -> Result<Vec<SavedSlot>, TrackerError> {
        self.saves.list_slots().await
    }

    /// Replace the sheet with a saved slot
    #[instrument(skip(self))]
    pub async fn load_slot(&mut self, name: &str) -> Result<(), TrackerError> {
        let result = self.saves.load_slot(name).await;
        let document = self.check(result)?;

        self.replace_document(format!("Load character: {name}"), document);
        info!("Loaded character slot");
        self.set_status(format!("Loaded character: {name}"));
        self.persist().await;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_slot(&mut self, name: &str) -> Result<bool, TrackerError> {
        let result = self.saves.delete_slot(name).await;
        let deleted = self.check(result)?;
        if deleted {
            self.set_status(format!("Deleted saved character: {name}"));
        }
        Ok(deleted)
    }

    /// Replace the sheet with an imported character file
    ///
    /// Invalid files are rejected before anything changes.
    #[instrument(skip(self, text))]
    pub async fn import_text(&mut self, text: &str) -> Result<(), TrackerError> {
        let result = character_file::deserialize(text).map_err(TrackerError::from);
        let document = self.check(result)?;
        let name = document.name.clone();

        self.replace_document("Load character from file", document);
        info!(name = %name, "Imported character");
        self.set_status(format!("Loaded character: {name}"));
        self.persist().await;
        Ok(())
    }

    /// Encode the character for export
    ///
    /// Characters must be named before they can be exported.
    pub fn export_text(&self) -> Result<String, TrackerError> {
        if self.document.name.trim().is_empty() {
            return Err(TrackerError::Validation(
                "Please enter a character name before saving.".to_string(),
            ));
        }
        Ok(character_file::serialize(&self.document)?)
    }

    /// Save, then write an export file into `dir`
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub async fn export_to_dir(&mut self, dir: &Path) -> Result<PathBuf, TrackerError> {
        let result = self.export_text();
        let text = self.check(result)?;
        self.persist().await;

        let path = dir.join(export_file_name(&self.document.name));
        let result = tokio::fs::write(&path, text)
            .await
            .map_err(|e| TrackerError::Storage(StorageError::Io(e.to_string())));
        self.check(result)?;

        info!(path = %path.display(), "Exported character");
        self.set_status(format!("Exported character: {}", self.document.name));
        Ok(path)
    }

    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn import_from_file(&mut self, path: &Path) -> Result<(), TrackerError> {
        let result = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| TrackerError::Storage(StorageError::Io(e.to_string())));
        let text = self.check(result)?;
        self.import_text(&text).await
    }

    /// Wipe stored characters and slots, then start a new character
    #[instrument(skip(self))]
    pub async fn clear_all_data(&mut self) -> Result<(), TrackerError> {
        let result = self.saves.clear_all().await;
        self.check(result)?;
        self.new_character().await;
        self.set_status("All data cleared");
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Run `action` on a working copy and commit it only on success
    fn apply<T>(
        &mut self,
        description: String,
        action: impl FnOnce(&mut CharacterDocument, &SkillCatalog) -> Result<T, TrackerError>,
    ) -> Result<T, TrackerError> {
        let mut draft = self.document.clone();
        let value = action(&mut draft, self.catalog.as_ref())?;

        self.history.record(description, &self.document);
        self.document = draft;
        Ok(value)
    }

    fn replace_document(&mut self, description: impl Into<String>, document: CharacterDocument) {
        self.history.record(description, &self.document);
        self.document = document;
    }

    fn skill_name(&mut self, id: &SkillId) -> Result<String, TrackerError> {
        let result = skill_tree::find(&self.document.skills, id)
            .map(|s| s.name.clone())
            .ok_or_else(|| TrackerError::NotFound(id.clone()));
        self.check(result)
    }

    /// Report a rejected action in the status line
    ///
    /// Unknown skill ids are stale UI references and stay silent.
    fn check<T>(&mut self, result: Result<T, TrackerError>) -> Result<T, TrackerError> {
        match &result {
            Err(TrackerError::NotFound(id)) => debug!(%id, "Skill not found, nothing to do"),
            Err(e) => {
                debug!(error = %e, "Action rejected");
                self.status = Some(e.to_string());
            }
            Ok(_) => {}
        }
        result
    }

    async fn persist(&mut self) {
        if let Err(e) = self.saves.save_current(&self.document).await {
            warn!(error = %e, "Error saving character");
            self.set_status("Save failed");
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::DEFAULT_SLOT_LIMIT;
    use crate::domain::aggregates::DEFAULT_HISTORY_LIMIT;
    use crate::domain::services::ParentRef;
    use crate::domain::value_objects::{sample_catalog, CatalogSection};
    use crate::infrastructure::persistence::InMemoryStorage;

    fn session_with(catalog: SkillCatalog) -> (Arc<InMemoryStorage>, CharacterSession) {
        let storage = Arc::new(InMemoryStorage::new());
        let saves = SaveService::new(storage.clone(), DEFAULT_SLOT_LIMIT);
        let session = CharacterSession::new(catalog, saves, DEFAULT_HISTORY_LIMIT);
        (storage, session)
    }

    async fn fresh_session() -> (Arc<InMemoryStorage>, CharacterSession) {
        let (storage, mut session) = session_with(sample_catalog());
        session.restore().await;
        (storage, session)
    }

    #[tokio::test]
    async fn test_restore_without_save_grants_free_skills() {
        let (_, mut session) = session_with(sample_catalog());
        assert!(!session.restore().await);

        let names: Vec<_> = session
            .document()
            .skills
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Shaping", "Mana Bolt"]);
        assert_eq!(session.mana(), 150);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_restore_loads_saved_character() {
        let (storage, mut first) = fresh_session().await;
        first
            .edit_field(CharacterField::Name, "Aria")
            .await;

        let saves = SaveService::new(storage, DEFAULT_SLOT_LIMIT);
        let mut second = CharacterSession::new(sample_catalog(), saves, DEFAULT_HISTORY_LIMIT);
        assert!(second.restore().await);
        assert_eq!(second.document(), first.document());
        assert_eq!(second.status(), Some("Character loaded"));
    }

    #[tokio::test]
    async fn test_learn_spell_materializes_domain() {
        let (_, mut session) = fresh_session().await;
        let catalog = session.catalog();
        let items = catalog.browse(CatalogSection::Magical, "fireball", None);
        assert!(!session.is_learned(&items[0]));

        session.learn(&items[0]).await.unwrap();

        assert!(session.is_learned(&items[0]));
        let groups = session.skill_groups();
        let fire = groups
            .domains
            .iter()
            .find(|g| g.domain.name == "Fire")
            .unwrap();
        assert_eq!(fire.children.len(), 1);
        assert_eq!(fire.children[0].name, "Fireball");
        assert_eq!(session.undo_label(), "Undo: Add skill: Fireball");
        assert_eq!(session.status(), Some("Added skill: Fireball"));
    }

    #[tokio::test]
    async fn test_duplicate_add_leaves_history_untouched() {
        let (_, mut session) = fresh_session().await;
        let new = NewSkill::new("Barrier", SkillType::Spell, 0)
            .under(ParentRef::CatalogDomain("shaping".into()));

        session.add_skill(new.clone()).await.unwrap();
        let before = session.document().clone();
        let history_len = session.history().len();

        let err = session.add_skill(new).await.unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateSkill { .. }));
        assert_eq!(session.document(), &before);
        assert_eq!(session.history().len(), history_len);
        assert_eq!(session.status(), Some("Barrier is already learned"));
    }

    #[tokio::test]
    async fn test_empty_catalog_rejects_catalog_adds() {
        let (_, mut session) = session_with(SkillCatalog::empty());
        session.restore().await;

        let err = session
            .add_skill(
                NewSkill::new("Mana Bolt", SkillType::Spell, 0)
                    .under(ParentRef::CatalogDomain("shaping".into())),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::UnknownCatalogEntry(_)));
        assert!(session.document().skills.is_empty());

        // Custom skills still work without a catalog
        session
            .add_custom_skill(CustomSkill {
                name: "Juggling".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(session.document().skills.len(), 1);
    }

    #[tokio::test]
    async fn test_undo_walks_back_through_actions() {
        let (_, mut session) = fresh_session().await;
        let d0 = session.document().clone();

        let id = session
            .add_skill(NewSkill::new("Swords", SkillType::Weapon, 0))
            .await
            .unwrap();
        let d1 = session.document().clone();

        let gain = session.add_xp(&id, 150).await.unwrap();
        assert!(gain.leveled_up);
        assert_eq!(session.status(), Some("Swords leveled up to 1!"));
        assert_eq!(session.undo_label(), "Undo: Add 150 XP to Swords");

        assert_eq!(session.undo().await.unwrap(), "Add 150 XP to Swords");
        assert_eq!(session.document(), &d1);
        assert_eq!(session.undo().await.unwrap(), "Add skill: Swords");
        assert_eq!(session.document(), &d0);

        assert!(matches!(
            session.undo().await,
            Err(TrackerError::EmptyHistory)
        ));
        assert_eq!(session.undo_label(), "No actions to undo");
    }

    #[tokio::test]
    async fn test_delete_skill() {
        let (_, mut session) = fresh_session().await;
        let shaping = session.document().skills[0].id.clone();

        session.delete_skill(&shaping).await.unwrap();
        assert!(session.document().skills.is_empty());
        assert_eq!(session.undo_label(), "Undo: Delete skill: Shaping");

        let status = session.status().map(str::to_string);
        let missing = SkillId::new();
        assert!(matches!(
            session.delete_skill(&missing).await,
            Err(TrackerError::NotFound(_))
        ));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.status().map(str::to_string), status);
    }

    #[tokio::test]
    async fn test_zero_xp_is_rejected() {
        let (_, mut session) = fresh_session().await;
        let id = session.document().skills[0].id.clone();

        let err = session.add_xp(&id, 0).await.unwrap_err();
        assert!(err.is_validation());
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_edit_field_is_undoable() {
        let (_, mut session) = fresh_session().await;
        session.edit_field(CharacterField::MaxHealth, "140").await;
        assert_eq!(session.document().max_health, 140);
        assert_eq!(session.undo_label(), "Undo: Edit max health");

        session.undo().await.unwrap();
        assert_eq!(session.document().max_health, 100);
    }

    #[tokio::test]
    async fn test_new_character() {
        let (_, mut session) = fresh_session().await;
        session.edit_field(CharacterField::Name, "Aria").await;
        session
            .add_skill(NewSkill::new("Swords", SkillType::Weapon, 0))
            .await
            .unwrap();

        session.new_character().await;
        assert!(session.document().name.is_empty());
        assert_eq!(session.document().skills.len(), 2);

        session.undo().await.unwrap();
        assert_eq!(session.document().name, "Aria");
    }

    #[tokio::test]
    async fn test_import_missing_skills_leaves_document_unchanged() {
        let (_, mut session) = fresh_session().await;
        let before = session.document().clone();

        let err = session
            .import_text(r#"{"name": "Intruder", "currentHealth": 5}"#)
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(session.document(), &before);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_import_replaces_document_and_is_undoable() {
        let (_, mut session) = fresh_session().await;
        let before = session.document().clone();

        let mut other = CharacterDocument::new("Brannoc");
        other.max_health = 80;
        let text = character_file::serialize(&other).unwrap();

        session.import_text(&text).await.unwrap();
        assert_eq!(session.document(), &other);
        assert_eq!(session.undo_label(), "Undo: Load character from file");

        session.undo().await.unwrap();
        assert_eq!(session.document(), &before);
    }

    #[tokio::test]
    async fn test_import_file_with_timestamped_ids() {
        let (_, mut session) = fresh_session().await;
        let text = r#"{"name": "Aria", "skills": [
            {"id": "swords_1712345678901", "name": "Swords", "level": 1, "xp": 20, "type": "weapon", "parent": null}
        ], "version": "1.0"}"#;

        session.import_text(text).await.unwrap();
        let id = SkillId::parse("swords_1712345678901");
        assert_eq!(session.document().skills[0].id, id);

        session.add_xp(&id, 30).await.unwrap();
        assert_eq!(session.document().skills[0].xp, 50);
        session.delete_skill(&id).await.unwrap();
        assert!(session.document().skills.is_empty());
    }

    #[tokio::test]
    async fn test_export_requires_name() {
        let (_, mut session) = fresh_session().await;
        assert!(matches!(
            session.export_text(),
            Err(TrackerError::Validation(_))
        ));

        session.edit_field(CharacterField::Name, "Aria").await;
        let text = session.export_text().unwrap();
        assert_eq!(
            character_file::deserialize(&text).unwrap(),
            *session.document()
        );
    }

    #[tokio::test]
    async fn test_export_and_import_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let (_, mut session) = fresh_session().await;
        session.edit_field(CharacterField::Name, "Aria Vell").await;

        let path = session.export_to_dir(dir.path()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "aria_vell_character.json");
        let exported = session.document().clone();

        session.new_character().await;
        session.import_from_file(&path).await.unwrap();
        assert_eq!(session.document(), &exported);

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            session.import_from_file(&missing).await,
            Err(TrackerError::Storage(StorageError::Io(_)))
        ));
    }

    #[tokio::test]
    async fn test_slots() {
        let (_, mut session) = fresh_session().await;
        session.edit_field(CharacterField::Name, "Aria").await;
        assert_eq!(session.save_to_slot().await.unwrap(), "Aria");

        session.new_character().await;
        assert_eq!(session.save_to_slot().await.unwrap(), "Unnamed Character");
        assert_eq!(session.list_slots().await.unwrap().len(), 2);

        session.load_slot("Aria").await.unwrap();
        assert_eq!(session.document().name, "Aria");
        assert_eq!(session.undo_label(), "Undo: Load character: Aria");

        assert!(matches!(
            session.load_slot("Nobody").await,
            Err(TrackerError::SlotNotFound(_))
        ));
        assert!(session.delete_slot("Aria").await.unwrap());
        assert_eq!(session.list_slots().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_failure_does_not_fail_the_action() {
        let (storage, mut session) = fresh_session().await;
        storage.set_fail_writes(true);

        let id = session
            .add_skill(NewSkill::new("Swords", SkillType::Weapon, 0))
            .await
            .unwrap();
        assert!(skill_tree::exists(
            &session.document().skills,
            "Swords",
            SkillType::Weapon,
            None
        ));
        assert!(session.document().skills.iter().any(|s| s.id == id));
        assert_eq!(session.status(), Some("Save failed"));

        assert!(session.save().await.is_err());
    }

    #[tokio::test]
    async fn test_actions_are_persisted() {
        let (storage, mut session) = fresh_session().await;
        session.edit_field(CharacterField::Bloodline, "Stormborn").await;

        let text = storage.current().await.unwrap();
        let saved = character_file::deserialize(&text).unwrap();
        assert_eq!(saved.bloodline, "Stormborn");
    }

    #[tokio::test]
    async fn test_clear_all_data() {
        let (storage, mut session) = fresh_session().await;
        session.edit_field(CharacterField::Name, "Aria").await;
        session.save_to_slot().await.unwrap();

        session.clear_all_data().await.unwrap();

        assert!(session.list_slots().await.unwrap().is_empty());
        assert!(session.document().name.is_empty());
        assert_eq!(session.status(), Some("All data cleared"));
        // The fresh character is saved again right away
        assert!(storage.current().await.is_some());
    }

    #[tokio::test]
    async fn test_describe() {
        let (_, session) = fresh_session().await;
        let desc = session.describe("Shaping", SkillType::Domain, None);
        assert_eq!(desc.description, "Raw manipulation of mana");
    }
}
