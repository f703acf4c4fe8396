//! Character file - The persisted form of a character document
//!
//! Files are pretty-printed JSON: the document's fields at the top level plus
//! a `version` marker and a timestamp. Importing requires `name` and `skills`
//! to be present; everything else falls back to defaults.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::entities::CharacterDocument;

/// Current character file format version
pub const FORMAT_VERSION: &str = "1.0";

const REQUIRED_FIELDS: [&str; 2] = ["name", "skills"];

/// Errors from encoding or decoding character files
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid character file format")]
    InvalidFormat,

    #[error("Invalid character file format: missing `{0}`")]
    MissingField(&'static str),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        expected: &'static str,
        found: String,
    },
}

impl PersistError {
    /// Whether the text parsed but failed structural validation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PersistError::InvalidFormat
                | PersistError::MissingField(_)
                | PersistError::VersionMismatch { .. }
        )
    }
}

/// Serialized envelope around a character document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterFile<'a> {
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub character: &'a CharacterDocument,
}

impl<'a> CharacterFile<'a> {
    /// Envelope for a file export
    pub fn export(character: &'a CharacterDocument) -> Self {
        Self {
            version: FORMAT_VERSION,
            exported_at: Some(Utc::now()),
            last_saved: None,
            character,
        }
    }

    /// Envelope for the auto-saved current character
    pub fn local(character: &'a CharacterDocument) -> Self {
        Self {
            version: FORMAT_VERSION,
            exported_at: None,
            last_saved: Some(Utc::now()),
            character,
        }
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Encode a document for export
pub fn serialize(document: &CharacterDocument) -> Result<String, PersistError> {
    CharacterFile::export(document).to_json()
}

/// Decode and validate a character file
pub fn deserialize(text: &str) -> Result<CharacterDocument, PersistError> {
    let value: Value = serde_json::from_str(text)?;
    let object = value.as_object().ok_or(PersistError::InvalidFormat)?;

    for field in REQUIRED_FIELDS {
        if !object.contains_key(field) {
            return Err(PersistError::MissingField(field));
        }
    }

    if let Some(version) = object.get("version") {
        check_version(version)?;
    }

    Ok(serde_json::from_value(value)?)
}

fn check_version(version: &Value) -> Result<(), PersistError> {
    let supported = match version {
        Value::String(s) => s.split('.').next() == Some("1"),
        Value::Number(n) => n.as_u64() == Some(1),
        _ => false,
    };

    if supported {
        Ok(())
    } else {
        Err(PersistError::VersionMismatch {
            expected: FORMAT_VERSION,
            found: version.to_string(),
        })
    }
}

/// File name used when exporting a character
///
/// Everything but ASCII letters and digits becomes `_`, then the name is
/// lowercased.
pub fn export_file_name(character_name: &str) -> String {
    let sanitized: String = character_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_character.json", sanitized.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Skill;
    use crate::domain::value_objects::SkillType;

    fn sample_document() -> CharacterDocument {
        let mut doc = CharacterDocument::new("Aria Vell");
        doc.current_health = 130;
        doc.bloodline = "Stormborn".to_string();
        doc.knowledge = "Old Imperial script".to_string();
        let shaping = Skill::new("Shaping", SkillType::Domain, 2).with_magical(true);
        let mut bolt = Skill::new("Mana Bolt", SkillType::Spell, -1)
            .with_parent(shaping.id.clone())
            .with_magical(true);
        bolt.xp = 40;
        bolt.channeled = true;
        let custom = Skill::new("Juggling", SkillType::General, 0)
            .as_custom()
            .with_description("Three balls");
        doc.skills = vec![shaping, bolt, custom];
        doc
    }

    #[test]
    fn test_export_is_lossless_and_versioned() {
        let doc = sample_document();
        let text = serialize(&doc).unwrap();

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], FORMAT_VERSION);
        assert!(value.get("exportedAt").is_some());
        assert_eq!(value["currentHealth"], 130);
        assert_eq!(value["skills"][1]["type"], "spell");

        assert_eq!(deserialize(&text).unwrap(), doc);
    }

    #[test]
    fn test_local_envelope_marks_last_saved() {
        let doc = sample_document();
        let text = CharacterFile::local(&doc).to_json().unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert!(value.get("lastSaved").is_some());
        assert!(value.get("exportedAt").is_none());
        assert_eq!(deserialize(&text).unwrap(), doc);
    }

    #[test]
    fn test_missing_skills_is_a_validation_error() {
        let err = deserialize(r#"{"name": "Aria", "maxHealth": 90}"#).unwrap_err();
        assert!(matches!(err, PersistError::MissingField("skills")));
        assert!(err.is_validation());
    }

    #[test]
    fn test_missing_name_is_a_validation_error() {
        let err = deserialize(r#"{"skills": []}"#).unwrap_err();
        assert!(matches!(err, PersistError::MissingField("name")));
    }

    #[test]
    fn test_malformed_json_is_not_a_validation_error() {
        let err = deserialize("{not json").unwrap_err();
        assert!(matches!(err, PersistError::Json(_)));
        assert!(!err.is_validation());

        assert!(matches!(
            deserialize("[1, 2]").unwrap_err(),
            PersistError::InvalidFormat
        ));
    }

    #[test]
    fn test_optional_fields_fall_back_to_defaults() {
        let doc = deserialize(r#"{"name": "Aria", "skills": []}"#).unwrap();
        assert_eq!(doc.current_health, 100);
        assert_eq!(doc.max_health, 100);
        assert!(doc.bloodline.is_empty());
    }

    #[test]
    fn test_version_check() {
        assert!(deserialize(r#"{"version": 1, "name": "A", "skills": []}"#).is_ok());
        assert!(deserialize(r#"{"version": "1.3", "name": "A", "skills": []}"#).is_ok());

        let err = deserialize(r#"{"version": "2.0", "name": "A", "skills": []}"#).unwrap_err();
        assert!(matches!(err, PersistError::VersionMismatch { .. }));
    }

    #[test]
    fn test_legacy_non_magical_type_is_accepted() {
        let id = uuid::Uuid::new_v4();
        let text = format!(
            r#"{{"name": "A", "skills": [{{"id": "{id}", "name": "Herbalism", "type": "non-magical", "level": 1}}]}}"#
        );
        let doc = deserialize(&text).unwrap();
        assert_eq!(doc.skills[0].skill_type, SkillType::General);
        assert_eq!(doc.skills[0].xp, 0);
        assert_eq!(doc.skills[0].parent, None);
    }

    #[test]
    fn test_timestamped_ids_and_catalog_key_parents_load() {
        let text = r#"{
            "name": "Aria",
            "currentHealth": 100,
            "maxHealth": 100,
            "bloodline": "",
            "knowledge": "",
            "skills": [
                {"id": "shaping_1712345678901", "name": "Shaping", "level": 0, "xp": 0,
                 "type": "domain", "parent": null, "magical": true},
                {"id": "mana_bolt_1712345678901", "name": "Mana Bolt", "level": 0, "xp": 0,
                 "type": "spell", "parent": "shaping", "magical": true}
            ],
            "version": "1.0",
            "exportedAt": "2024-04-05T12:00:00.000Z"
        }"#;

        let doc = deserialize(text).unwrap();
        let shaping = &doc.skills[0];
        let bolt = &doc.skills[1];
        assert!(shaping.id.is_legacy());
        assert_eq!(shaping.id.to_string(), "shaping_1712345678901");
        assert_eq!(bolt.parent.as_ref().map(|p| p.to_string()).as_deref(), Some("shaping"));

        // "shaping" names a catalog entry, not a learned skill
        let groups = crate::domain::services::skill_tree::group_by_domain(&doc.skills);
        assert_eq!(groups.domains.len(), 1);
        assert!(groups.domains[0].children.is_empty());
        assert_eq!(groups.orphaned, vec![bolt]);

        let value: Value = serde_json::from_str(&serialize(&doc).unwrap()).unwrap();
        assert_eq!(value["skills"][0]["id"], "shaping_1712345678901");
        assert_eq!(value["skills"][1]["id"], "mana_bolt_1712345678901");
        assert_eq!(value["skills"][1]["parent"], "shaping");
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("Aria Vell"), "aria_vell_character.json");
        assert_eq!(
            export_file_name("Bob's Hero!"),
            "bob_s_hero__character.json"
        );
    }
}
