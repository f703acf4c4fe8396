//! Skill entity - A learned skill, spell, domain or technique

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{SkillId, SkillType};

fn is_false(value: &bool) -> bool {
    !*value
}

/// A skill the character has learned
///
/// Skills form a two-level hierarchy: domains own spells and techniques
/// through `parent`. The parent is not guaranteed to exist; a skill whose
/// parent is not a learned domain is shown as orphaned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    #[serde(rename = "type")]
    pub skill_type: SkillType,
    pub level: i32,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub parent: Option<SkillId>,
    #[serde(default)]
    pub magical: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub illegal: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub reaction: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub channeled: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub negative: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub custom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Skill {
    pub fn new(name: impl Into<String>, skill_type: SkillType, level: i32) -> Self {
        Self {
            id: SkillId::new(),
            name: name.into(),
            skill_type,
            level,
            xp: 0,
            parent: None,
            magical: false,
            illegal: false,
            reaction: false,
            channeled: false,
            negative: false,
            custom: false,
            description: None,
        }
    }

    pub fn with_parent(mut self, parent: SkillId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_magical(mut self, magical: bool) -> Self {
        self.magical = magical;
        self
    }

    pub fn with_illegal(mut self, illegal: bool) -> Self {
        self.illegal = illegal;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn as_custom(mut self) -> Self {
        self.custom = true;
        self
    }

    pub fn is_domain(&self) -> bool {
        self.skill_type.is_domain()
    }

    /// Whether this skill has exactly the given `(name, type, parent)` triple
    pub fn matches(&self, name: &str, skill_type: SkillType, parent: Option<&SkillId>) -> bool {
        self.name == name && self.skill_type == skill_type && self.parent.as_ref() == parent
    }
}
