//! Skill type classification

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of a learned skill
///
/// The text form matches the values stored in character files. The legacy
/// value `non-magical` is accepted as an alias for [`SkillType::General`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillType {
    #[serde(rename = "domain")]
    Domain,
    #[serde(rename = "spell")]
    Spell,
    #[serde(rename = "weapon")]
    Weapon,
    #[serde(rename = "combat")]
    Combat,
    #[serde(rename = "skill", alias = "non-magical")]
    General,
    #[serde(rename = "alchemy-skill")]
    AlchemySkill,
}

impl SkillType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillType::Domain => "domain",
            SkillType::Spell => "spell",
            SkillType::Weapon => "weapon",
            SkillType::Combat => "combat",
            SkillType::General => "skill",
            SkillType::AlchemySkill => "alchemy-skill",
        }
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, SkillType::Domain)
    }
}

impl std::fmt::Display for SkillType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown skill type: {0}")]
pub struct UnknownSkillType(pub String);

impl FromStr for SkillType {
    type Err = UnknownSkillType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "domain" => Ok(SkillType::Domain),
            "spell" => Ok(SkillType::Spell),
            "weapon" => Ok(SkillType::Weapon),
            "combat" => Ok(SkillType::Combat),
            "skill" | "non-magical" => Ok(SkillType::General),
            "alchemy-skill" => Ok(SkillType::AlchemySkill),
            other => Err(UnknownSkillType(other.to_string())),
        }
    }
}
