//! Skill descriptions - What the info popup shows for a skill

use crate::domain::entities::Skill;
use crate::domain::value_objects::{CatalogEntry, CatalogKey, SkillCatalog, SkillType};

const NO_DESCRIPTION: &str = "No description available.";
const CUSTOM_NO_DESCRIPTION: &str = "Custom skill - no description provided.";

/// Badge shown next to a skill description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillTag {
    Custom,
    Magical,
    Illegal,
    Reaction,
    Channeled,
    Negative,
}

impl SkillTag {
    pub fn label(&self) -> &'static str {
        match self {
            SkillTag::Custom => "Custom",
            SkillTag::Magical => "Magical",
            SkillTag::Illegal => "ILLEGAL",
            SkillTag::Reaction => "Reaction",
            SkillTag::Channeled => "Channeled",
            SkillTag::Negative => "Negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDescription {
    pub name: String,
    pub description: String,
    pub tags: Vec<SkillTag>,
    /// Labelled mechanics lines, e.g. `("Damage", "2d6")`
    pub mechanics: Vec<(&'static str, String)>,
}

#[derive(Default)]
struct Flags {
    custom: bool,
    magical: bool,
    illegal: bool,
    reaction: bool,
    channeled: bool,
    negative: bool,
}

impl Flags {
    fn tags(&self) -> Vec<SkillTag> {
        let mut tags = Vec::new();
        if self.custom {
            tags.push(SkillTag::Custom);
        }
        // Illegal replaces the Magical badge
        if self.magical && !self.illegal {
            tags.push(SkillTag::Magical);
        }
        if self.illegal {
            tags.push(SkillTag::Illegal);
        }
        if self.reaction {
            tags.push(SkillTag::Reaction);
        }
        if self.channeled {
            tags.push(SkillTag::Channeled);
        }
        if self.negative {
            tags.push(SkillTag::Negative);
        }
        tags
    }
}

/// Describe a skill from the catalog, falling back to a learned skill
pub fn describe_skill(
    catalog: &SkillCatalog,
    skills: &[Skill],
    name: &str,
    skill_type: SkillType,
    parent_key: Option<&CatalogKey>,
) -> SkillDescription {
    if let Some(entry) = catalog.describe(name, skill_type, parent_key) {
        return from_catalog(entry);
    }

    match skills.iter().find(|s| s.name == name) {
        Some(skill) => from_learned(skill),
        None => SkillDescription {
            name: name.to_string(),
            description: NO_DESCRIPTION.to_string(),
            tags: Vec::new(),
            mechanics: Vec::new(),
        },
    }
}

fn from_catalog(entry: &CatalogEntry) -> SkillDescription {
    let flags = Flags {
        custom: false,
        magical: entry.magical.unwrap_or(false),
        illegal: entry.illegal,
        reaction: entry.reaction,
        channeled: entry.channeled,
        negative: entry.negative,
    };

    let mut mechanics = Vec::new();
    if let Some(time) = &entry.time {
        mechanics.push(("Time", time.clone()));
    }
    if let Some(damage) = &entry.damage {
        mechanics.push(("Damage", damage.clone()));
    }
    if let Some(range) = &entry.range {
        mechanics.push(("Range", range.clone()));
    }
    if let Some(weapons) = &entry.applicable_weapons {
        mechanics.push(("Weapons", weapons.join(", ")));
    }

    SkillDescription {
        name: entry.name.clone(),
        description: entry
            .description
            .clone()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        tags: flags.tags(),
        mechanics,
    }
}

fn from_learned(skill: &Skill) -> SkillDescription {
    let flags = Flags {
        custom: true,
        magical: skill.magical,
        illegal: skill.illegal,
        reaction: skill.reaction,
        channeled: skill.channeled,
        negative: skill.negative,
    };

    let description = skill
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(CUSTOM_NO_DESCRIPTION);

    SkillDescription {
        name: skill.name.clone(),
        description: description.to_string(),
        tags: flags.tags(),
        mechanics: Vec::new(),
    }
}
