//! Skill tree - Mutation rules over a character's learned skills
//!
//! The tree is not a separate structure: every operation works directly on
//! the ordered skill sequence of a [`CharacterDocument`]. Parent/child
//! relationships are recomputed by [`group_by_domain`] whenever they are
//! needed.
//!
//! [`CharacterDocument`]: crate::domain::entities::CharacterDocument

use std::collections::HashMap;

use crate::domain::entities::Skill;
use crate::domain::value_objects::{CatalogItem, CatalogKey, SkillCatalog, SkillId, SkillType};

/// Errors from skill tree operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkillTreeError {
    #[error("Skill not found: {0}")]
    NotFound(SkillId),
    #[error("{name} is already learned")]
    DuplicateSkill { name: String },
    #[error("Unknown catalog domain: {0}")]
    UnknownCatalogEntry(CatalogKey),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Parent of a skill being added
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentRef {
    /// A skill already in the sequence (possibly a dangling id)
    Skill(SkillId),
    /// A catalog domain, learned on demand if not yet present
    CatalogDomain(CatalogKey),
}

/// Parameters for [`add_skill`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSkill {
    pub name: String,
    pub skill_type: SkillType,
    pub default_level: i32,
    pub magical: bool,
    pub parent: Option<ParentRef>,
}

impl NewSkill {
    pub fn new(name: impl Into<String>, skill_type: SkillType, default_level: i32) -> Self {
        Self {
            name: name.into(),
            skill_type,
            default_level,
            magical: false,
            parent: None,
        }
    }

    pub fn magical(mut self, magical: bool) -> Self {
        self.magical = magical;
        self
    }

    pub fn under(mut self, parent: ParentRef) -> Self {
        self.parent = Some(parent);
        self
    }
}

impl From<&CatalogItem<'_>> for NewSkill {
    /// Request for learning a browsed catalog entry
    ///
    /// Spells are filed under their catalog domain. Domains are magical unless
    /// the catalog says otherwise, spells always are.
    fn from(item: &CatalogItem<'_>) -> Self {
        let entry = item.entry;
        let magical = match item.skill_type {
            SkillType::Domain => entry.is_magical_domain(),
            SkillType::Spell => true,
            _ => entry.magical.unwrap_or(false),
        };

        let new = NewSkill::new(&entry.name, item.skill_type, entry.default_level).magical(magical);
        match (&item.parent_key, item.skill_type) {
            (Some(key), SkillType::Spell | SkillType::AlchemySkill) => {
                new.under(ParentRef::CatalogDomain(key.clone()))
            }
            _ => new,
        }
    }
}

/// Parameters for [`add_custom_skill`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomSkill {
    pub name: String,
    pub description: String,
    pub skill_type: Option<SkillType>,
    pub level: i32,
    pub magical: bool,
    pub illegal: bool,
}

/// Result of [`add_xp`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpGain {
    pub leveled_up: bool,
    pub new_level: i32,
    pub new_xp: u32,
}

/// XP needed to advance from `level` to the next level
///
/// Symmetric around zero: level -3 needs as much as level 3.
pub fn threshold_for_level(level: i32) -> u32 {
    level
        .unsigned_abs()
        .saturating_add(1)
        .max(1)
        .saturating_mul(100)
}

/// Whether a skill with exactly this `(name, type, parent)` triple is learned
pub fn exists(skills: &[Skill], name: &str, skill_type: SkillType, parent: Option<&SkillId>) -> bool {
    skills.iter().any(|s| s.matches(name, skill_type, parent))
}

pub fn find<'a>(skills: &'a [Skill], id: &SkillId) -> Option<&'a Skill> {
    skills.iter().find(|s| s.id == *id)
}

/// First learned skill with this name and type, regardless of parent
pub fn find_named<'a>(skills: &'a [Skill], name: &str, skill_type: SkillType) -> Option<&'a Skill> {
    skills
        .iter()
        .find(|s| s.name == name && s.skill_type == skill_type)
}

/// Resolve a catalog domain key to a learned domain, learning it if needed
///
/// An existing parentless domain with the catalog name is reused. Returns
/// `None` when the key is not in the catalog.
pub fn materialize_domain(
    skills: &mut Vec<Skill>,
    catalog: &SkillCatalog,
    key: &CatalogKey,
) -> Option<SkillId> {
    let def = catalog.domain(key)?;

    if let Some(existing) = skills
        .iter()
        .find(|s| s.matches(&def.name, SkillType::Domain, None))
    {
        return Some(existing.id.clone());
    }

    let domain = Skill::new(&def.name, SkillType::Domain, def.default_level)
        .with_magical(def.is_magical_domain());
    let id = domain.id.clone();
    skills.push(domain);
    Some(id)
}

/// Learn a new skill
///
/// A catalog parent is learned first when missing. The duplicate check runs
/// after parent resolution; when it fails the sequence is left exactly as it
/// was.
pub fn add_skill(
    skills: &mut Vec<Skill>,
    catalog: &SkillCatalog,
    new: NewSkill,
) -> Result<SkillId, SkillTreeError> {
    let original_len = skills.len();

    let parent = match new.parent {
        None => None,
        Some(ParentRef::Skill(id)) => Some(id),
        Some(ParentRef::CatalogDomain(key)) => Some(
            materialize_domain(skills, catalog, &key)
                .ok_or(SkillTreeError::UnknownCatalogEntry(key))?,
        ),
    };

    if exists(skills, &new.name, new.skill_type, parent.as_ref()) {
        skills.truncate(original_len);
        return Err(SkillTreeError::DuplicateSkill { name: new.name });
    }

    let mut skill = Skill::new(new.name, new.skill_type, new.default_level).with_magical(new.magical);
    skill.parent = parent;
    let id = skill.id.clone();
    skills.push(skill);
    Ok(id)
}

/// Learn a user-defined skill that is not in the catalog
pub fn add_custom_skill(skills: &mut Vec<Skill>, custom: CustomSkill) -> Result<SkillId, SkillTreeError> {
    let name = custom.name.trim();
    if name.is_empty() {
        return Err(SkillTreeError::Validation(
            "Please enter a skill name.".to_string(),
        ));
    }

    let skill_type = custom.skill_type.unwrap_or(SkillType::General);
    if exists(skills, name, skill_type, None) {
        return Err(SkillTreeError::DuplicateSkill {
            name: name.to_string(),
        });
    }

    let mut skill = Skill::new(name, skill_type, custom.level)
        .with_magical(custom.magical)
        .with_illegal(custom.illegal)
        .as_custom();
    let description = custom.description.trim();
    if !description.is_empty() {
        skill = skill.with_description(description);
    }

    let id = skill.id.clone();
    skills.push(skill);
    Ok(id)
}

/// Remove a skill and its direct children
///
/// Only one level is removed: children of the removed children stay, now
/// orphaned. Returns the removed skills, the target first.
pub fn delete_skill(skills: &mut Vec<Skill>, id: &SkillId) -> Result<Vec<Skill>, SkillTreeError> {
    let index = skills
        .iter()
        .position(|s| s.id == *id)
        .ok_or_else(|| SkillTreeError::NotFound(id.clone()))?;

    let mut removed = vec![skills.remove(index)];
    let (children, kept): (Vec<Skill>, Vec<Skill>) =
        skills.drain(..).partition(|s| s.parent.as_ref() == Some(id));
    *skills = kept;
    removed.extend(children);
    Ok(removed)
}

/// Add experience to a skill, levelling up at most once
///
/// Reaching the threshold raises the level by one and resets XP to zero.
/// Any excess XP is discarded, even when it would cover another level.
pub fn add_xp(skills: &mut [Skill], id: &SkillId, amount: u32) -> Result<XpGain, SkillTreeError> {
    let skill = skills
        .iter_mut()
        .find(|s| s.id == *id)
        .ok_or_else(|| SkillTreeError::NotFound(id.clone()))?;

    skill.xp = skill.xp.saturating_add(amount);

    let leveled_up = skill.xp >= threshold_for_level(skill.level);
    if leveled_up {
        skill.level = skill.level.saturating_add(1);
        skill.xp = 0;
    }

    Ok(XpGain {
        leveled_up,
        new_level: skill.level,
        new_xp: skill.xp,
    })
}

/// A learned domain and the skills filed under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainGroup<'a> {
    pub domain: &'a Skill,
    pub children: Vec<&'a Skill>,
}

/// Learned skills partitioned for display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillGroups<'a> {
    /// Domains in sequence order
    pub domains: Vec<DomainGroup<'a>>,
    /// Non-domain skills whose parent is not a learned domain
    pub orphaned: Vec<&'a Skill>,
}

impl<'a> SkillGroups<'a> {
    pub fn get(&self, domain_id: &SkillId) -> Option<&DomainGroup<'a>> {
        self.domains.iter().find(|g| g.domain.id == *domain_id)
    }
}

/// Partition the sequence into domain buckets plus an orphaned bucket
pub fn group_by_domain(skills: &[Skill]) -> SkillGroups<'_> {
    let mut groups = SkillGroups::default();
    let mut index: HashMap<&SkillId, usize> = HashMap::new();

    for skill in skills.iter().filter(|s| s.is_domain()) {
        match index.get(&skill.id) {
            Some(&i) => groups.domains[i].domain = skill,
            None => {
                index.insert(&skill.id, groups.domains.len());
                groups.domains.push(DomainGroup {
                    domain: skill,
                    children: Vec::new(),
                });
            }
        }
    }

    for skill in skills.iter().filter(|s| !s.is_domain()) {
        match skill.parent.as_ref().and_then(|p| index.get(p)) {
            Some(&i) => groups.domains[i].children.push(skill),
            None => groups.orphaned.push(skill),
        }
    }

    groups
}
