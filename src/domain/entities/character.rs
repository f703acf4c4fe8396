//! Character document - The player character sheet and its derived stats

use serde::{Deserialize, Serialize};

use crate::domain::entities::Skill;
use crate::domain::services::skill_tree;
use crate::domain::value_objects::{SkillCatalog, SkillType};

/// Name of the domain whose level drives the mana pool
pub const SHAPING_DOMAIN: &str = "Shaping";

pub const DEFAULT_HEALTH: i32 = 100;
const BASE_MANA: i32 = 100;
const MIN_MANA: i32 = 50;

/// The single mutable source of truth for a character
///
/// `current_health` is not clamped to `max_health`; the health ratio may
/// exceed 100%.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterDocument {
    pub name: String,
    pub current_health: i32,
    pub max_health: i32,
    pub bloodline: String,
    pub knowledge: String,
    /// Learned skills in insertion order
    pub skills: Vec<Skill>,
}

impl Default for CharacterDocument {
    fn default() -> Self {
        Self {
            name: String::new(),
            current_health: DEFAULT_HEALTH,
            max_health: DEFAULT_HEALTH,
            bloodline: String::new(),
            knowledge: String::new(),
            skills: Vec::new(),
        }
    }
}

/// Editable top-level fields of the character sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterField {
    Name,
    CurrentHealth,
    MaxHealth,
    Bloodline,
    Knowledge,
}

impl CharacterField {
    pub fn label(&self) -> &'static str {
        match self {
            CharacterField::Name => "name",
            CharacterField::CurrentHealth => "current health",
            CharacterField::MaxHealth => "max health",
            CharacterField::Bloodline => "bloodline",
            CharacterField::Knowledge => "knowledge",
        }
    }
}

impl std::fmt::Display for CharacterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl CharacterDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Reset every field to its default, dropping all skills
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Total mana, driven by the level of the learned Shaping domain
    ///
    /// Positive levels add 50 each, negative levels subtract only 25 each.
    /// The result never drops below 50.
    pub fn compute_mana(&self) -> i32 {
        let shaping_level = skill_tree::find_named(&self.skills, SHAPING_DOMAIN, SkillType::Domain)
            .map(|s| s.level)
            .unwrap_or(0);

        let mana = if shaping_level >= 0 {
            BASE_MANA.saturating_add(shaping_level.saturating_mul(50))
        } else {
            BASE_MANA.saturating_add(shaping_level.saturating_mul(25))
        };

        mana.max(MIN_MANA)
    }

    /// Current health as a percentage of max health
    ///
    /// Returns `None` when max health is zero.
    pub fn health_percent(&self) -> Option<f64> {
        if self.max_health == 0 {
            return None;
        }
        Some(f64::from(self.current_health) / f64::from(self.max_health) * 100.0)
    }

    /// Assign a field from raw input text
    ///
    /// Health fields fall back to 100 when the text is not an integer.
    pub fn apply_field_edit(&mut self, field: CharacterField, value: &str) {
        match field {
            CharacterField::Name => self.name = value.to_string(),
            CharacterField::CurrentHealth => self.current_health = parse_health(value),
            CharacterField::MaxHealth => self.max_health = parse_health(value),
            CharacterField::Bloodline => self.bloodline = value.to_string(),
            CharacterField::Knowledge => self.knowledge = value.to_string(),
        }
    }

    /// Grant every free domain and spell from the catalog
    ///
    /// Domains and spells already learned under the same name are skipped,
    /// so calling this repeatedly never duplicates anything. Free spells are
    /// parented under their domain, which is learned first if necessary.
    /// Free domains follow the same magical rule as every other learned
    /// domain: magical unless the catalog marks them `magical: false`.
    pub fn initialize_defaults(&mut self, catalog: &SkillCatalog) {
        for (_, domain) in catalog.domains() {
            if !domain.free
                || skill_tree::find_named(&self.skills, &domain.name, SkillType::Domain).is_some()
            {
                continue;
            }
            self.skills.push(
                Skill::new(&domain.name, SkillType::Domain, domain.default_level)
                    .with_magical(domain.is_magical_domain()),
            );
        }

        for (domain_key, spell) in catalog.spells() {
            if !spell.free
                || skill_tree::find_named(&self.skills, &spell.name, SkillType::Spell).is_some()
            {
                continue;
            }
            let Some(parent) = skill_tree::materialize_domain(&mut self.skills, catalog, domain_key)
            else {
                continue;
            };
            self.skills.push(
                Skill::new(&spell.name, SkillType::Spell, spell.default_level)
                    .with_parent(parent)
                    .with_magical(true),
            );
        }
    }
}

/// Strict integer parse: `"12abc"` and `"3.5"` become 100, `"0"` stays 0
fn parse_health(value: &str) -> i32 {
    value.trim().parse().unwrap_or(DEFAULT_HEALTH)
}
