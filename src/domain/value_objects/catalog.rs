//! Skill catalog - Read-only reference data for every learnable skill
//!
//! The catalog is loaded once at startup. Its keys are taken verbatim from the
//! data and a name index is built at construction, so lookups by display name
//! never re-derive keys from names.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::{CatalogKey, SkillType};

/// One learnable skill, spell, weapon proficiency or technique
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub default_level: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magical: Option<bool>,
    #[serde(default)]
    pub free: bool,
    #[serde(default)]
    pub illegal: bool,
    #[serde(default)]
    pub reaction: bool,
    #[serde(default)]
    pub channeled: bool,
    #[serde(default)]
    pub negative: bool,
    #[serde(default)]
    pub enhancer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // Mechanics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_weapons: Option<Vec<String>>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, default_level: i32) -> Self {
        Self {
            name: name.into(),
            default_level,
            ..Default::default()
        }
    }

    pub fn with_magical(mut self, magical: bool) -> Self {
        self.magical = Some(magical);
        self
    }

    pub fn with_free(mut self) -> Self {
        self.free = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_applicable_weapons<I, S>(mut self, weapons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.applicable_weapons = Some(weapons.into_iter().map(Into::into).collect());
        self
    }

    /// Domains count as magical unless the catalog explicitly says otherwise
    pub fn is_magical_domain(&self) -> bool {
        self.magical != Some(false)
    }

    fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
    }

    fn applies_to_weapon(&self, weapon: &str) -> bool {
        match &self.applicable_weapons {
            None => true,
            Some(weapons) => weapons.iter().any(|w| w == weapon || w == "all"),
        }
    }
}

pub type DomainDef = CatalogEntry;
pub type SpellDef = CatalogEntry;
pub type WeaponDef = CatalogEntry;
pub type TechniqueDef = CatalogEntry;
pub type SkillDef = CatalogEntry;

/// Raw catalog document as stored in `spells.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogData {
    #[serde(default)]
    pub domains: BTreeMap<CatalogKey, DomainDef>,
    #[serde(default)]
    pub spells: BTreeMap<CatalogKey, Vec<SpellDef>>,
    #[serde(default)]
    pub weapon_skills: BTreeMap<CatalogKey, WeaponDef>,
    #[serde(default)]
    pub combat_techniques: BTreeMap<CatalogKey, TechniqueDef>,
    #[serde(default)]
    pub general_skills: Vec<SkillDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EntryRef {
    Domain(CatalogKey),
    Spell(CatalogKey, usize),
    Weapon(CatalogKey),
    Technique(CatalogKey),
    General(usize),
}

/// Which browser tab a catalog listing belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSection {
    Magical,
    Combat,
    General,
}

/// A catalog entry as offered in a skill browser
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem<'a> {
    /// Heading the entry is listed under (e.g. "Shaping Spells")
    pub category: String,
    pub skill_type: SkillType,
    /// Own key for keyed entries (domains, weapons, techniques)
    pub key: Option<CatalogKey>,
    /// Domain key a spell belongs to
    pub parent_key: Option<CatalogKey>,
    pub entry: &'a CatalogEntry,
}

/// Indexed, read-only skill catalog
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "CatalogData")]
pub struct SkillCatalog {
    data: CatalogData,
    by_name: HashMap<(SkillType, String), EntryRef>,
}

impl From<CatalogData> for SkillCatalog {
    fn from(data: CatalogData) -> Self {
        Self::new(data)
    }
}

impl SkillCatalog {
    pub fn new(data: CatalogData) -> Self {
        let mut by_name = HashMap::new();

        for (key, entry) in &data.domains {
            by_name
                .entry((SkillType::Domain, entry.name.clone()))
                .or_insert_with(|| EntryRef::Domain(key.clone()));
        }
        for (key, spells) in &data.spells {
            for (index, entry) in spells.iter().enumerate() {
                by_name
                    .entry((SkillType::Spell, entry.name.clone()))
                    .or_insert_with(|| EntryRef::Spell(key.clone(), index));
            }
        }
        for (key, entry) in &data.weapon_skills {
            by_name
                .entry((SkillType::Weapon, entry.name.clone()))
                .or_insert_with(|| EntryRef::Weapon(key.clone()));
        }
        for (key, entry) in &data.combat_techniques {
            by_name
                .entry((SkillType::Combat, entry.name.clone()))
                .or_insert_with(|| EntryRef::Technique(key.clone()));
        }
        for (index, entry) in data.general_skills.iter().enumerate() {
            by_name
                .entry((SkillType::General, entry.name.clone()))
                .or_insert(EntryRef::General(index));
        }

        Self { data, by_name }
    }

    /// The fallback used when the catalog cannot be loaded
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.data.domains.is_empty()
            && self.data.spells.values().all(Vec::is_empty)
            && self.data.weapon_skills.is_empty()
            && self.data.combat_techniques.is_empty()
            && self.data.general_skills.is_empty()
    }

    pub fn data(&self) -> &CatalogData {
        &self.data
    }

    pub fn domain(&self, key: &CatalogKey) -> Option<&DomainDef> {
        self.data.domains.get(key)
    }

    pub fn domains(&self) -> impl Iterator<Item = (&CatalogKey, &DomainDef)> {
        self.data.domains.iter()
    }

    /// Every spell together with the key of the domain it belongs to
    pub fn spells(&self) -> impl Iterator<Item = (&CatalogKey, &SpellDef)> {
        self.data
            .spells
            .iter()
            .flat_map(|(key, spells)| spells.iter().map(move |spell| (key, spell)))
    }

    pub fn domain_key_by_name(&self, name: &str) -> Option<&CatalogKey> {
        match self.by_name.get(&(SkillType::Domain, name.to_string())) {
            Some(EntryRef::Domain(key)) => Some(key),
            _ => None,
        }
    }

    /// Look up the catalog entry for a learned skill
    ///
    /// Spells and alchemy skills are searched under `parent_key` first when it
    /// names a spell list.
    pub fn describe(
        &self,
        name: &str,
        skill_type: SkillType,
        parent_key: Option<&CatalogKey>,
    ) -> Option<&CatalogEntry> {
        let lookup_type = match skill_type {
            SkillType::AlchemySkill => SkillType::Spell,
            other => other,
        };

        if lookup_type == SkillType::Spell {
            if let Some(spells) = parent_key.and_then(|key| self.data.spells.get(key)) {
                return spells.iter().find(|s| s.name == name);
            }
        }

        let entry_ref = self.by_name.get(&(lookup_type, name.to_string()))?;
        self.resolve(entry_ref)
    }

    fn resolve(&self, entry_ref: &EntryRef) -> Option<&CatalogEntry> {
        match entry_ref {
            EntryRef::Domain(key) => self.data.domains.get(key),
            EntryRef::Spell(key, index) => self.data.spells.get(key)?.get(*index),
            EntryRef::Weapon(key) => self.data.weapon_skills.get(key),
            EntryRef::Technique(key) => self.data.combat_techniques.get(key),
            EntryRef::General(index) => self.data.general_skills.get(*index),
        }
    }

    /// List the entries of one browser section
    ///
    /// `search_term` matches name or description case-insensitively.
    /// `weapon` restricts combat techniques to those usable with that weapon
    /// key; techniques without a weapon list, or listing `all`, always match.
    pub fn browse(
        &self,
        section: CatalogSection,
        search_term: &str,
        weapon: Option<&str>,
    ) -> Vec<CatalogItem<'_>> {
        let mut items = Vec::new();

        match section {
            CatalogSection::Magical => {
                for (key, entry) in &self.data.domains {
                    items.push(CatalogItem {
                        category: "Magical Domains".to_string(),
                        skill_type: SkillType::Domain,
                        key: Some(key.clone()),
                        parent_key: None,
                        entry,
                    });
                }
                for (domain_key, spells) in &self.data.spells {
                    let category = match self.data.domains.get(domain_key) {
                        Some(domain) => format!("{} Spells", domain.name),
                        None => format!("{} Spells", domain_key),
                    };
                    for entry in spells {
                        items.push(CatalogItem {
                            category: category.clone(),
                            skill_type: SkillType::Spell,
                            key: None,
                            parent_key: Some(domain_key.clone()),
                            entry,
                        });
                    }
                }
            }
            CatalogSection::Combat => {
                for (key, entry) in &self.data.weapon_skills {
                    items.push(CatalogItem {
                        category: "Weapon Proficiencies".to_string(),
                        skill_type: SkillType::Weapon,
                        key: Some(key.clone()),
                        parent_key: None,
                        entry,
                    });
                }
                for (key, entry) in &self.data.combat_techniques {
                    if weapon.is_some_and(|w| !entry.applies_to_weapon(w)) {
                        continue;
                    }
                    items.push(CatalogItem {
                        category: "Combat Techniques".to_string(),
                        skill_type: SkillType::Combat,
                        key: Some(key.clone()),
                        parent_key: None,
                        entry,
                    });
                }
            }
            CatalogSection::General => {
                for entry in &self.data.general_skills {
                    items.push(CatalogItem {
                        category: "General Skills".to_string(),
                        skill_type: SkillType::General,
                        key: None,
                        parent_key: None,
                        entry,
                    });
                }
            }
        }

        items.retain(|item| item.entry.matches_search(search_term));
        items
    }
}
