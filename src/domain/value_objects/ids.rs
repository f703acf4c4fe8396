//! Strongly-typed identifiers for learned skills and catalog entries

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Identifier of a learned skill
///
/// New skills get a random UUID. Character files written by older trackers
/// carry free-form ids such as `"shaping_1712345678901"`; those are kept
/// verbatim so they survive a load/save cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SkillId {
    Uuid(Uuid),
    Legacy(Arc<str>),
}

impl SkillId {
    pub fn new() -> Self {
        Self::Uuid(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self::Uuid(uuid)
    }

    /// Read a stored id
    ///
    /// Only the canonical hyphenated form becomes a UUID, so every other
    /// string is written back exactly as it was read.
    pub fn parse(raw: &str) -> Self {
        match Uuid::parse_str(raw) {
            Ok(uuid) if uuid.to_string() == raw => Self::Uuid(uuid),
            _ => Self::Legacy(Arc::from(raw)),
        }
    }

    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(uuid) => Some(uuid),
            Self::Legacy(_) => None,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }
}

impl Default for SkillId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uuid(uuid) => write!(f, "{}", uuid),
            Self::Legacy(raw) => f.write_str(raw),
        }
    }
}

impl From<Uuid> for SkillId {
    fn from(uuid: Uuid) -> Self {
        Self::Uuid(uuid)
    }
}

impl From<&str> for SkillId {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl Serialize for SkillId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SkillId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Key of an entry in the skill catalog (e.g. `"shaping"`, `"swords"`)
///
/// Keys come straight from the catalog data and are never re-derived from
/// display names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(String);

impl CatalogKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CatalogKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}
