//! Value objects - Immutable objects defined by their attributes

mod catalog;
mod ids;
mod skill_type;

pub use catalog::{
    CatalogData, CatalogEntry, CatalogItem, CatalogSection, DomainDef, SkillCatalog, SkillDef,
    SpellDef, TechniqueDef, WeaponDef,
};
pub use ids::*;
pub use skill_type::{SkillType, UnknownSkillType};

#[cfg(test)]
pub(crate) use catalog::tests::sample_catalog;
