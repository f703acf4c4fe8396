//! Catalog Service - Loads the skill catalog once at startup

use tracing::{info, warn};

use crate::application::ports::outbound::CatalogSourcePort;
use crate::domain::value_objects::SkillCatalog;

/// Fetch the catalog, falling back to an empty one on any failure
///
/// The tracker stays usable without a catalog: characters load and edit
/// normally, only catalog-backed skill adds are rejected.
pub async fn load_catalog_or_empty(source: &dyn CatalogSourcePort) -> SkillCatalog {
    match source.fetch().await {
        Ok(catalog) => {
            let data = catalog.data();
            info!(
                source = %source.location(),
                domains = data.domains.len(),
                spells = catalog.spells().count(),
                weapons = data.weapon_skills.len(),
                techniques = data.combat_techniques.len(),
                general = data.general_skills.len(),
                "Skill catalog loaded"
            );
            catalog
        }
        Err(e) => {
            warn!(source = %source.location(), error = %e, "Error loading skill catalog, continuing with an empty one");
            SkillCatalog::empty()
        }
    }
}
