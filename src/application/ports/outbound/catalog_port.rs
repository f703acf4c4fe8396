use async_trait::async_trait;

use crate::domain::value_objects::SkillCatalog;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to fetch catalog: {0}")]
    Http(String),
    #[error("Invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One-shot source of the skill catalog
#[async_trait]
pub trait CatalogSourcePort: Send + Sync {
    async fn fetch(&self) -> Result<SkillCatalog, CatalogError>;

    /// Where the catalog comes from, for logging
    fn location(&self) -> String;
}
