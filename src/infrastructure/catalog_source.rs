//! Catalog sources - Where the skill catalog JSON is read from

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::outbound::{CatalogError, CatalogSourcePort};
use crate::domain::value_objects::SkillCatalog;

/// Catalog stored in a local JSON file
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSourcePort for FileCatalogSource {
    async fn fetch(&self) -> Result<SkillCatalog, CatalogError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Catalog served over HTTP
pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl CatalogSourcePort for HttpCatalogSource {
    async fn fetch(&self) -> Result<SkillCatalog, CatalogError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogError::Http(format!("HTTP error! status: {}", response.status())));
        }

        let text = response
            .text()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?;
        Ok(serde_json::from_str(&text)?)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Pick the source for a configured location
pub fn catalog_source_for(location: &str) -> Box<dyn CatalogSourcePort> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpCatalogSource::new(location))
    } else {
        Box::new(FileCatalogSource::new(location))
    }
}
