//! MOL Campaign Tracker - Headless tracker host
//!
//! Boots the tracker (configuration, logging, catalog, storage), restores the
//! current character and keeps it auto-saved until interrupted.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mol_tracker::application::services::{load_catalog_or_empty, CharacterSession, SaveService};
use mol_tracker::infrastructure::autosave::{save_on_shutdown, spawn_autosave};
use mol_tracker::infrastructure::catalog_source::catalog_source_for;
use mol_tracker::infrastructure::config::AppConfig;
use mol_tracker::infrastructure::persistence::SqliteStorage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mol_tracker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MOL Campaign Tracker");

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Catalog: {}", config.catalog_source);
    tracing::info!("  Database: {}", config.database_url);
    tracing::info!("  Export dir: {}", config.export_dir.display());

    let source = catalog_source_for(&config.catalog_source);
    let catalog = load_catalog_or_empty(source.as_ref()).await;

    let storage = SqliteStorage::connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to open character storage at {}", config.database_url))?;
    let saves = SaveService::new(Arc::new(storage), config.slot_limit);

    let mut session = CharacterSession::new(catalog, saves, config.history_limit);
    session.restore().await;
    {
        let doc = session.document();
        let name = if doc.name.is_empty() { "(unnamed)" } else { doc.name.as_str() };
        tracing::info!(
            character = name,
            current_health = doc.current_health,
            max_health = doc.max_health,
            mana = session.mana(),
            skills = doc.skills.len(),
            "Character ready"
        );
    }

    let session = Arc::new(Mutex::new(session));
    let autosave = spawn_autosave(session.clone(), config.autosave_interval());

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    tracing::info!("Shutdown signal received, saving character...");
    autosave.abort();

    if let Some(path) = save_on_shutdown(&session, &config.export_dir).await {
        tracing::info!("Character exported to {}", path.display());
    }
    tracing::info!("Tracker stopped");

    Ok(())
}
