//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite and in-memory character storage
//! - Catalog sources: file and HTTP loaders for the skill catalog
//! - Auto-save: the periodic background save worker
//! - Config: Application configuration

pub mod autosave;
pub mod catalog_source;
pub mod config;
pub mod persistence;
