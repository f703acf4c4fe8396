//! Application services - Use case implementations
//!
//! The [`CharacterSession`] is the entry point for every user action; the
//! other services are the pieces it is built from.

pub mod catalog_service;
pub mod character_session;
pub mod save_service;

pub use catalog_service::load_catalog_or_empty;
pub use character_session::CharacterSession;
pub use save_service::SaveService;
