//! Application layer - Use cases over the character sheet
//!
//! This layer contains:
//! - DTOs: the persisted character file and saved-slot shapes
//! - Ports: storage and catalog interfaces implemented by infrastructure
//! - Services: the character session and its save/catalog helpers

pub mod dto;
pub mod errors;
pub mod ports;
pub mod services;
