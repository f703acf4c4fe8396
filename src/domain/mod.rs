//! Domain layer - Core character sheet rules with no I/O
//!
//! This layer contains:
//! - Entities: Skill, CharacterDocument
//! - Value Objects: identifiers, skill types, the skill catalog
//! - Aggregates: the undo history
//! - Domain Services: skill tree mutation rules

pub mod aggregates;
pub mod entities;
pub mod services;
pub mod value_objects;
