//! Domain entities - Core business objects with identity

mod character;
mod skill;

pub use character::{CharacterDocument, CharacterField, DEFAULT_HEALTH, SHAPING_DOMAIN};
pub use skill::Skill;
