//! Data transfer objects
//!
//! The persisted shapes of a character live in the application layer so the
//! storage adapters and the session agree on one encoding.

pub mod character_file;
mod saved_slot;

pub use character_file::{export_file_name, CharacterFile, PersistError, FORMAT_VERSION};
pub use saved_slot::{slot_name, SavedSlot, SlotList, DEFAULT_SLOT_LIMIT, UNNAMED_CHARACTER};
