//! Character storage adapters
//!
//! SQLite backs the binary; the in-memory store backs tests and ephemeral
//! sessions. Both keep the current character as encoded text and the slot
//! list as one ordered JSON array.

mod memory_storage;
mod sqlite_storage;

pub use memory_storage::InMemoryStorage;
pub use sqlite_storage::SqliteStorage;
