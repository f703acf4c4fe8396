//! Outbound ports - Interfaces that the application requires from external systems

mod catalog_port;
mod storage_port;

pub use catalog_port::{CatalogError, CatalogSourcePort};
pub use storage_port::{CharacterStoragePort, StorageError};
