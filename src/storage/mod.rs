//! Persistence for the debt collection: a key-value seam plus the adapter
//! that stores the whole collection under one fixed key.

pub mod json_file;
pub mod memory;
pub mod persistence;

use crate::errors::Result;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use persistence::{LedgerPersistence, StoredLedger, CURRENT_SCHEMA_VERSION, STORAGE_KEY};

/// Minimal synchronous key-value contract the persistence adapter writes through.
///
/// `set` replaces the whole value; a failed `set` must leave the previous
/// value readable.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
