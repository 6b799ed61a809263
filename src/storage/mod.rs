//! Key/value storage boundary.
//!
//! Every component in this crate persists through this trait rather than
//! touching a concrete store directly, so hosts can swap the backend
//! (SQLite file, in-memory) and tests can run against a fake.
//!
//! The namespace is shared by the whole client: key prefixes are the only
//! isolation between consumers, by convention rather than enforcement.

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::{SqliteStorage, StoragePool};

use crate::error::Result;

/// Synchronous string key/value store.
///
/// `get` returning `Ok(None)` means the key is definitely absent; an `Err`
/// means the backend itself failed and the caller decides whether to treat
/// that as absent (the components in this crate fail open on malformed
/// *data*, but surface backend failures).
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}
