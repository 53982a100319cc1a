//! Blob-per-collection key-value storage.
//!
//! Each record collection lives under a well-known string key as one
//! serialized JSON value. Writers read, mutate, and rewrite the whole blob;
//! there are no partial updates and no transactions, so the last writer wins
//! when two contexts race on the same key.

use tokio::sync::broadcast;

pub mod collection;
mod file;
mod memory;

pub use collection::{Collection, StoredRecord};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Collection key for scholarship applications.
pub const SCHOLARSHIP_APPLICATIONS: &str = "scholarshipApplications";
/// Collection key for scheme applications.
pub const SCHEME_APPLICATIONS: &str = "schemeApplications";
/// Collection key for the schemes catalog.
pub const SCHEMES: &str = "schemes";

/// Emitted after a key is rewritten so active screens can refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub key: String,
}

/// String-keyed persistent storage collaborator.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    /// Change notifications for every key in this store.
    fn subscribe(&self) -> broadcast::Receiver<StoreChange>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize collection '{key}': {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
