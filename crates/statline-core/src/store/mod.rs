//! Local key-value storage for cached API data.
//!
//! The cache layer talks to storage only through the [`KeyValueStore`]
//! trait, so tests can substitute [`MemoryStore`] for the on-disk
//! [`FileStore`]. Stores are string-keyed and string-valued, bounded to a
//! few megabytes, and report overflow with a distinguishable
//! [`StoreError::QuotaExceeded`].

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Synchronous string-keyed storage.
///
/// `get` returning `None` covers both "never written" and "unreadable";
/// callers treat the two identically.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str);

    fn keys(&self) -> Vec<String>;
}
