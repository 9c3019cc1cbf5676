use crate::error::Result;
use async_trait::async_trait;

pub mod document_store;
pub mod memory_store;

#[cfg(feature = "file-storage")]
pub mod file_store;

pub use document_store::DocumentStore;
pub use memory_store::MemoryStore;

#[cfg(feature = "file-storage")]
pub use file_store::FileStore;

/// String key-value storage, one value per key
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the raw value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes the value stored under `key`. Missing keys are fine.
    async fn remove(&self, key: &str) -> Result<()>;
}
