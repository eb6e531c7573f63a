//! # Storage Traits
//!
//! The store persists each collection as one opaque document under a fixed
//! key. Any backend that can read and write bytes by key can hold the data,
//! so the domain layer only depends on this trait.

use anyhow::Result;

/// Durable key-value storage for whole serialized documents
pub trait KeyValueStorage {
    /// Read the document stored under `key`, or `None` if nothing is stored
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the document stored under `key`
    fn write(&self, key: &str, value: &[u8]) -> Result<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).write(key, value)
    }
}
