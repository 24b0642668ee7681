//! Key-value persistence port
//!
//! The roster lives in a single text slot. This module defines the interface
//! for reading and writing slots, with in-memory and file-backed
//! implementations.

pub mod file;
pub mod memory;

pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;

use crate::error::Result;

/// Trait for slot storage operations
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Read a slot; `None` when it was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a slot, returning whether it existed
    fn remove(&mut self, key: &str) -> Result<bool>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }
}
