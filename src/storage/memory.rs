//! In-memory slot storage

use crate::error::Result;
use crate::storage::KeyValueStore;
use std::collections::HashMap;

/// Slot storage that lives only as long as the process
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    slots: HashMap<String, String>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset a slot (for seeding tests and demos)
    pub fn with_slot(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }

    /// Number of slots written
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.slots.remove(key).is_some())
    }
}
