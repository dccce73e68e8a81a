//! Process-local key-value store.

use super::{KeyValueStore, KvResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Non-persistent store; contents live as long as the value.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one entry.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.into(), value.into());
        store
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> KvResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
