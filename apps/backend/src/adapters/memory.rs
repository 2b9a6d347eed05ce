//! In-memory store adapter.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::RwLock;

use crate::domain::{User, UserId};
use crate::repos::{KeyValueStore, StoreError, UserStore};

/// Thread-safe in-memory implementation of [`KeyValueStore`].
///
/// Values are cloned in and out, so callers never share state with the store.
#[derive(Debug)]
pub struct InMemoryStore<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> InMemoryStore<K, V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> KeyValueStore<K, V> for InMemoryStore<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn save(&self, id: &K, value: &V) -> Result<(), StoreError> {
        self.entries.write().insert(id.clone(), value.clone());
        Ok(())
    }

    fn find(&self, id: &K) -> Result<Option<V>, StoreError> {
        Ok(self.entries.read().get(id).cloned())
    }

    fn exists(&self, id: &K) -> Result<bool, StoreError> {
        Ok(self.entries.read().contains_key(id))
    }

    fn find_all(&self) -> Result<Vec<V>, StoreError> {
        Ok(self.entries.read().values().cloned().collect())
    }

    fn count(&self) -> Result<u64, StoreError> {
        Ok(self.entries.read().len() as u64)
    }

    fn delete(&self, id: &K) -> Result<(), StoreError> {
        self.entries.write().remove(id);
        Ok(())
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        self.entries.write().clear();
        Ok(())
    }
}

impl UserStore for InMemoryStore<UserId, User> {}
