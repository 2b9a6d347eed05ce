//! Identity-aware read-through cache over one backing store.
//!
//! A [`TrackedStore`] keeps two views of every entity it has handed out in
//! the current unit of work:
//!
//! - the id cache (`id -> slot`), so each id is fetched from the backing store
//!   at most once and later reads see earlier writes;
//! - the identity cache (`slot -> id`), addressed by the opaque [`Handle`]
//!   returned from `add`/`find`. Updates are routed through the handle, never
//!   through an id re-derived from the entity, so writing back a stale or
//!   foreign copy is reported instead of silently landing on the wrong record.
//!
//! Writes are buffered per slot and saved by [`TrackedStore::flush`].

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use crate::errors::domain::{ContextErrorKind, DomainError};
use crate::repos::KeyValueStore;

/// Opaque reference to an entity tracked by one context.
///
/// Only valid for the context that minted it.
pub struct Handle<V> {
    context: u64,
    slot: usize,
    _marker: PhantomData<fn() -> V>,
}

impl<V> Handle<V> {
    fn new(context: u64, slot: usize) -> Self {
        Self {
            context,
            slot,
            _marker: PhantomData,
        }
    }
}

impl<V> Clone for Handle<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Handle<V> {}

impl<V> PartialEq for Handle<V> {
    fn eq(&self, other: &Self) -> bool {
        self.context == other.context && self.slot == other.slot
    }
}

impl<V> Eq for Handle<V> {}

impl<V> fmt::Debug for Handle<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("context", &self.context)
            .field("slot", &self.slot)
            .finish()
    }
}

/// An entity read through a context, together with the handle to update it.
#[derive(Debug, Clone)]
pub struct Tracked<V> {
    pub handle: Handle<V>,
    pub value: V,
}

impl<V> Tracked<V> {
    pub fn into_value(self) -> V {
        self.value
    }
}

struct Slot<K, V> {
    id: K,
    value: V,
    dirty: bool,
}

pub(crate) struct TrackedStore<K, V> {
    name: &'static str,
    store: Arc<dyn KeyValueStore<K, V>>,
    key_of: fn(&V) -> K,
    slots: Vec<Slot<K, V>>,
    by_id: HashMap<K, usize>,
    all_loaded: bool,
}

impl<K, V> TrackedStore<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    pub(crate) fn new(
        name: &'static str,
        store: Arc<dyn KeyValueStore<K, V>>,
        key_of: fn(&V) -> K,
    ) -> Self {
        Self {
            name,
            store,
            key_of,
            slots: Vec::new(),
            by_id: HashMap::new(),
            all_loaded: false,
        }
    }

    pub(crate) fn add(&mut self, context: u64, id: K, value: V) -> Result<Handle<V>, DomainError> {
        if self.by_id.contains_key(&id) {
            return Err(DomainError::context(
                ContextErrorKind::AlreadyPresent,
                format!("{} {id:?} already present", self.name),
            ));
        }
        let slot = self.push(id, value, true);
        Ok(Handle::new(context, slot))
    }

    pub(crate) fn update(
        &mut self,
        context: u64,
        handle: &Handle<V>,
        value: V,
    ) -> Result<(), DomainError> {
        let slot = match self.slots.get_mut(handle.slot) {
            Some(slot) if handle.context == context => slot,
            _ => {
                return Err(DomainError::context(
                    ContextErrorKind::NotPresent,
                    format!("{} not present in this context", self.name),
                ))
            }
        };
        slot.value = value;
        slot.dirty = true;
        Ok(())
    }

    pub(crate) fn find(&mut self, context: u64, id: &K) -> Result<Option<Tracked<V>>, DomainError> {
        if let Some(&slot) = self.by_id.get(id) {
            debug!(store = self.name, ?id, "context cache hit");
            return Ok(Some(self.tracked(context, slot)));
        }
        debug!(store = self.name, ?id, "context cache miss");
        match self.store.find(id)? {
            Some(value) => {
                let slot = self.push(id.clone(), value, false);
                Ok(Some(self.tracked(context, slot)))
            }
            None => Ok(None),
        }
    }

    /// Ids of every stored entity plus those added in this context.
    ///
    /// The backing store is scanned once per context; later calls answer from
    /// the cache even if the store has changed since.
    pub(crate) fn find_all_ids(&mut self) -> Result<Vec<K>, DomainError> {
        if !self.all_loaded {
            debug!(store = self.name, "loading all entries");
            for value in self.store.find_all()? {
                let id = (self.key_of)(&value);
                if !self.by_id.contains_key(&id) {
                    self.push(id, value, false);
                }
            }
            self.all_loaded = true;
        }
        Ok(self.slots.iter().map(|slot| slot.id.clone()).collect())
    }

    pub(crate) fn pending_writes(&self) -> usize {
        self.slots.iter().filter(|slot| slot.dirty).count()
    }

    /// Save every written entity, once each, in the order first tracked.
    pub(crate) fn flush(&mut self) -> Result<usize, DomainError> {
        let mut saved = 0;
        for slot in self.slots.iter_mut().filter(|slot| slot.dirty) {
            self.store.save(&slot.id, &slot.value)?;
            slot.dirty = false;
            saved += 1;
        }
        if saved > 0 {
            debug!(store = self.name, saved, "flushed context writes");
        }
        Ok(saved)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.by_id.clear();
        self.all_loaded = false;
    }

    fn push(&mut self, id: K, value: V, dirty: bool) -> usize {
        let slot = self.slots.len();
        self.by_id.insert(id.clone(), slot);
        self.slots.push(Slot { id, value, dirty });
        slot
    }

    fn tracked(&self, context: u64, slot: usize) -> Tracked<V> {
        Tracked {
            handle: Handle::new(context, slot),
            value: self.slots[slot].value.clone(),
        }
    }
}
