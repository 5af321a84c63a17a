//! Context snapshots
//!
//! A [`ContextSnapshot`] is the complete set of slot values visible on one
//! logical call path at one moment. Snapshots are immutable from the outside
//! world's point of view: cloning is an `Arc` bump, and writing through
//! [`ContextSnapshot::set`] copies the map only if another path still shares it.
//!
//! # Design
//!
//! - Keyed by [`SlotId`], not by name: a freed and re-created name never sees
//!   values written through the old slot
//! - Entries keep their `Arc<Slot>` so reads can skip released slots without
//!   consulting the registry
//! - Released entries are pruned on the next write

use crate::slot::{Slot, SlotId};
use crate::value::ContextValue;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
struct Entry {
    slot: Arc<Slot>,
    value: ContextValue,
}

/// Immutable view of the slot values on one logical path.
#[derive(Clone, Default)]
pub struct ContextSnapshot {
    entries: Arc<FxHashMap<SlotId, Entry>>,
}

impl ContextSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value stored for a slot.
    ///
    /// Returns `None` if the slot has no value here or has been released.
    #[inline]
    pub fn get(&self, slot: &Slot) -> Option<&ContextValue> {
        self.entries
            .get(&slot.id())
            .filter(|entry| entry.slot.is_live())
            .map(|entry| &entry.value)
    }

    /// Check if a live value exists for a slot
    #[inline]
    pub fn contains(&self, slot: &Slot) -> bool {
        self.get(slot).is_some()
    }

    /// Store a value for a slot, returning the value it replaces.
    ///
    /// Copies the underlying map if it is shared with another snapshot.
    /// Writing to a released slot is a no-op.
    pub fn set(&mut self, slot: &Arc<Slot>, value: ContextValue) -> Option<ContextValue> {
        let entries = Arc::make_mut(&mut self.entries);
        entries.retain(|_, entry| entry.slot.is_live());
        if !slot.is_live() {
            return None;
        }
        entries
            .insert(
                slot.id(),
                Entry {
                    slot: Arc::clone(slot),
                    value,
                },
            )
            .map(|entry| entry.value)
    }

    /// Remove the value for a slot.
    ///
    /// Returns the removed value if one was visible.
    pub fn remove(&mut self, slot: &Slot) -> Option<ContextValue> {
        if !self.entries.contains_key(&slot.id()) {
            return None;
        }
        let entries = Arc::make_mut(&mut self.entries);
        entries.retain(|_, entry| entry.slot.is_live());
        entries.remove(&slot.id()).map(|entry| entry.value)
    }

    /// Return a copy of this snapshot with `value` stored for `slot`
    pub fn with(&self, slot: &Arc<Slot>, value: ContextValue) -> Self {
        let mut next = self.clone();
        next.set(slot, value);
        next
    }

    /// Return a copy of this snapshot without a value for `slot`
    pub fn without(&self, slot: &Slot) -> Self {
        let mut next = self.clone();
        next.remove(slot);
        next
    }

    /// Number of live values
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.slot.is_live())
            .count()
    }

    /// Check if no live value is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of the slots holding a live value, sorted
    pub fn slot_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .values()
            .filter(|entry| entry.slot.is_live())
            .map(|entry| entry.slot.name().to_string())
            .collect();
        names.sort_unstable();
        names
    }

    /// Check if another snapshot shares this one's storage.
    ///
    /// A write to a shared snapshot copies the map first.
    #[inline]
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.entries) > 1
    }

    /// Check whether two snapshots share the same storage.
    ///
    /// Snapshots that share storage are guaranteed to hold the same values.
    #[inline]
    pub fn ptr_eq(&self, other: &ContextSnapshot) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl fmt::Debug for ContextSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for entry in self.entries.values().filter(|e| e.slot.is_live()) {
            map.entry(&entry.slot.name(), &entry.value.type_name());
        }
        map.finish()
    }
}
