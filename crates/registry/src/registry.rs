//! Sharded name -> slot registry
//!
//! # Design
//!
//! - DashMap: sharded, lock-free reads for names that already exist
//! - Get-or-create goes through the entry API, so concurrent first use of one
//!   name converges to a single slot
//! - Unrelated names only contend when they hash to the same shard
//!
//! # Thread Safety
//!
//! All operations are thread-safe:
//! - `get_or_create()`: read guard on the fast path, shard write lock on creation
//! - `free()`: only locks the name's shard
//! - Shard locks are never held across user code

use callctx_core::{Error, Result, Slot};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Registry counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryStats {
    /// Names currently registered
    pub registered: usize,
    /// Slots created since the registry was built
    pub created: u64,
    /// Slots freed since the registry was built
    pub freed: u64,
}

/// Registry of named slots.
///
/// # Example
///
/// ```ignore
/// use callctx_registry::SlotRegistry;
///
/// let registry = SlotRegistry::new();
/// let slot = registry.get_or_create("request_id");
/// assert!(registry.lookup("request_id").is_some());
/// registry.free("request_id");
/// assert!(!slot.is_live());
/// ```
#[derive(Debug)]
pub struct SlotRegistry {
    slots: DashMap<String, Arc<Slot>>,
    created: AtomicU64,
    freed: AtomicU64,
}

impl SlotRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
            created: AtomicU64::new(0),
            freed: AtomicU64::new(0),
        }
    }

    /// Create with expected number of names
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: DashMap::with_capacity(capacity),
            created: AtomicU64::new(0),
            freed: AtomicU64::new(0),
        }
    }

    /// Create with an explicit shard count.
    ///
    /// `shard_amount` must be a power of two greater than 1.
    pub fn with_capacity_and_shard_amount(capacity: usize, shard_amount: usize) -> Result<Self> {
        if shard_amount < 2 || !shard_amount.is_power_of_two() {
            return Err(Error::InvalidConfig(format!(
                "shard_amount must be a power of two greater than 1, got {}",
                shard_amount
            )));
        }
        Ok(Self {
            slots: DashMap::with_capacity_and_shard_amount(capacity, shard_amount),
            created: AtomicU64::new(0),
            freed: AtomicU64::new(0),
        })
    }

    /// Get the slot registered under `name`, creating it on first use.
    ///
    /// Concurrent callers racing on the same new name all receive the same
    /// slot.
    pub fn get_or_create(&self, name: &str) -> Arc<Slot> {
        if let Some(slot) = self.slots.get(name) {
            return Arc::clone(slot.value());
        }

        match self.slots.entry(name.to_string()) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                let slot = Arc::new(Slot::new(name));
                self.created.fetch_add(1, Ordering::Relaxed);
                debug!(slot_name = name, slot = %slot.id(), "registered call-context slot");
                Arc::clone(entry.insert(slot).value())
            }
        }
    }

    /// Get the slot registered under `name` without creating it
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Arc<Slot>> {
        self.slots.get(name).map(|slot| Arc::clone(slot.value()))
    }

    /// Remove `name` from the registry and release its slot.
    ///
    /// Values stored through the slot become invisible on every path.
    /// Returns the released slot, or `None` if the name was not registered.
    pub fn free(&self, name: &str) -> Option<Arc<Slot>> {
        let (_, slot) = self.slots.remove(name)?;
        slot.release();
        self.freed.fetch_add(1, Ordering::Relaxed);
        debug!(slot_name = name, slot = %slot.id(), "freed call-context slot");
        Some(slot)
    }

    /// Check if a name is registered
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no name is registered
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Snapshot of the registry counters
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            registered: self.slots.len(),
            created: self.created.load(Ordering::Relaxed),
            freed: self.freed.load(Ordering::Relaxed),
        }
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for SlotRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SlotRegistry {
    fn drop(&mut self) {
        // Slots may outlive the registry inside snapshots; make them dead.
        for entry in self.slots.iter() {
            entry.value().release();
        }
    }
}
