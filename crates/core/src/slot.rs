//! Slot identity
//!
//! A slot is the storage location behind one registered name. Values never
//! live in the slot itself: each logical path keeps its own values in a
//! [`ContextSnapshot`](crate::ContextSnapshot), keyed by [`SlotId`].
//!
//! Ids are allocated from a process-wide counter and are never reused, so a
//! name that is freed and registered again gets a fresh id and cannot observe
//! values written through the old one.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Process-wide id counter. Starts at 1; 0 is never handed out.
static NEXT_SLOT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u64);

impl SlotId {
    /// Allocate the next unused id.
    #[inline]
    pub fn next() -> Self {
        SlotId(NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// A named storage location.
///
/// Shared as `Arc<Slot>` between the registry and every snapshot holding a
/// value for it. Once released, the slot is dead for good: snapshots stop
/// returning its value and drop the entry on their next write.
#[derive(Debug)]
pub struct Slot {
    id: SlotId,
    name: String,
    released: AtomicBool,
}

impl Slot {
    /// Create a slot with a freshly allocated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SlotId::next(),
            name: name.into(),
            released: AtomicBool::new(false),
        }
    }

    /// Slot id
    #[inline]
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Name the slot was registered under
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the slot is still live
    #[inline]
    pub fn is_live(&self) -> bool {
        !self.released.load(Ordering::Acquire)
    }

    /// Mark the slot as released.
    ///
    /// Returns `true` if this call performed the release.
    pub fn release(&self) -> bool {
        !self.released.swap(true, Ordering::AcqRel)
    }
}
