//! Slot registry for callctx
//!
//! Maps slot names to their canonical [`Slot`](callctx_core::Slot). The
//! registry only tracks identity; values live in per-path snapshots.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod registry;

pub use registry::{RegistryStats, SlotRegistry};
