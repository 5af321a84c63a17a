//! Core types for callctx
//!
//! This crate defines the building blocks shared by the registry and the
//! propagation layer:
//!
//! - [`SlotId`] / [`Slot`]: identity of a named storage location
//! - [`ContextValue`]: type-erased value stored in a slot
//! - [`ContextSnapshot`]: immutable view of every slot value on one logical path
//! - [`Error`]: core error type

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod slot;
pub mod snapshot;
pub mod value;

pub use error::{Error, Result};
pub use slot::{Slot, SlotId};
pub use snapshot::ContextSnapshot;
pub use value::ContextValue;
