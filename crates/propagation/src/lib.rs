//! Call-context propagation for callctx
//!
//! Tracks which [`ContextSnapshot`] belongs to the code that is running right
//! now, and hands snapshots over when work moves to another task or thread.
//!
//! - `ambient`: the current logical path (task scope, thread root or detached task)
//! - `scope`: running futures and closures as their own logical path
//! - `spawn`: task and thread spawning with hand-off
//!
//! [`ContextSnapshot`]: callctx_core::ContextSnapshot

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ambient;
pub mod scope;
pub mod spawn;

pub use ambient::{current, is_detached, is_scoped};
pub use scope::{run, scope, FlowContext, Scoped, SnapshotScope};
pub use spawn::{spawn, spawn_blocking, spawn_thread};
