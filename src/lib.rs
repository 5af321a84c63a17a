//! # callctx
//!
//! Named slots whose values follow the logical call path instead of the OS
//! thread: a value set before an `.await` is still there after it, a task
//! spawned with the helpers starts with everything its parent could see, and
//! unrelated tasks never observe each other's values.
//!
//! ## Quick Start
//!
//! ```ignore
//! use callctx::prelude::*;
//!
//! callctx::set_data("request_id", 42u64);
//! assert_eq!(callctx::get::<u64>("request_id").as_deref(), Some(&42));
//!
//! // Hand the context to a task; its writes stay in the task
//! callctx::spawn(async {
//!     callctx::set_data("request_id", 43u64);
//! })?
//! .await?;
//! assert_eq!(callctx::get::<u64>("request_id").as_deref(), Some(&42));
//!
//! // Remove the slot on every path
//! callctx::free_named_data_slot("request_id");
//! assert!(callctx::get_data("request_id").is_none());
//! ```
//!
//! ## Logical paths
//!
//! - Outside any scope, each OS thread is its own path
//! - [`spawn`], [`spawn_blocking`], [`spawn_thread`], [`FlowContext::flow_context`]
//!   and [`SnapshotScope`] start a new path seeded with a snapshot
//! - A Tokio task started without a scope (plain `tokio::spawn`) has no path:
//!   it reads nothing, and its writes are dropped with a `warn` event

#![warn(missing_docs)]

mod call_context;
mod config;
mod error;
mod spawn;

pub mod prelude;

// Re-export main entry points
pub use call_context::{
    capture, contains, free_named_data_slot, get, get_data, set_data, try_get, CallContext,
    CallContextBuilder,
};
pub use config::CallContextConfig;
pub use error::{Error, Result};
pub use spawn::{spawn, spawn_blocking, spawn_thread};

// Re-export types
pub use callctx_core::{ContextSnapshot, ContextValue, SlotId};
pub use callctx_propagation::{is_detached, run, scope, FlowContext, Scoped, SnapshotScope};
pub use callctx_registry::RegistryStats;
