//! Scopes: running code as its own logical path
//!
//! A scope seeds a new logical path with a snapshot. Inside, reads see the
//! seeded values and writes replace the scope's snapshot only. When the scope
//! ends its snapshot is dropped; nothing flows back to the caller.
//!
//! ```ignore
//! use callctx_propagation::{current, FlowContext, SnapshotScope};
//!
//! // Explicit snapshot
//! let snapshot = current();
//! let out = snapshot.scope(async { work().await }).await;
//!
//! // Capture at the call site
//! let out = async { work().await }.flow_context().await;
//! ```

use crate::ambient::{self, enter, enter_sync};
use callctx_core::ContextSnapshot;
use std::cell::RefCell;
use std::future::Future;
use tokio::task::futures::TaskLocalFuture;

/// Future running inside a call-context scope.
pub type Scoped<F> = TaskLocalFuture<RefCell<ContextSnapshot>, F>;

/// Run `fut` as a logical path seeded with `snapshot`.
///
/// Values written inside `fut` survive its `.await` points, regardless of
/// which worker thread resumes it.
pub fn scope<F: Future>(snapshot: ContextSnapshot, fut: F) -> Scoped<F> {
    enter(snapshot, fut)
}

/// Run `f` as a logical path seeded with `snapshot`.
pub fn run<R>(snapshot: ContextSnapshot, f: impl FnOnce() -> R) -> R {
    enter_sync(snapshot, f)
}

/// Scoping methods on [`ContextSnapshot`].
pub trait SnapshotScope {
    /// Run a future as a logical path seeded with this snapshot
    fn scope<F: Future>(self, fut: F) -> Scoped<F>;

    /// Run a closure as a logical path seeded with this snapshot
    fn run<R>(self, f: impl FnOnce() -> R) -> R;
}

impl SnapshotScope for ContextSnapshot {
    fn scope<F: Future>(self, fut: F) -> Scoped<F> {
        scope(self, fut)
    }

    fn run<R>(self, f: impl FnOnce() -> R) -> R {
        run(self, f)
    }
}

/// Attach the caller's call context to a future.
///
/// The snapshot is captured when `flow_context` is called, not when the
/// future is first polled.
pub trait FlowContext: Future + Sized {
    /// Run this future as a logical path seeded with the current snapshot
    fn flow_context(self) -> Scoped<Self> {
        scope(ambient::current(), self)
    }
}

impl<F: Future> FlowContext for F {}
