//! The current logical path
//!
//! Every piece of running code belongs to exactly one logical path, and every
//! path owns one [`ContextSnapshot`]:
//!
//! - Inside a scope (see [`crate::scope`]) the path is the scope itself. Its
//!   snapshot lives in a Tokio task-local, so it travels with the future
//!   across `.await` points and worker threads.
//! - Outside any scope and outside any Tokio task the path is the OS thread's
//!   root, stored in a `thread_local!`.
//! - A Tokio task started without a scope is detached: a worker thread's root
//!   is shared by every task it polls, so such a task reads an empty snapshot
//!   and its writes are dropped with a warning. Use the spawn helpers or
//!   [`FlowContext`](crate::FlowContext) to give it a path of its own.

use crate::scope::Scoped;
use callctx_core::ContextSnapshot;
use std::cell::RefCell;
use std::future::Future;
use tracing::warn;

tokio::task_local! {
    static TASK_PATH: RefCell<ContextSnapshot>;
}

thread_local! {
    static THREAD_ROOT: RefCell<ContextSnapshot> = RefCell::new(ContextSnapshot::new());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Path {
    Scoped,
    ThreadRoot,
    Detached,
}

fn resolve() -> Path {
    if is_scoped() {
        Path::Scoped
    } else if tokio::task::try_id().is_some() {
        Path::Detached
    } else {
        Path::ThreadRoot
    }
}

/// Check if the caller is running inside a scope
#[inline]
pub fn is_scoped() -> bool {
    TASK_PATH.try_with(|_| ()).is_ok()
}

/// Check if the caller is a Tokio task running without a scope.
///
/// Such a task has no path: reads see nothing and writes are dropped.
pub fn is_detached() -> bool {
    resolve() == Path::Detached
}

/// Snapshot of the current logical path.
///
/// O(1): shares storage with the path until either side writes.
pub fn current() -> ContextSnapshot {
    read_current(ContextSnapshot::clone)
}

/// Run `f` against the current path's snapshot.
pub fn read_current<R>(f: impl FnOnce(&ContextSnapshot) -> R) -> R {
    match resolve() {
        Path::Scoped => TASK_PATH.with(|path| f(&path.borrow())),
        Path::ThreadRoot => THREAD_ROOT.with(|path| f(&path.borrow())),
        Path::Detached => f(&ContextSnapshot::new()),
    }
}

/// Run `f` against the current path's snapshot with write access.
///
/// Writes stay on the current path. Snapshots captured earlier, and paths
/// that were handed such a snapshot, are not affected.
///
/// The snapshot is taken out of the path while `f` runs, so `f` mutates it in
/// place unless a captured snapshot still shares it. No borrow of the path is
/// held while `f` runs; code reached from `f` sees an empty path.
pub fn update_current<R>(f: impl FnOnce(&mut ContextSnapshot) -> R) -> R {
    let mut snapshot = replace_current(ContextSnapshot::new());
    let out = f(&mut snapshot);
    drop(replace_current(snapshot));
    out
}

/// Replace the current path's snapshot, returning the previous one.
///
/// On a detached task the snapshot is discarded and an empty one returned.
pub fn replace_current(snapshot: ContextSnapshot) -> ContextSnapshot {
    match resolve() {
        Path::Scoped => TASK_PATH.with(|path| path.replace(snapshot)),
        Path::ThreadRoot => THREAD_ROOT.with(|path| path.replace(snapshot)),
        Path::Detached => {
            if !snapshot.is_empty() {
                warn!(
                    slots = snapshot.len(),
                    "call-context write from an unscoped tokio task dropped"
                );
            }
            ContextSnapshot::new()
        }
    }
}

pub(crate) fn enter<F: Future>(snapshot: ContextSnapshot, fut: F) -> Scoped<F> {
    TASK_PATH.scope(RefCell::new(snapshot), fut)
}

pub(crate) fn enter_sync<R>(snapshot: ContextSnapshot, f: impl FnOnce() -> R) -> R {
    TASK_PATH.sync_scope(RefCell::new(snapshot), f)
}
