//! Spawning with call-context hand-off
//!
//! Each helper captures the caller's snapshot at spawn time and runs the new
//! task or thread as its own logical path seeded with it. The child inherits
//! everything visible to the parent at that moment; later writes on either
//! side stay on that side.

use crate::ambient::current;
use crate::scope::{run, scope};
use std::future::Future;
use std::thread;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::JoinHandle;
use tracing::trace;

/// Spawn a future on the current Tokio runtime with the caller's context.
///
/// Returns an error instead of panicking when called outside a runtime.
pub fn spawn<F>(fut: F) -> Result<JoinHandle<F::Output>, TryCurrentError>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let handle = Handle::try_current()?;
    let snapshot = current();
    trace!(slots = snapshot.len(), "handing off call context to task");
    Ok(handle.spawn(scope(snapshot, fut)))
}

/// Run a blocking closure on the runtime's blocking pool with the caller's
/// context.
pub fn spawn_blocking<F, R>(f: F) -> Result<JoinHandle<R>, TryCurrentError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let handle = Handle::try_current()?;
    let snapshot = current();
    trace!(slots = snapshot.len(), "handing off call context to blocking task");
    Ok(handle.spawn_blocking(move || run(snapshot, f)))
}

/// Spawn an OS thread with the caller's context.
pub fn spawn_thread<F, R>(f: F) -> thread::JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let snapshot = current();
    trace!(slots = snapshot.len(), "handing off call context to thread");
    thread::spawn(move || run(snapshot, f))
}
