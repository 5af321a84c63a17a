//! Task and thread spawning that carries the caller's call context.
//!
//! Thin wrappers over `callctx_propagation::spawn` that report a missing
//! runtime as [`Error::NoRuntime`](crate::Error::NoRuntime).

use crate::error::Result;
use std::future::Future;
use tokio::task::JoinHandle;

/// Spawn a future on the current Tokio runtime with the caller's context.
pub fn spawn<F>(fut: F) -> Result<JoinHandle<F::Output>>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    Ok(callctx_propagation::spawn(fut)?)
}

/// Run a blocking closure on the runtime's blocking pool with the caller's
/// context.
pub fn spawn_blocking<F, R>(f: F) -> Result<JoinHandle<R>>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    Ok(callctx_propagation::spawn_blocking(f)?)
}

pub use callctx_propagation::spawn_thread;
