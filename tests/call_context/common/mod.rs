//! Shared helpers for call-context integration tests.

#![allow(dead_code)]

pub use callctx::prelude::*;
pub use std::sync::Arc;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;
use std::thread;

static TRACING: Once = Once::new();
static NAME_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Install a test-friendly tracing subscriber once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

/// Fresh call context with operation tracing enabled.
pub fn test_context() -> Arc<CallContext> {
    init_tracing();
    Arc::new(
        CallContext::builder()
            .trace_operations(true)
            .build()
            .expect("default config is valid"),
    )
}

/// Slot name that no other test uses, for tests against the global instance.
pub fn unique_name(prefix: &str) -> String {
    format!("{}-{}", prefix, NAME_COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Run `f` on a new OS thread, which starts with an empty root path.
pub fn on_fresh_thread<R: Send + 'static>(f: impl FnOnce() -> R + Send + 'static) -> R {
    thread::spawn(f).join().unwrap()
}

/// Read an `i64` slot value.
pub fn read_i64(ctx: &CallContext, name: &str) -> Option<i64> {
    ctx.get::<i64>(name).map(|v| *v)
}
