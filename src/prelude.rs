//! Convenient imports for callctx.
//!
//! ```ignore
//! use callctx::prelude::*;
//!
//! let ctx = CallContext::global();
//! ctx.set_data("tenant", "acme");
//! ```

// Main entry point
pub use crate::call_context::{CallContext, CallContextBuilder};
pub use crate::config::CallContextConfig;

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use callctx_core::{ContextSnapshot, ContextValue};

// Propagation
pub use callctx_propagation::{FlowContext, SnapshotScope};
