//! Call-context entry point.
//!
//! [`CallContext`] pairs a slot registry with the ambient per-path snapshots.
//! A process-wide instance backs the free functions ([`set_data`],
//! [`get_data`], [`free_named_data_slot`], ...); separate instances can be
//! built for isolation, and their slots never collide with the global ones.

use crate::config::CallContextConfig;
use crate::error::{Error, Result};
use callctx_core::{ContextSnapshot, ContextValue};
use callctx_propagation::ambient;
use callctx_registry::{RegistryStats, SlotRegistry};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::sync::Arc;
use tracing::trace;

static GLOBAL: OnceCell<CallContext> = OnceCell::new();

/// Named slots whose values are local to the current logical call path.
///
/// # Example
///
/// ```ignore
/// use callctx::prelude::*;
///
/// let ctx = CallContext::global();
/// ctx.set_data("request_id", 42u64);
/// assert_eq!(ctx.get::<u64>("request_id").as_deref(), Some(&42));
///
/// ctx.free_named_data_slot("request_id");
/// assert!(ctx.get_data("request_id").is_none());
/// ```
#[derive(Debug)]
pub struct CallContext {
    registry: SlotRegistry,
    config: CallContextConfig,
}

impl CallContext {
    /// Create a call context with default settings.
    pub fn new() -> Self {
        Self {
            registry: SlotRegistry::new(),
            config: CallContextConfig::default(),
        }
    }

    /// Create a call context from a configuration.
    pub fn with_config(config: CallContextConfig) -> Result<Self> {
        config.validate()?;
        let registry = match config.shard_amount {
            Some(shards) => {
                SlotRegistry::with_capacity_and_shard_amount(config.initial_capacity, shards)?
            }
            None => SlotRegistry::with_capacity(config.initial_capacity),
        };
        Ok(Self { registry, config })
    }

    /// Create a builder for call-context configuration.
    pub fn builder() -> CallContextBuilder {
        CallContextBuilder::new()
    }

    /// The process-wide call context.
    ///
    /// Created with default settings on first use unless
    /// [`CallContext::init_global`] ran first.
    pub fn global() -> &'static CallContext {
        GLOBAL.get_or_init(CallContext::new)
    }

    /// Configure the process-wide call context.
    ///
    /// Fails if the global instance already exists, including when it was
    /// created implicitly by an earlier call.
    pub fn init_global(config: CallContextConfig) -> Result<&'static CallContext> {
        let ctx = Self::with_config(config)?;
        GLOBAL
            .set(ctx)
            .map_err(|_| Error::Config("global call context is already initialized".into()))?;
        Ok(Self::global())
    }

    /// Active configuration
    pub fn config(&self) -> &CallContextConfig {
        &self.config
    }

    // =========================================================================
    // Core operations
    // =========================================================================

    /// Associate `value` with `name` on the current logical path.
    ///
    /// Registers the slot on first use. Visible from here on along this path
    /// and on paths handed off from it afterwards; never on other paths.
    pub fn set_data<T: Any + Send + Sync>(&self, name: &str, value: T) {
        self.set_value(name, ContextValue::new(value));
    }

    /// Associate an already wrapped value with `name` on the current path.
    pub fn set_value(&self, name: &str, value: ContextValue) {
        let slot = self.registry.get_or_create(name);
        if self.config.trace_operations {
            trace!(
                slot_name = name,
                slot = %slot.id(),
                value_type = value.type_name(),
                "set call-context data"
            );
        }
        ambient::update_current(|path| path.set(&slot, value));
    }

    /// The value associated with `name` on the current logical path.
    ///
    /// Returns `None` if the name was never set on this path, was never
    /// registered, or has been freed.
    pub fn get_data(&self, name: &str) -> Option<ContextValue> {
        let slot = self.registry.lookup(name)?;
        let value = ambient::read_current(|path| path.get(&slot).cloned());
        if self.config.trace_operations {
            trace!(
                slot_name = name,
                slot = %slot.id(),
                found = value.is_some(),
                "get call-context data"
            );
        }
        value
    }

    /// Remove `name` from the registry on every path.
    ///
    /// Values stored under the name become invisible everywhere, including on
    /// paths that set them. A later [`set_data`](Self::set_data) registers a
    /// fresh slot. Returns `true` if the name was registered.
    pub fn free_named_data_slot(&self, name: &str) -> bool {
        let freed = self.registry.free(name).is_some();
        if self.config.trace_operations {
            trace!(slot_name = name, freed, "free call-context slot");
        }
        freed
    }

    // =========================================================================
    // Typed access
    // =========================================================================

    /// The value for `name` as a `T`.
    ///
    /// Returns `None` if absent or stored as another type.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.get_data(name)?.downcast::<T>()
    }

    /// The value for `name` as a `T`, reporting a type mismatch.
    ///
    /// Absence is `Ok(None)`.
    pub fn try_get<T: Any + Send + Sync>(&self, name: &str) -> Result<Option<Arc<T>>> {
        match self.get_data(name) {
            None => Ok(None),
            Some(value) => value
                .try_downcast::<T>()
                .map(Some)
                .map_err(|e| Error::for_slot(name, e)),
        }
    }

    /// Check if a value for `name` is visible on the current path
    pub fn contains(&self, name: &str) -> bool {
        match self.registry.lookup(name) {
            Some(slot) => ambient::read_current(|path| path.contains(&slot)),
            None => false,
        }
    }

    /// Clear the value for `name` on the current path only.
    ///
    /// Unlike [`free_named_data_slot`](Self::free_named_data_slot) the slot
    /// stays registered and other paths keep their values.
    pub fn clear_data(&self, name: &str) -> Option<ContextValue> {
        let slot = self.registry.lookup(name)?;
        ambient::update_current(|path| path.remove(&slot))
    }

    // =========================================================================
    // Registry introspection
    // =========================================================================

    /// Check if `name` is registered
    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Number of registered names
    pub fn slot_count(&self) -> usize {
        self.registry.len()
    }

    /// Registered names, sorted
    pub fn slot_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Registry counters
    pub fn stats(&self) -> RegistryStats {
        self.registry.stats()
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for call-context configuration.
///
/// # Example
///
/// ```ignore
/// let ctx = CallContext::builder()
///     .initial_capacity(64)
///     .shard_amount(16)
///     .trace_operations(true)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallContextBuilder {
    config: CallContextConfig,
}

impl CallContextBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn config(mut self, config: CallContextConfig) -> Self {
        self.config = config;
        self
    }

    /// Pre-allocate room for `capacity` slot names.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Set the registry shard count (power of two greater than 1).
    pub fn shard_amount(mut self, shards: usize) -> Self {
        self.config.shard_amount = Some(shards);
        self
    }

    /// Emit a `trace` event for every operation.
    pub fn trace_operations(mut self, enabled: bool) -> Self {
        self.config.trace_operations = enabled;
        self
    }

    /// Build the call context.
    pub fn build(self) -> Result<CallContext> {
        CallContext::with_config(self.config)
    }

    /// Build and install as the process-wide call context.
    pub fn init_global(self) -> Result<&'static CallContext> {
        CallContext::init_global(self.config)
    }
}

// =============================================================================
// Process-wide shortcuts
// =============================================================================

/// Associate `value` with `name` on the current logical path.
pub fn set_data<T: Any + Send + Sync>(name: &str, value: T) {
    CallContext::global().set_data(name, value)
}

/// The value associated with `name` on the current logical path.
pub fn get_data(name: &str) -> Option<ContextValue> {
    CallContext::global().get_data(name)
}

/// Remove `name` from the process-wide registry on every path.
pub fn free_named_data_slot(name: &str) -> bool {
    CallContext::global().free_named_data_slot(name)
}

/// The value for `name` as a `T`; `None` if absent or another type.
pub fn get<T: Any + Send + Sync>(name: &str) -> Option<Arc<T>> {
    CallContext::global().get(name)
}

/// The value for `name` as a `T`, reporting a type mismatch.
pub fn try_get<T: Any + Send + Sync>(name: &str) -> Result<Option<Arc<T>>> {
    CallContext::global().try_get(name)
}

/// Check if a value for `name` is visible on the current path.
pub fn contains(name: &str) -> bool {
    CallContext::global().contains(name)
}

/// Snapshot of the current logical path, for handing off to other work.
pub fn capture() -> ContextSnapshot {
    ambient::current()
}
