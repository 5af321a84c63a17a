//! Type-erased slot values
//!
//! Slots accept any `Send + Sync + 'static` value. [`ContextValue`] wraps it
//! in an `Arc` so that snapshots can be cloned in O(1) and values can be
//! handed to other threads without copying.

use crate::error::{Error, Result};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A value stored in a call-context slot.
///
/// Cloning shares the underlying allocation.
#[derive(Clone)]
pub struct ContextValue {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ContextValue {
    /// Wrap a value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Wrap a value that is already behind an `Arc`.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            inner: value,
            type_name: type_name::<T>(),
        }
    }

    /// Name of the type the value was stored as
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check if the value is a `T`
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Borrow the value as a `T`.
    ///
    /// Returns `None` on type mismatch.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Get a shared handle to the value as a `T`.
    ///
    /// Returns `None` on type mismatch.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).downcast::<T>().ok()
    }

    /// Get a shared handle to the value as a `T`, reporting a mismatch.
    pub fn try_downcast<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        self.downcast::<T>().ok_or(Error::WrongType {
            expected: type_name::<T>(),
            actual: self.type_name,
        })
    }

    /// Check whether two handles share the same allocation
    pub fn ptr_eq(&self, other: &ContextValue) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextValue")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}
