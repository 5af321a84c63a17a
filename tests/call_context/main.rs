//! Call Context Integration Tests
//!
//! Tests for the public callctx API: core operations, path isolation,
//! async propagation, slot removal and concurrency.

mod common;

mod async_flow;
mod isolation;
