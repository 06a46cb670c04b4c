// Library target exists solely for integration tests.
// The binary entry point is main.rs; this file re-declares the module tree so
// that tests can import types via `scorecast::engine::*` / `scorecast::store::*`.
// Most code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

// Public: used directly by integration tests
pub mod advice;
pub mod api;
pub mod engine;
pub mod predict;
pub mod store;
