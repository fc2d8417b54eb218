//! Shared helper utilities for console integration tests.
//!
//! Integration tests compile as separate crates under `console/tests/`, so
//! small helpers live here instead of being copied between files.

pub mod stub_server;
