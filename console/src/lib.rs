//! Record-management console library modules.
//!
//! The crate follows a hexagonal layout: `domain` owns the record model,
//! validation rules, dashboard controller and the ports it drives;
//! `outbound` implements those ports over HTTP; `inbound` hosts the
//! terminal console that turns user commands into controller operations.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Settings consumed by the console binary.
pub use config::ConsoleSettings;
