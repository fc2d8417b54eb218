//! Domain ports for the hexagonal boundary.
//!
//! Both ports are *driven*: the dashboard controller and the console call
//! them, and outbound adapters implement them over HTTP.

mod auth_service;
mod record_service;

#[cfg(test)]
pub use auth_service::MockAuthService;
pub use auth_service::{AuthService, AuthServiceError, FixtureAuthService};
#[cfg(test)]
pub use record_service::MockRecordService;
pub use record_service::{FixtureRecordService, RecordService, RecordServiceError};
