//! Driven port for the sign-in and sign-up endpoints.
//!
//! The console only needs to know whether a submission was accepted; any
//! token or session artifact in the response is ignored, and record calls
//! stay unauthenticated.

use async_trait::async_trait;

use crate::domain::{Credentials, Registration};

/// Errors surfaced while calling the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthServiceError {
    /// Network transport failed before receiving a response.
    #[error("auth service transport failed: {message}")]
    Transport { message: String },
    /// The call exceeded its timeout.
    #[error("auth service timeout: {message}")]
    Timeout { message: String },
    /// The server refused the submission.
    #[error("auth service rejected request with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

impl AuthServiceError {
    /// Build an [`AuthServiceError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build an [`AuthServiceError::Timeout`].
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Build an [`AuthServiceError::Rejected`].
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}

/// Port for submitting login and registration forms.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Submit login credentials.
    async fn login(&self, credentials: &Credentials) -> Result<(), AuthServiceError>;

    /// Submit a new account registration.
    async fn register(&self, registration: &Registration) -> Result<(), AuthServiceError>;
}

/// Development authenticator accepting a single fixed account.
///
/// `admin@example.com` / `password` logs in; every registration succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthService;

#[async_trait]
impl AuthService for FixtureAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<(), AuthServiceError> {
        if credentials.email() == "admin@example.com" && credentials.password() == "password" {
            Ok(())
        } else {
            Err(AuthServiceError::rejected(401, "invalid credentials"))
        }
    }

    async fn register(&self, _registration: &Registration) -> Result<(), AuthServiceError> {
        Ok(())
    }
}
