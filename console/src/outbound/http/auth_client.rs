//! Reqwest-backed auth service adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::{LoginRequestDto, RegisterRequestDto};
use super::transport::{TransportFailure, build_client, endpoint, execute};
use crate::domain::ports::{AuthService, AuthServiceError};
use crate::domain::{Credentials, Registration};

/// Auth adapter for `/api/auth/login` and `/api/auth/register`.
///
/// Response bodies are ignored; no token is kept.
pub struct HttpAuthService {
    client: Client,
    base_url: Url,
}

impl HttpAuthService {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_client(timeout)?, base_url))
    }

    /// Build an adapter around an existing client.
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn url(&self, action: &str) -> Result<Url, AuthServiceError> {
        endpoint(&self.base_url, &["api", "auth", action]).map_err(AuthServiceError::transport)
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<(), AuthServiceError> {
        let url = self.url("login")?;
        execute(self.client.post(url).json(&LoginRequestDto::from(credentials)))
            .await
            .map(drop)
            .map_err(map_failure)
    }

    async fn register(&self, registration: &Registration) -> Result<(), AuthServiceError> {
        let url = self.url("register")?;
        execute(
            self.client
                .post(url)
                .json(&RegisterRequestDto::from(registration)),
        )
        .await
        .map(drop)
        .map_err(map_failure)
    }
}

fn map_failure(failure: TransportFailure) -> AuthServiceError {
    match failure {
        TransportFailure::Transport(message) => AuthServiceError::transport(message),
        TransportFailure::Timeout(message) => AuthServiceError::timeout(message),
        TransportFailure::Status { status, message } => {
            AuthServiceError::rejected(status.as_u16(), message)
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for auth adapter helpers.

    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn auth_urls_nest_under_api_auth() {
        let service = HttpAuthService::with_client(
            Client::new(),
            Url::parse("http://127.0.0.1:8000/").expect("valid base"),
        );
        let url = service.url("register").expect("url builds");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/auth/register");
    }

    #[test]
    fn refused_status_maps_to_rejected() {
        let error = map_failure(TransportFailure::Status {
            status: StatusCode::UNAUTHORIZED,
            message: "status 401".to_owned(),
        });
        assert_eq!(error, AuthServiceError::rejected(401, "status 401"));
    }
}
