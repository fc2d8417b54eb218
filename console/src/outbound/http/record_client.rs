//! Reqwest-backed record service adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::dto::decode_records;
use super::transport::{TransportFailure, build_client, endpoint, execute};
use crate::domain::ports::{RecordService, RecordServiceError};
use crate::domain::{Record, RecordFields, RecordId};

const API: &str = "api";
const DETAILS: &str = "details";
const ADD: &str = "add";

/// Record service adapter for the `/api/details` and `/api/add` endpoints.
pub struct HttpRecordService {
    client: Client,
    base_url: Url,
}

impl HttpRecordService {
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

    fn url(&self, segments: &[&str]) -> Result<Url, RecordServiceError> {
        endpoint(&self.base_url, segments).map_err(RecordServiceError::invalid_request)
    }
}

#[async_trait]
impl RecordService for HttpRecordService {
    async fn list(&self) -> Result<Vec<Record>, RecordServiceError> {
        let url = self.url(&[API, DETAILS])?;
        debug!(url = %url, "listing records");
        let body = execute(self.client.get(url))
            .await
            .map_err(map_failure)?;
        decode_records(&body).map_err(RecordServiceError::decode)
    }

    async fn create(&self, fields: &RecordFields) -> Result<(), RecordServiceError> {
        let url = self.url(&[API, ADD])?;
        execute(self.client.post(url).json(fields))
            .await
            .map(drop)
            .map_err(map_failure)
    }

    async fn update(
        &self,
        id: &RecordId,
        fields: &RecordFields,
    ) -> Result<(), RecordServiceError> {
        let url = self.url(&[API, DETAILS, id.as_ref()])?;
        execute(self.client.put(url).json(fields))
            .await
            .map(drop)
            .map_err(map_failure)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), RecordServiceError> {
        let url = self.url(&[API, DETAILS, id.as_ref()])?;
        execute(self.client.delete(url))
            .await
            .map(drop)
            .map_err(map_failure)
    }
}

fn map_failure(failure: TransportFailure) -> RecordServiceError {
    match failure {
        TransportFailure::Transport(message) => RecordServiceError::transport(message),
        TransportFailure::Timeout(message) => RecordServiceError::timeout(message),
        TransportFailure::Status { status, message } => {
            RecordServiceError::status(status.as_u16(), message)
        }
    }
}
