//! Driven port for the remote record store.
//!
//! The domain owns the request and response shapes so the controller stays
//! adapter-agnostic. Every call is a single request/response pair and is
//! never retried by the port itself.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Record, RecordFields, RecordId};

/// Errors surfaced while calling the record store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordServiceError {
    /// Network transport failed before receiving a response.
    #[error("record service transport failed: {message}")]
    Transport { message: String },
    /// The call exceeded its timeout.
    #[error("record service timeout: {message}")]
    Timeout { message: String },
    /// The store answered with a non-success status.
    #[error("record service returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// A `list` response could not be decoded.
    #[error("record service response decode failed: {message}")]
    Decode { message: String },
    /// The adapter rejected the request before sending it.
    #[error("record service request invalid: {message}")]
    InvalidRequest { message: String },
}

impl RecordServiceError {
    /// Build a [`RecordServiceError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a [`RecordServiceError::Timeout`].
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Build a [`RecordServiceError::Status`].
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Build a [`RecordServiceError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Build a [`RecordServiceError::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// True when the store answered, but with a non-success status.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Status { .. })
    }

    /// Detail text without the category prefix.
    pub fn detail(&self) -> &str {
        match self {
            Self::Transport { message }
            | Self::Timeout { message }
            | Self::Status { message, .. }
            | Self::Decode { message }
            | Self::InvalidRequest { message } => message,
        }
    }
}

/// Port for reading and mutating person records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordService: Send + Sync {
    /// Fetch the full current collection in server order.
    async fn list(&self) -> Result<Vec<Record>, RecordServiceError>;

    /// Create a record. The new identifier is not returned; callers learn it
    /// from the next `list`.
    async fn create(&self, fields: &RecordFields) -> Result<(), RecordServiceError>;

    /// Replace every editable field of the record `id`.
    async fn update(&self, id: &RecordId, fields: &RecordFields)
    -> Result<(), RecordServiceError>;

    /// Delete the record `id`.
    async fn delete(&self, id: &RecordId) -> Result<(), RecordServiceError>;
}

/// In-memory record store that assigns random identifiers.
///
/// Useful for exercising the controller without a server; it keeps
/// insertion order and reports unknown identifiers as `404`.
#[derive(Debug, Default)]
pub struct FixtureRecordService {
    records: Mutex<Vec<Record>>,
}

impl FixtureRecordService {
    /// Create a store pre-populated with `records`.
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Record>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn not_found(id: &RecordId) -> RecordServiceError {
        RecordServiceError::status(404, format!("record {id} not found"))
    }
}

#[async_trait]
impl RecordService for FixtureRecordService {
    async fn list(&self) -> Result<Vec<Record>, RecordServiceError> {
        Ok(self.lock().clone())
    }

    async fn create(&self, fields: &RecordFields) -> Result<(), RecordServiceError> {
        let id = RecordId::new(Uuid::new_v4().to_string())
            .map_err(|err| RecordServiceError::invalid_request(err.to_string()))?;
        self.lock().push(Record::new(id, fields.clone()));
        Ok(())
    }

    async fn update(
        &self,
        id: &RecordId,
        fields: &RecordFields,
    ) -> Result<(), RecordServiceError> {
        let mut records = self.lock();
        let slot = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        *slot = Record::new(id.clone(), fields.clone());
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> Result<(), RecordServiceError> {
        let mut records = self.lock();
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn fields(name: &str) -> RecordFields {
        RecordFields {
            name: name.to_owned(),
            email: "ana@x.com".to_owned(),
            age: 30,
            phone: "5551234567".to_owned(),
            city: "Lima".to_owned(),
            id_number: "A1".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_store_round_trips_mutations() {
        let service = FixtureRecordService::default();
        service.create(&fields("Ana")).await.expect("create");
        let listed = service.list().await.expect("list");
        assert_eq!(listed.len(), 1);

        let id = listed[0].id().clone();
        service.update(&id, &fields("Ana Maria")).await.expect("update");
        let listed = service.list().await.expect("list");
        assert_eq!(listed[0].fields().name, "Ana Maria");

        service.delete(&id).await.expect("delete");
        assert!(service.list().await.expect("list").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_store_reports_unknown_ids_as_not_found() {
        let service = FixtureRecordService::default();
        let id = RecordId::new("missing").expect("valid id");
        let err = service.delete(&id).await.expect_err("unknown id");
        assert_eq!(err, RecordServiceError::status(404, "record missing not found"));
        assert!(err.is_rejection());
    }

    #[rstest]
    fn detail_strips_category_prefix() {
        let err = RecordServiceError::transport("connection refused");
        assert_eq!(err.detail(), "connection refused");
        assert_eq!(err.to_string(), "record service transport failed: connection refused");
    }
}
