//! Shared test doubles for controller and console tests.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use tokio::sync::oneshot;

use crate::domain::ports::{RecordService, RecordServiceError};
use crate::domain::{Record, RecordFields, RecordId};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clock whose time only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Clock fixed at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock fixed at a deterministic fixture instant.
    pub fn at_fixture_time() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .unwrap_or_else(|| panic!("fixture timestamp must be unambiguous"));
        Self::new(start)
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
            }
        };
        *lock(&self.0) += delta;
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *lock(&self.0)
    }
}

/// Build a valid record for tests.
pub fn sample_record(id: &str, name: &str) -> Record {
    let id = RecordId::new(id).unwrap_or_else(|err| panic!("invalid fixture id: {err}"));
    Record::new(
        id,
        RecordFields {
            name: name.to_owned(),
            email: format!("{}@x.com", name.to_lowercase()),
            age: 30,
            phone: "5551234567".to_owned(),
            city: "Lima".to_owned(),
            id_number: format!("ID-{name}"),
        },
    )
}

/// Call recorded by [`GatedRecordService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// `list` was called.
    List,
    /// `create` was called with these fields.
    Create(RecordFields),
    /// `update` was called for this record with these fields.
    Update(RecordId, RecordFields),
    /// `delete` was called for this record.
    Delete(RecordId),
}

/// Record service whose responses are released by the test.
///
/// Each `list` call takes the next pending list receiver, in call order, and
/// waits until the matching sender fires. Mutations do the same with their
/// own queue and succeed immediately when no gate is queued. Every call is
/// recorded on arrival.
#[derive(Default)]
pub struct GatedRecordService {
    pending_lists: Mutex<VecDeque<oneshot::Receiver<Vec<Record>>>>,
    pending_mutations: Mutex<VecDeque<oneshot::Receiver<()>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl GatedRecordService {
    /// Queue a gate for the next `list` call and return its release handle.
    pub fn gate_next_list(&self) -> oneshot::Sender<Vec<Record>> {
        let (sender, receiver) = oneshot::channel();
        lock(&self.pending_lists).push_back(receiver);
        sender
    }

    /// Queue a gate for the next create, update or delete call.
    pub fn gate_next_mutation(&self) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        lock(&self.pending_mutations).push_back(receiver);
        sender
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: RecordedCall) {
        lock(&self.calls).push(call);
    }

    async fn await_mutation_gate(&self) -> Result<(), RecordServiceError> {
        let receiver = lock(&self.pending_mutations).pop_front();
        match receiver {
            Some(receiver) => receiver
                .await
                .map_err(|_| RecordServiceError::transport("mutation gate dropped")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordService for GatedRecordService {
    async fn list(&self) -> Result<Vec<Record>, RecordServiceError> {
        self.record(RecordedCall::List);
        let receiver = lock(&self.pending_lists).pop_front();
        match receiver {
            Some(receiver) => receiver
                .await
                .map_err(|_| RecordServiceError::transport("list gate dropped")),
            None => Ok(Vec::new()),
        }
    }

    async fn create(&self, fields: &RecordFields) -> Result<(), RecordServiceError> {
        self.record(RecordedCall::Create(fields.clone()));
        self.await_mutation_gate().await
    }

    async fn update(
        &self,
        id: &RecordId,
        fields: &RecordFields,
    ) -> Result<(), RecordServiceError> {
        self.record(RecordedCall::Update(id.clone(), fields.clone()));
        self.await_mutation_gate().await
    }

    async fn delete(&self, id: &RecordId) -> Result<(), RecordServiceError> {
        self.record(RecordedCall::Delete(id.clone()));
        self.await_mutation_gate().await
    }
}
