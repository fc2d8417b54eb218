//! Form/table controller behind the dashboard.
//!
//! [`DashboardController`] owns every piece of screen state (form slots, edit
//! context, collection snapshot, selected detail and the notification slot)
//! and exposes it only through its operations. Operations take `&self` and
//! hold the state lock only between awaits, so several actions may be in
//! flight at once; their results apply in arrival order, and collection
//! refreshes are sequenced so a stale `list` never overwrites a newer one.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use mockable::Clock;
use tracing::{debug, info, warn};

use super::collection::{CollectionSnapshot, RefreshOutcome};
use super::form::FormState;
use super::notification::{DEFAULT_NOTIFICATION_TIMEOUT, Notification, NotificationChannel};
use super::ports::{RecordService, RecordServiceError};
use super::record::{Record, RecordFields, RecordId};
use super::validation::{FieldError, FormField, ValidationReport};

/// What to do when a `list` call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshFailurePolicy {
    /// Log only; the user keeps seeing the previous snapshot.
    #[default]
    Silent,
    /// Log and also show an error notification.
    Notify,
}

/// Tunables for [`DashboardController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSettings {
    /// How long a notification stays visible.
    pub notification_timeout: Duration,
    /// Handling of failed refreshes.
    pub refresh_failures: RefreshFailurePolicy,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            notification_timeout: DEFAULT_NOTIFICATION_TIMEOUT,
            refresh_failures: RefreshFailurePolicy::Silent,
        }
    }
}

/// Whether the form creates a new record or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Submitting the form creates a new record.
    Create,
    /// Submitting the form saves over the record being edited.
    Edit,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Edit => f.write_str("edit"),
        }
    }
}

/// Result of an action that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The server accepted the mutation.
    Applied,
    /// Nothing to do (for example `update` outside edit mode).
    Skipped,
}

/// Why an action did not reach or was refused by the server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Validation blocked the action; no request was sent.
    #[error("form has invalid fields: {0}")]
    Invalid(ValidationReport),
    /// The record service call failed.
    #[error(transparent)]
    Service(#[from] RecordServiceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            Self::Create => "User details added successfully",
            Self::Update => "User details updated successfully",
            Self::Delete => "User details deleted successfully",
        }
    }

    fn rejection_message(self) -> &'static str {
        match self {
            Self::Create => "Failed to add details",
            Self::Update => "Failed to update details",
            Self::Delete => "Failed to delete details",
        }
    }

    /// A refused request gets the fixed copy; a request that never produced a
    /// status reports the raw transport message.
    fn failure_notification(self, error: &RecordServiceError) -> Notification {
        if error.is_rejection() {
            Notification::error(self.rejection_message())
        } else {
            Notification::error(format!("Error occurred: {}", error.detail()))
        }
    }
}

/// One form slot as a renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Slot being described.
    pub field: FormField,
    /// Raw text in the slot.
    pub value: String,
    /// Error to display; `None` until the slot is touched.
    pub error: Option<FieldError>,
}

/// Immutable snapshot of everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    /// Create or edit, derived from the edit context.
    pub mode: Mode,
    /// Identifier of the record being edited.
    pub editing: Option<RecordId>,
    /// Form slots in display order.
    pub form: Vec<FieldView>,
    /// Collection snapshot in server order.
    pub records: Vec<Record>,
    /// Identifier chosen for the detail view.
    pub selected: Option<RecordId>,
    /// The selected record, resolved against the snapshot.
    pub detail: Option<Record>,
    /// Notification still visible at snapshot time.
    pub notification: Option<Notification>,
}

#[derive(Debug, Default)]
struct DashboardState {
    form: FormState,
    edit_context: Option<RecordId>,
    collection: CollectionSnapshot,
    notification: NotificationChannel,
    selected: Option<RecordId>,
}

impl DashboardState {
    fn clear(&mut self) {
        self.form.reset();
        self.edit_context = None;
    }

    fn mode(&self) -> Mode {
        if self.edit_context.is_some() {
            Mode::Edit
        } else {
            Mode::Create
        }
    }

    /// Touch every slot and validate; on success return the request body.
    fn prepare_submission(&mut self) -> Result<RecordFields, ActionError> {
        self.form.touch_all();
        let report = self.form.validate();
        if !report.is_valid() {
            return Err(ActionError::Invalid(report));
        }
        self.form
            .values()
            .to_record_fields()
            .map_err(ActionError::Invalid)
    }
}

/// Controller for the record form and table.
pub struct DashboardController<S> {
    service: Arc<S>,
    clock: Arc<dyn Clock + Send + Sync>,
    refresh_failures: RefreshFailurePolicy,
    state: Mutex<DashboardState>,
}

impl<S> DashboardController<S> {
    /// Create a controller with an empty form and collection.
    pub fn new(
        service: Arc<S>,
        clock: Arc<dyn Clock + Send + Sync>,
        settings: DashboardSettings,
    ) -> Self {
        let state = DashboardState {
            notification: NotificationChannel::new(settings.notification_timeout),
            ..DashboardState::default()
        };
        Self {
            service,
            clock,
            refresh_failures: settings.refresh_failures,
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, state: &mut DashboardState, notification: Notification) {
        state.notification.show(notification, self.clock.utc());
    }

    /// Current mode, derived from the edit context.
    pub fn mode(&self) -> Mode {
        self.lock().mode()
    }

    /// Identifier of the record being edited, if any.
    pub fn editing(&self) -> Option<RecordId> {
        self.lock().edit_context.clone()
    }

    /// Copy of the current form state.
    pub fn form(&self) -> FormState {
        self.lock().form.clone()
    }

    /// Update one slot, mark it touched and re-run its rule.
    ///
    /// Returns the slot's new error, if any. Has no effect beyond local
    /// state.
    pub fn set_field_value(&self, field: FormField, value: impl Into<String>) -> Option<FieldError> {
        self.lock().form.set_value(field, value)
    }

    /// Mark a slot as visited (the user left it) without changing its value.
    pub fn touch_field(&self, field: FormField) {
        self.lock().form.touch(field);
    }

    /// Start editing `record`: the form is overwritten with its values and
    /// every slot becomes untouched. Replaces any edit already in progress.
    pub fn enter_edit_mode(&self, record: &Record) {
        let mut state = self.lock();
        if let Some(previous) = state.edit_context.as_ref().filter(|id| *id != record.id()) {
            debug!(previous = %previous, record_id = %record.id(), "replacing edit context");
        }
        state.form.populate(record);
        state.edit_context = Some(record.id().clone());
    }

    /// Start editing the displayed record `id`.
    ///
    /// Returns `false` when the record is not in the current snapshot.
    pub fn edit_record(&self, id: &RecordId) -> bool {
        let Some(record) = self.find_record(id) else {
            return false;
        };
        self.enter_edit_mode(&record);
        true
    }

    /// Empty the form and leave edit mode.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Open the detail view for the displayed record `id`.
    ///
    /// Returns `false` when the record is not in the current snapshot.
    pub fn view_record(&self, id: &RecordId) -> bool {
        let mut state = self.lock();
        if state.collection.find(id).is_none() {
            return false;
        }
        state.selected = Some(id.clone());
        true
    }

    /// Close the detail view.
    pub fn close_detail(&self) {
        self.lock().selected = None;
    }

    /// Show `notification`, replacing any visible one and restarting its
    /// timeout.
    pub fn show_notification(&self, notification: Notification) {
        let mut state = self.lock();
        self.notify(&mut state, notification);
    }

    /// Hide the visible notification.
    pub fn dismiss_notification(&self) {
        self.lock().notification.dismiss();
    }

    /// Look a displayed record up by identifier.
    pub fn find_record(&self, id: &RecordId) -> Option<Record> {
        self.lock().collection.find(id).cloned()
    }

    /// Displayed record at a 1-based table position.
    pub fn record_at(&self, position: usize) -> Option<Record> {
        self.lock().collection.at_position(position).cloned()
    }

    /// Notification visible right now, if any.
    pub fn notification(&self) -> Option<Notification> {
        let now = self.clock.utc();
        let mut state = self.lock();
        state.notification.expire(now);
        state.notification.visible(now).cloned()
    }

    /// Snapshot everything a renderer needs.
    pub fn view(&self) -> DashboardView {
        let now = self.clock.utc();
        let mut state = self.lock();
        state.notification.expire(now);
        let form = FormField::ALL
            .into_iter()
            .map(|field| FieldView {
                field,
                value: state.form.values().get(field).to_owned(),
                error: state.form.visible_error(field),
            })
            .collect();
        let detail = state
            .selected
            .as_ref()
            .and_then(|id| state.collection.find(id))
            .cloned();
        DashboardView {
            mode: state.mode(),
            editing: state.edit_context.clone(),
            form,
            records: state.collection.records().to_vec(),
            selected: state.selected.clone(),
            detail,
            notification: state.notification.visible(now).cloned(),
        }
    }
}

impl<S> DashboardController<S>
where
    S: RecordService,
{
    /// Initial collection load, run once when the dashboard opens.
    ///
    /// Failures are handled exactly like any other refresh and are not
    /// retried.
    pub async fn load(&self) -> Result<RefreshOutcome, RecordServiceError> {
        debug!("loading initial record collection");
        self.refresh().await
    }

    /// Replace the collection snapshot with a fresh `list`.
    ///
    /// A response that arrives after a newer refresh was applied is dropped
    /// and reported as [`RefreshOutcome::Stale`]. Failures leave the snapshot
    /// untouched and are logged; they are only notified when the controller
    /// was configured with [`RefreshFailurePolicy::Notify`].
    pub async fn refresh(&self) -> Result<RefreshOutcome, RecordServiceError> {
        let ticket = self.lock().collection.begin_refresh();
        debug!(sequence = ticket.sequence(), "refreshing records");
        match self.service.list().await {
            Ok(records) => {
                let count = records.len();
                let outcome = self.lock().collection.apply(ticket, records);
                match outcome {
                    RefreshOutcome::Applied => {
                        debug!(sequence = ticket.sequence(), count, "record snapshot replaced");
                    }
                    RefreshOutcome::Stale => {
                        warn!(sequence = ticket.sequence(), "discarding stale record list");
                    }
                }
                Ok(outcome)
            }
            Err(error) => {
                warn!(sequence = ticket.sequence(), error = %error, "failed to fetch records");
                if self.refresh_failures == RefreshFailurePolicy::Notify {
                    let mut state = self.lock();
                    self.notify(
                        &mut state,
                        Notification::error(format!("Error occurred: {}", error.detail())),
                    );
                }
                Err(error)
            }
        }
    }

    async fn refresh_after_mutation(&self) {
        // Failures are already logged (and optionally notified) by `refresh`.
        if let Err(error) = self.refresh().await {
            debug!(error = %error, "post-mutation refresh failed");
        }
    }

    /// Submit the form.
    ///
    /// Validation runs first and blocks the action entirely when any field
    /// is invalid (every slot becomes touched so all errors show). In create
    /// mode the form values are sent to `create`; on success a notification
    /// is shown, the form is cleared and the collection refreshed. In edit
    /// mode this behaves exactly like [`Self::update`].
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Invalid`] when validation fails and
    /// [`ActionError::Service`] when the store refuses or cannot be reached;
    /// in the latter case an error notification is shown and no other state
    /// changes.
    pub async fn submit(&self) -> Result<ActionOutcome, ActionError> {
        let (fields, editing) = {
            let mut state = self.lock();
            let fields = state.prepare_submission()?;
            (fields, state.edit_context.clone())
        };
        match editing {
            Some(id) => self.send_update(id, fields).await,
            None => self.send_create(fields).await,
        }
    }

    /// Save the form over the record being edited.
    ///
    /// Returns [`ActionOutcome::Skipped`] immediately outside edit mode. On
    /// success the edit context and form are cleared and the collection is
    /// refreshed; on failure both are left as they were so the user can
    /// retry.
    ///
    /// # Errors
    ///
    /// As for [`Self::submit`].
    pub async fn update(&self) -> Result<ActionOutcome, ActionError> {
        let (id, fields) = {
            let mut state = self.lock();
            let Some(id) = state.edit_context.clone() else {
                return Ok(ActionOutcome::Skipped);
            };
            (id, state.prepare_submission()?)
        };
        self.send_update(id, fields).await
    }

    /// Delete record `id`.
    ///
    /// Never touches the form or edit context, even when another record is
    /// being edited.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Service`] when the store refuses or cannot be
    /// reached; an error notification is shown.
    pub async fn delete_record(&self, id: &RecordId) -> Result<ActionOutcome, ActionError> {
        debug!(record_id = %id, "deleting record");
        let result = self.service.delete(id).await;
        self.finish_mutation(Mutation::Delete, Some(id), result, |_| {})
            .await
    }

    async fn send_create(&self, fields: RecordFields) -> Result<ActionOutcome, ActionError> {
        debug!("creating record");
        let result = self.service.create(&fields).await;
        self.finish_mutation(Mutation::Create, None, result, |state| {
            if state.edit_context.is_none() {
                state.clear();
            }
        })
        .await
    }

    async fn send_update(
        &self,
        id: RecordId,
        fields: RecordFields,
    ) -> Result<ActionOutcome, ActionError> {
        debug!(record_id = %id, "updating record");
        let result = self.service.update(&id, &fields).await;
        self.finish_mutation(Mutation::Update, Some(&id), result, |state| {
            // The user may have moved on to another record meanwhile.
            if state.edit_context.as_ref() == Some(&id) {
                state.clear();
            }
        })
        .await
    }

    async fn finish_mutation(
        &self,
        mutation: Mutation,
        id: Option<&RecordId>,
        result: Result<(), RecordServiceError>,
        on_success: impl FnOnce(&mut DashboardState),
    ) -> Result<ActionOutcome, ActionError> {
        let record_id = id.map(ToString::to_string).unwrap_or_default();
        match result {
            Ok(()) => {
                info!(operation = mutation.as_str(), record_id = %record_id, "record mutation applied");
                {
                    let mut state = self.lock();
                    self.notify(&mut state, Notification::success(mutation.success_message()));
                    on_success(&mut state);
                }
                self.refresh_after_mutation().await;
                Ok(ActionOutcome::Applied)
            }
            Err(error) => {
                warn!(
                    operation = mutation.as_str(),
                    record_id = %record_id,
                    error = %error,
                    "record mutation failed"
                );
                {
                    let mut state = self.lock();
                    self.notify(&mut state, mutation.failure_notification(&error));
                }
                Err(ActionError::Service(error))
            }
        }
    }
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
