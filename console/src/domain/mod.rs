//! Domain primitives, rules and the dashboard controller.
//!
//! Purpose: keep every piece of screen state and every rule about records in
//! transport-agnostic types. Adapters reach the remote store only through the
//! ports in [`ports`].
//!
//! Public surface:
//! - Record, RecordId, RecordFields — the persisted person entity.
//! - FormField, FieldError, ValidationReport — the validation engine.
//! - FormState, FormValues — the editable working copy.
//! - NotificationChannel — the single-slot status message.
//! - CollectionSnapshot — the last list fetched from the server.
//! - DashboardController — the form/table controller.
//! - Credentials, Registration — login and sign-up payloads.

pub mod auth;
pub mod collection;
pub mod dashboard;
pub mod form;
pub mod notification;
pub mod ports;
pub mod record;
pub mod validation;

pub use self::auth::{AuthValidationError, Credentials, Registration};
pub use self::collection::{CollectionSnapshot, RefreshOutcome, RefreshTicket};
pub use self::dashboard::{
    ActionError, ActionOutcome, DashboardController, DashboardSettings, DashboardView, FieldView,
    Mode, RefreshFailurePolicy,
};
pub use self::form::{FieldSlot, FormState, FormValues};
pub use self::notification::{
    DEFAULT_NOTIFICATION_TIMEOUT, Notification, NotificationChannel, Severity,
};
pub use self::record::{Record, RecordFields, RecordId, RecordValidationError};
pub use self::validation::{FieldError, FormField, ValidationReport};
