//! Single-slot transient status messages.
//!
//! The channel never queues: showing a notification replaces whatever is
//! visible and restarts the auto-dismiss countdown. Visibility is computed
//! from the time the notification was shown, so callers pass "now" from a
//! [`mockable::Clock`] rather than arming timers.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// Auto-dismiss timeout used when none is configured.
pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(6);

/// Outcome class of the action being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The action went through.
    Success,
    /// The action failed or the server could not be reached.
    Error,
}

impl Severity {
    /// Title shown above the message.
    pub fn title(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Error => "Error",
        }
    }
}

/// A status message for the last action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    severity: Severity,
    message: String,
}

impl Notification {
    /// Build a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    /// Build an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Severity of the reported outcome.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity.title(), self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Shown {
    notification: Notification,
    shown_at: DateTime<Utc>,
}

/// Holds at most one notification and hides it after `timeout`.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use chrono::{TimeDelta, Utc};
/// use records_console::domain::{Notification, NotificationChannel};
///
/// let mut channel = NotificationChannel::new(Duration::from_secs(6));
/// let now = Utc::now();
/// channel.show(Notification::success("saved"), now);
/// assert!(channel.visible(now).is_some());
/// assert!(channel.visible(now + TimeDelta::seconds(6)).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannel {
    current: Option<Shown>,
    timeout: TimeDelta,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TIMEOUT)
    }
}

impl NotificationChannel {
    /// Create an empty channel with the given auto-dismiss timeout.
    ///
    /// Timeouts too large for a calendar delta saturate to the maximum.
    pub fn new(timeout: Duration) -> Self {
        Self {
            current: None,
            timeout: TimeDelta::from_std(timeout).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Show `notification`, replacing any visible one and restarting the
    /// countdown from `now`.
    pub fn show(&mut self, notification: Notification, now: DateTime<Utc>) {
        self.current = Some(Shown {
            notification,
            shown_at: now,
        });
    }

    /// Hide the current notification.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Notification visible at `now`, if any.
    pub fn visible(&self, now: DateTime<Utc>) -> Option<&Notification> {
        let shown = self.current.as_ref()?;
        let expires_at = shown.shown_at.checked_add_signed(self.timeout);
        match expires_at {
            Some(expires_at) if now >= expires_at => None,
            _ => Some(&shown.notification),
        }
    }

    /// Drop the stored notification once it has expired.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        if self.visible(now).is_none() {
            self.current = None;
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[rstest]
    fn hides_after_timeout(start: DateTime<Utc>) {
        let mut channel = NotificationChannel::default();
        channel.show(Notification::success("added"), start);

        assert!(channel.visible(start + TimeDelta::milliseconds(5_999)).is_some());
        assert!(channel.visible(start + TimeDelta::seconds(6)).is_none());
    }

    #[rstest]
    fn replacement_resets_timeout(start: DateTime<Utc>) {
        let mut channel = NotificationChannel::new(Duration::from_secs(6));
        channel.show(Notification::success("first"), start);
        let later = start + TimeDelta::seconds(4);
        channel.show(Notification::error("second"), later);

        let shown = channel
            .visible(start + TimeDelta::seconds(8))
            .expect("second notification still visible");
        assert_eq!(shown.message(), "second");
        assert_eq!(shown.severity(), Severity::Error);
        assert!(channel.visible(later + TimeDelta::seconds(6)).is_none());
    }

    #[rstest]
    fn dismiss_hides_immediately(start: DateTime<Utc>) {
        let mut channel = NotificationChannel::default();
        channel.show(Notification::error("boom"), start);
        channel.dismiss();
        assert!(channel.visible(start).is_none());
    }

    #[rstest]
    fn expire_drops_stale_notification(start: DateTime<Utc>) {
        let mut channel = NotificationChannel::new(Duration::from_secs(1));
        channel.show(Notification::success("done"), start);
        channel.expire(start + TimeDelta::seconds(2));
        assert_eq!(channel, NotificationChannel::new(Duration::from_secs(1)));
    }

    #[rstest]
    fn display_includes_title() {
        assert_eq!(
            Notification::error("Failed to delete details").to_string(),
            "[Error] Failed to delete details"
        );
    }
}
