//! Console configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{DEFAULT_NOTIFICATION_TIMEOUT, DashboardSettings, RefreshFailurePolicy};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the records console, read from `RECORDS_CONSOLE_*`
/// variables, configuration files and command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECORDS_CONSOLE")]
pub struct ConsoleSettings {
    /// Origin of the record and auth API.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// How long notifications stay visible, in milliseconds.
    pub notification_timeout_ms: Option<u64>,
    /// Show an error notification when a refresh fails.
    #[ortho_config(default = false)]
    pub notify_refresh_failures: bool,
}

impl ConsoleSettings {
    /// Return the configured API origin, falling back to the local default.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] when the configured value is not a URL.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
    }

    /// Return the per-request timeout; zero falls back to the default.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_REQUEST_TIMEOUT, Duration::from_secs)
    }

    /// Return the notification lifetime, falling back to the default.
    pub fn notification_timeout(&self) -> Duration {
        self.notification_timeout_ms
            .map_or(DEFAULT_NOTIFICATION_TIMEOUT, Duration::from_millis)
    }

    /// Build the controller settings.
    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            notification_timeout: self.notification_timeout(),
            refresh_failures: if self.notify_refresh_failures {
                RefreshFailurePolicy::Notify
            } else {
                RefreshFailurePolicy::Silent
            },
        }
    }
}
