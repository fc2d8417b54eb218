//! Console entry-point: loads settings, wires the HTTP adapters into the
//! dashboard controller and runs the interactive session on stdin/stdout.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::sync::Arc;

use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::io::BufReader;
use tokio::runtime::Builder;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use records_console::ConsoleSettings;
use records_console::domain::DashboardController;
use records_console::inbound::console::ConsoleSession;
use records_console::outbound::http::{HttpAuthService, HttpRecordService};

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ConsoleSettings::load()
        .map_err(|err| eyre!("failed to load console settings: {err}"))?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to create Tokio runtime")?;
    runtime.block_on(run(settings))
}

async fn run(settings: ConsoleSettings) -> Result<()> {
    let base_url = settings.base_url().wrap_err("invalid base URL")?;
    let timeout = settings.request_timeout();
    let records = HttpRecordService::new(base_url.clone(), timeout)
        .wrap_err("failed to build record client")?;
    let auth =
        HttpAuthService::new(base_url.clone(), timeout).wrap_err("failed to build auth client")?;
    info!(base_url = %base_url, timeout_secs = timeout.as_secs(), "starting records console");

    let dashboard = DashboardController::new(
        Arc::new(records),
        Arc::new(DefaultClock),
        settings.dashboard_settings(),
    );
    if let Err(error) = dashboard.load().await {
        debug!(error = %error, "initial load failed; starting with an empty table");
    }

    let session = ConsoleSession::new(dashboard, Arc::new(auth));
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout().lock();
    session
        .run(stdin, &mut stdout)
        .await
        .wrap_err("console session failed")
}
