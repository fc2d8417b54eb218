//! Helpers shared by the HTTP adapters.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};

/// Failure observed while executing one request.
#[derive(Debug)]
pub(super) enum TransportFailure {
    /// No response was received.
    Transport(String),
    /// The client-side timeout elapsed.
    Timeout(String),
    /// The server answered with a non-success status.
    Status { status: StatusCode, message: String },
}

pub(super) fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

/// Join `segments` onto `base`, percent-encoding each one as a single path
/// segment. A trailing slash on `base` is not doubled.
pub(super) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, String> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| format!("base URL {base} cannot carry a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Send `request` and return the body of a 2xx response.
pub(super) async fn execute(request: RequestBuilder) -> Result<Vec<u8>, TransportFailure> {
    let response = request
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(map_transport_error)?;

    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(TransportFailure::Status {
            status,
            message: status_message(status, body.as_ref()),
        });
    }
    Ok(body.to_vec())
}

fn map_transport_error(error: reqwest::Error) -> TransportFailure {
    if error.is_timeout() {
        TransportFailure::Timeout(error.to_string())
    } else {
        TransportFailure::Transport(error.to_string())
    }
}

fn status_message(status: StatusCode, body: &[u8]) -> String {
    let body_preview = body_preview(body);
    if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
