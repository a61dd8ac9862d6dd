//! Shared HTTP plumbing for adapters.

use crate::error::AdapterError;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

pub fn build_client(timeout_secs: u64) -> anyhow::Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .user_agent(concat!("reel-search/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// A fully read upstream response.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

/// GET `url` with `params`. Any failure before the whole body has arrived is
/// reported as `Unreachable`; the partial body is dropped.
pub async fn get_text(
    client: &Client,
    source: &str,
    url: &str,
    params: &[(&str, &str)],
) -> Result<UpstreamResponse, AdapterError> {
    let response = client
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(|e| AdapterError::Unreachable(format!("Could not reach {}: {}", source, describe(&e))))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| AdapterError::Unreachable(format!("Reading {} response failed: {}", source, describe(&e))))?;

    debug!(source = source, status = status, bytes = body.len(), "Upstream response received");
    Ok(UpstreamResponse { status, body })
}

// reqwest's Display includes the full URL, which carries the api key.
fn describe(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "timed out"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_body() || error.is_decode() {
        "incomplete body"
    } else {
        "request failed"
    }
}
