//! Client side of the proxy gateway.

use async_trait::async_trait;
use reel_models::{DetailRecord, MediaType, Outcome, SearchPage, TypeFilter};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// What the view controller needs from the gateway. Every call resolves to an
/// outcome; transport trouble is folded into `UpstreamUnreachable`.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn search(&self, query: &str, page: u32, filter: TypeFilter) -> Outcome<SearchPage>;

    async fn detail(&self, id: &str, media_type: Option<MediaType>) -> Outcome<DetailRecord>;
}

/// Talks to a running gateway over HTTP.
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Outcome<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = match self.client.get(&url).query(params).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Gateway request failed");
                return Outcome::unreachable("Could not reach the gateway");
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %url, error = %e, "Gateway response was cut short");
                return Outcome::unreachable("Gateway response was incomplete");
            }
        };

        // Failure outcomes arrive with 500/502, so the body is read regardless of status.
        match serde_json::from_str::<Outcome<T>>(&body) {
            Ok(outcome) => {
                debug!(url = %url, status = status, outcome = outcome.kind(), "Gateway responded");
                outcome
            }
            Err(e) => {
                warn!(url = %url, status = status, error = %e, "Gateway returned an unreadable body");
                Outcome::unreachable(format!("Gateway returned an unreadable response (status {})", status))
            }
        }
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn search(&self, query: &str, page: u32, filter: TypeFilter) -> Outcome<SearchPage> {
        let page = page.to_string();
        let mut params = vec![("query", query), ("page", page.as_str())];
        if let Some(media_type) = filter.media_type() {
            params.push(("type", media_type.as_str()));
        }
        self.get("/api/search", &params).await
    }

    async fn detail(&self, id: &str, media_type: Option<MediaType>) -> Outcome<DetailRecord> {
        let mut params = vec![("id", id)];
        if let Some(media_type) = media_type {
            params.push(("type", media_type.as_str()));
        }
        self.get("/api/detail", &params).await
    }
}
