//! Request validation and error mapping in front of the configured adapter.
//!
//! The gateway is the only component that holds the upstream credential.
//! Every call resolves to an [`Outcome`]; nothing here returns `Err`.

use crate::error::AdapterError;
use crate::traits::{DetailRequest, SearchRequest, UpstreamAdapter};
use reel_config::UpstreamFamily;
use reel_models::{DetailRecord, Outcome, SearchPage, TypeFilter};
use std::sync::Arc;
use tracing::{error, info, warn};

const UPSTREAM_FAILED: &str = "The movie database could not be reached. Try again later.";

#[derive(Clone)]
pub struct ProxyGateway {
    adapter: Arc<dyn UpstreamAdapter>,
    family: UpstreamFamily,
}

impl ProxyGateway {
    pub fn new(family: UpstreamFamily, adapter: Arc<dyn UpstreamAdapter>) -> Self {
        Self { adapter, family }
    }

    pub fn family(&self) -> UpstreamFamily {
        self.family
    }

    pub fn is_configured(&self) -> bool {
        self.adapter.is_configured()
    }

    /// `page` and `type_filter` are the raw query-string values.
    pub async fn search(
        &self,
        query: Option<&str>,
        page: Option<&str>,
        type_filter: Option<&str>,
    ) -> Outcome<SearchPage> {
        if let Some(outcome) = self.require_credentials("search") {
            return outcome;
        }

        let query = query.map(str::trim).unwrap_or_default();
        if query.is_empty() {
            return Outcome::invalid("query required");
        }
        let page = match parse_page(page) {
            Ok(page) => page,
            Err(message) => return Outcome::invalid(message),
        };
        let filter = match parse_filter(type_filter) {
            Ok(filter) => filter,
            Err(message) => return Outcome::invalid(message),
        };

        let request = SearchRequest {
            query: query.to_string(),
            page,
            filter,
        };
        match self.adapter.search(&request).await {
            Ok(page) if page.is_empty() && page.total_results == 0 => {
                Outcome::not_found(format!("No titles match '{}'", request.query))
            }
            Ok(page) => {
                info!(
                    operation = "search",
                    upstream = %self.family,
                    query = %request.query,
                    page = page.page,
                    total_results = page.total_results,
                    "Search served"
                );
                Outcome::Found(page)
            }
            Err(err) => self.map_error("search", err),
        }
    }

    pub async fn detail(&self, id: Option<&str>, type_filter: Option<&str>) -> Outcome<DetailRecord> {
        if let Some(outcome) = self.require_credentials("detail") {
            return outcome;
        }

        let id = id.map(str::trim).unwrap_or_default();
        if id.is_empty() {
            return Outcome::invalid("id required");
        }
        let media_type = match parse_filter(type_filter) {
            Ok(filter) => filter.media_type(),
            Err(message) => return Outcome::invalid(message),
        };

        let request = DetailRequest {
            id: id.to_string(),
            media_type,
        };
        match self.adapter.detail(&request).await {
            Ok(detail) => {
                info!(operation = "detail", upstream = %self.family, id = %detail.id(), "Detail served");
                Outcome::Found(detail)
            }
            Err(err) => self.map_error("detail", err),
        }
    }

    fn require_credentials<T>(&self, operation: &str) -> Option<Outcome<T>> {
        if self.adapter.is_configured() {
            return None;
        }
        let variable = self.family.key_variables().first().copied().unwrap_or("API key");
        error!(
            operation = operation,
            upstream = %self.family,
            "Upstream credential is not configured; set {}",
            variable
        );
        Some(Outcome::misconfigured(format!(
            "The server has no {} API key configured.",
            self.family.as_str().to_uppercase()
        )))
    }

    fn map_error<T>(&self, operation: &str, err: AdapterError) -> Outcome<T> {
        match err {
            AdapterError::NotFound(message) => Outcome::not_found(message),
            AdapterError::InvalidId(message) => Outcome::invalid(message),
            AdapterError::Configuration(message) => {
                error!(operation = operation, upstream = %self.family, error = %message, "Upstream rejected configuration");
                Outcome::misconfigured(message)
            }
            AdapterError::Unreachable(message) | AdapterError::Upstream(message) => {
                warn!(operation = operation, upstream = %self.family, error = %message, "Upstream request failed");
                Outcome::unreachable(UPSTREAM_FAILED)
            }
        }
    }
}

fn parse_page(page: Option<&str>) -> Result<u32, String> {
    match page.map(str::trim).filter(|p| !p.is_empty()) {
        None => Ok(1),
        Some(raw) => match raw.parse::<u32>() {
            Ok(page) if page >= 1 => Ok(page),
            _ => Err(format!("page must be a whole number of at least 1, got '{}'", raw)),
        },
    }
}

fn parse_filter(type_filter: Option<&str>) -> Result<TypeFilter, String> {
    type_filter.unwrap_or_default().parse::<TypeFilter>()
}
