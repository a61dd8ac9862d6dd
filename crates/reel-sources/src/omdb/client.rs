use crate::capabilities::{IdScheme, ParsedId};
use crate::error::AdapterError;
use crate::http::{self, UpstreamResponse};
use crate::omdb::api;
use crate::traits::{DetailRequest, SearchRequest, UpstreamAdapter};
use async_trait::async_trait;
use reel_config::UpstreamConfig;
use reel_models::{DetailRecord, MediaType, SearchPage, TypeFilter};
use reqwest::Client;
use tracing::{debug, info};

/// IMDb ids are already globally unique, so they pass through untouched.
pub struct OmdbIdScheme;

impl IdScheme for OmdbIdScheme {
    fn encode(&self, _media_type: MediaType, native_id: &str) -> String {
        native_id.to_string()
    }

    fn parse(&self, id: &str, hint: Option<MediaType>) -> Result<ParsedId, AdapterError> {
        let id = id.trim();
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return Err(AdapterError::InvalidId(format!("'{}' is not an IMDb id", id)));
        }
        Ok(ParsedId {
            media_type: hint,
            native_id: id.to_string(),
        })
    }
}

pub struct OmdbAdapter {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl OmdbAdapter {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: http::build_client(config.timeout_secs)?,
            api_key: config.credential().map(str::to_string),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| api::DEFAULT_BASE_URL.to_string()),
        })
    }

    fn api_key(&self) -> Result<&str, AdapterError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AdapterError::Configuration("Set OMDB_KEY when starting the server.".to_string()))
    }

    async fn fetch(&self, params: &[(&str, &str)]) -> Result<UpstreamResponse, AdapterError> {
        let api_key = self.api_key()?;
        let mut query = vec![("apikey", api_key)];
        query.extend_from_slice(params);

        let response = http::get_text(&self.client, "OMDb", &self.base_url, &query).await?;
        // OMDb reports bad keys and misses as JSON with 200/401; only 5xx is unusable.
        if response.status >= 500 {
            return Err(AdapterError::Upstream(format!("OMDb responded with status {}", response.status)));
        }
        Ok(response)
    }
}

#[async_trait]
impl UpstreamAdapter for OmdbAdapter {
    fn source_name(&self) -> &str {
        "omdb"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn id_scheme(&self) -> &dyn IdScheme {
        &OmdbIdScheme
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, AdapterError> {
        let page = request.page.to_string();
        let mut params = vec![("s", request.query.as_str()), ("page", page.as_str())];
        if let TypeFilter::Movie | TypeFilter::Series = request.filter {
            params.push(("type", request.filter.as_str()));
        }

        let response = self.fetch(&params).await?;
        let page = api::normalize_search(&response.body, request)?;
        info!(
            operation = "omdb_search",
            query = %request.query,
            page = page.page,
            total_results = page.total_results,
            records = page.records.len(),
            "OMDb search normalized"
        );
        Ok(page)
    }

    async fn detail(&self, request: &DetailRequest) -> Result<DetailRecord, AdapterError> {
        let parsed = self.id_scheme().parse(&request.id, request.media_type)?;
        let response = self
            .fetch(&[("i", parsed.native_id.as_str()), ("plot", "full")])
            .await?;
        let detail = api::normalize_detail(&response.body, parsed.media_type)?;
        debug!(operation = "omdb_detail", id = %detail.id(), "OMDb detail normalized");
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(server: &MockServer, key: Option<&str>) -> OmdbAdapter {
        let config = UpstreamConfig {
            api_key: key.map(str::to_string),
            base_url: Some(format!("{}/", server.uri())),
            timeout_secs: 5,
            ..UpstreamConfig::default()
        };
        OmdbAdapter::new(&config).unwrap()
    }

    #[test]
    fn test_id_scheme_passes_imdb_ids_through() {
        let scheme = OmdbIdScheme;
        let parsed = scheme.parse("tt1375666", None).unwrap();
        assert_eq!(parsed.native_id, "tt1375666");
        assert_eq!(parsed.media_type, None);
        assert_eq!(scheme.encode(MediaType::Movie, "tt1375666"), "tt1375666");
        assert!(scheme.parse("  ", None).is_err());
    }

    #[tokio::test]
    async fn test_search_sends_key_and_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("apikey", "k3y"))
            .and(query_param("s", "alien"))
            .and(query_param("page", "1"))
            .and(query_param("type", "movie"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Search": [{"Title": "Alien", "Year": "1979", "imdbID": "tt0078748", "Type": "movie", "Poster": "N/A"}],
                "totalResults": "1",
                "Response": "True"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = SearchRequest {
            query: "alien".to_string(),
            page: 1,
            filter: TypeFilter::Movie,
        };
        let page = adapter(&server, Some("k3y")).search(&request).await.unwrap();
        assert_eq!(page.records[0].id, "tt0078748");
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_missing_key_never_hits_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let adapter = adapter(&server, None);
        assert!(!adapter.is_configured());

        let request = SearchRequest {
            query: "alien".to_string(),
            page: 1,
            filter: TypeFilter::Any,
        };
        let err = adapter.search(&request).await.unwrap_err();
        assert!(matches!(err, AdapterError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("partial {\"Sear"))
            .mount(&server)
            .await;

        let request = DetailRequest {
            id: "tt0078748".to_string(),
            media_type: None,
        };
        let err = adapter(&server, Some("k3y")).detail(&request).await.unwrap_err();
        assert!(matches!(err, AdapterError::Upstream(_)));
    }
}
