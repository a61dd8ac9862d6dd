use crate::capabilities::IdScheme;
use crate::error::AdapterError;
use crate::http;
use crate::tmdb::api;
use crate::tmdb::id::TmdbIdScheme;
use crate::tmdb::normalize;
use crate::traits::{DetailRequest, SearchRequest, UpstreamAdapter};
use async_trait::async_trait;
use reel_config::UpstreamConfig;
use reel_models::{DetailRecord, MediaType, SearchPage, TypeFilter};
use reqwest::Client;
use tracing::{debug, info};

pub struct TmdbAdapter {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl TmdbAdapter {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| api::DEFAULT_BASE_URL.to_string());
        Ok(Self {
            client: http::build_client(config.timeout_secs)?,
            api_key: config.credential().map(str::to_string),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn api_key(&self) -> Result<&str, AdapterError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AdapterError::Configuration("Set TMDB_KEY when starting the server.".to_string()))
    }

    async fn fetch(&self, path: &str, params: &[(&str, &str)]) -> Result<String, AdapterError> {
        let api_key = self.api_key()?;
        let mut query = vec![("api_key", api_key), ("language", "en-US")];
        query.extend_from_slice(params);

        let url = format!("{}{}", self.base_url, path);
        let response = http::get_text(&self.client, "TMDB", &url, &query).await?;
        api::check_response(response.status, &response.body)?;
        Ok(response.body)
    }
}

#[async_trait]
impl UpstreamAdapter for TmdbAdapter {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn id_scheme(&self) -> &dyn IdScheme {
        &TmdbIdScheme
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, AdapterError> {
        let (path, implied) = match request.filter {
            TypeFilter::Movie => ("/search/movie", Some(MediaType::Movie)),
            TypeFilter::Series => ("/search/tv", Some(MediaType::Series)),
            TypeFilter::Any => ("/search/multi", None),
        };
        let page = normalize::upstream_page(request.page).to_string();
        let body = self
            .fetch(
                path,
                &[
                    ("query", request.query.as_str()),
                    ("page", page.as_str()),
                    ("include_adult", "false"),
                ],
            )
            .await?;

        let page = normalize::normalize_search(&body, request, implied)?;
        info!(
            operation = "tmdb_search",
            endpoint = path,
            query = %request.query,
            page = page.page,
            total_results = page.total_results,
            records = page.records.len(),
            "TMDB search normalized"
        );
        Ok(page)
    }

    async fn detail(&self, request: &DetailRequest) -> Result<DetailRecord, AdapterError> {
        let (media_type, numeric) = TmdbIdScheme::split(&request.id, request.media_type)?;
        let path = format!("/{}/{}", TmdbIdScheme::tag(media_type), numeric);
        let body = self.fetch(&path, &[("append_to_response", "credits")]).await?;

        let detail = normalize::normalize_detail(&body, media_type)?;
        debug!(operation = "tmdb_detail", id = %detail.id(), "TMDB detail normalized");
        Ok(detail)
    }
}
