//! HTTP surface of the proxy gateway.

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use reel_models::Outcome;
use reel_sources::ProxyGateway;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct ServerContext {
    pub gateway: ProxyGateway,
}

/// Raw query parameters. Validation happens in the gateway so that bad input
/// comes back as an `invalid` outcome rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    query: Option<String>,
    page: Option<String>,
    #[serde(rename = "type")]
    type_filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailParams {
    id: Option<String>,
    #[serde(rename = "type")]
    type_filter: Option<String>,
}

pub fn create_router(ctx: ServerContext, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    let mut app = Router::new()
        .route("/api/search", get(search))
        .route("/api/detail", get(detail))
        .route("/api/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static files from {:?}", dir);
            let index_path = dir.join("index.html");
            app = app.fallback_service(
                ServeDir::new(&dir)
                    .append_index_html_on_directories(true)
                    .not_found_service(ServeFile::new(index_path)),
            );
        } else {
            tracing::warn!("Static directory {:?} does not exist; not serving static files", dir);
        }
    }

    app
}

async fn search(State(ctx): State<ServerContext>, Query(params): Query<SearchParams>) -> Response {
    let outcome = ctx
        .gateway
        .search(
            params.query.as_deref(),
            params.page.as_deref(),
            params.type_filter.as_deref(),
        )
        .await;
    outcome_response(outcome)
}

async fn detail(State(ctx): State<ServerContext>, Query(params): Query<DetailParams>) -> Response {
    let outcome = ctx
        .gateway
        .detail(params.id.as_deref(), params.type_filter.as_deref())
        .await;
    outcome_response(outcome)
}

async fn health(State(ctx): State<ServerContext>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "upstream": ctx.gateway.family().as_str(),
        "configured": ctx.gateway.is_configured(),
    }))
}

fn outcome_response<T: Serialize>(outcome: Outcome<T>) -> Response {
    let status = StatusCode::from_u16(outcome.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(outcome)).into_response()
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use reel_config::{UpstreamConfig, UpstreamFamily};
    use reel_sources::AdapterFactoryRegistry;
    use serde_json::Value;
    use tower::ServiceExt;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn router(api_key: Option<&str>, base_url: Option<String>) -> Router {
        let config = UpstreamConfig {
            family: UpstreamFamily::Omdb,
            api_key: api_key.map(str::to_string),
            base_url,
            timeout_secs: 2,
        };
        let adapter = AdapterFactoryRegistry::new().create(&config).unwrap();
        let gateway = ProxyGateway::new(config.family, adapter);
        create_router(ServerContext { gateway }, None)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_configuration() {
        let (status, body) = get(router(None, None), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["upstream"], "omdb");
        assert_eq!(body["configured"], false);
    }

    #[tokio::test]
    async fn test_missing_key_is_500() {
        let (status, body) = get(router(None, None), "/api/search?query=batman").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["outcome"], "server_misconfigured");
    }

    #[tokio::test]
    async fn test_blank_query_is_invalid_not_transport_error() {
        let (status, body) = get(router(Some("k3y"), None), "/api/search?query=%20%20").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "invalid");
        assert_eq!(body["message"], "query required");

        let (status, body) = get(router(Some("k3y"), None), "/api/search?query=x&page=0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "invalid");
    }

    #[tokio::test]
    async fn test_search_found_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("s", "inception"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Search": [{"Title": "Inception", "Year": "2010", "imdbID": "tt1375666", "Type": "movie", "Poster": "N/A"}],
                "totalResults": "1",
                "Response": "True"
            })))
            .mount(&server)
            .await;

        let app = router(Some("k3y"), Some(format!("{}/", server.uri())));
        let (status, body) = get(app, "/api/search?query=inception").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "found");
        assert_eq!(body["page"], 1);
        assert_eq!(body["totalPages"], 1);
        assert_eq!(body["records"][0]["id"], "tt1375666");
        assert_eq!(body["records"][0]["posterUrl"], "N/A");
    }

    #[tokio::test]
    async fn test_detail_not_found_is_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Response": "False",
                "Error": "Incorrect IMDb ID."
            })))
            .mount(&server)
            .await;

        let app = router(Some("k3y"), Some(format!("{}/", server.uri())));
        let (status, body) = get(app, "/api/detail?id=tt0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "not_found");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_502() {
        let app = router(Some("k3y"), Some("http://127.0.0.1:9/".to_string()));
        let (status, body) = get(app, "/api/detail?id=tt1375666").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["outcome"], "upstream_unreachable");
    }
}
