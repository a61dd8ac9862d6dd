use super::load_config;
use crate::output::Output;
use crate::server::{create_router, shutdown_signal, ServerContext};
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use reel_config::PathManager;
use reel_sources::{AdapterFactoryRegistry, ProxyGateway};
use std::path::{Path, PathBuf};

pub async fn run_serve(
    port: Option<u16>,
    static_dir: Option<PathBuf>,
    config_path: Option<&Path>,
    output: &Output,
) -> Result<()> {
    let paths = PathManager::default();
    let mut config = load_config(config_path, &paths)?;
    if let Some(port) = port {
        config.server.port = port;
    }
    if static_dir.is_some() {
        config.server.static_dir = static_dir;
    }

    let registry = AdapterFactoryRegistry::new();
    let adapter = registry
        .create(&config.upstream)
        .map_err(|e| eyre!("{}", e))
        .wrap_err("Failed to create upstream adapter")?;
    let gateway = ProxyGateway::new(config.upstream.family, adapter);

    if !gateway.is_configured() {
        tracing::warn!(
            upstream = %config.upstream.family,
            "No API key configured; every request will report a server configuration problem"
        );
        output.warn(format!(
            "No {} API key configured. Set {} to enable lookups.",
            config.upstream.family,
            config.upstream.family.key_variables().join(" or ")
        ));
    }

    let app = create_router(ServerContext { gateway }, config.server.static_dir.clone());

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        operation = "serve",
        address = %addr,
        upstream = %config.upstream.family,
        "Gateway listening"
    );
    output.success(format!("Listening on http://{}", addr));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    tracing::info!(operation = "serve", "Gateway stopped");
    Ok(())
}
