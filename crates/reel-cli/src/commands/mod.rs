pub mod config;
pub mod detail;
pub mod search;
pub mod serve;
pub mod terminal;
pub mod watchlist;

use color_eyre::eyre::Context;
use color_eyre::Result;
use reel_config::{Config, PathManager};
use reel_core::{FileBackend, HttpGateway, ViewController, WatchlistStore};
use std::path::Path;
use terminal::TerminalSink;

use crate::output::Output;

pub type TerminalController<'a> = ViewController<HttpGateway, TerminalSink<'a>, FileBackend>;

pub fn load_config(config_path: Option<&Path>, paths: &PathManager) -> Result<Config> {
    Config::load(config_path, &paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))
        .wrap_err("Failed to load configuration")
}

/// A view controller wired to the configured gateway, the terminal and the
/// on-disk watchlist.
pub fn client_controller<'a>(config: &Config, paths: &PathManager, output: &'a Output) -> Result<TerminalController<'a>> {
    let gateway = HttpGateway::new(&config.client.gateway_url, config.upstream.timeout_secs + 5)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))
        .wrap_err("Failed to build gateway client")?;
    let store = WatchlistStore::open(FileBackend::new(&paths.store_dir()));
    Ok(ViewController::new(
        gateway,
        TerminalSink::new(output),
        store,
        config.client.default_sort,
        config.client.default_type,
    ))
}
