use super::{client_controller, load_config, terminal};
use crate::output::Output;
use color_eyre::Result;
use reel_config::PathManager;
use reel_models::{SortMode, TypeFilter};
use std::path::Path;

pub async fn run_search(
    query: String,
    page: u32,
    type_filter: Option<TypeFilter>,
    sort: Option<SortMode>,
    config_path: Option<&Path>,
    output: &Output,
) -> Result<()> {
    let paths = PathManager::default();
    let mut config = load_config(config_path, &paths)?;
    if let Some(filter) = type_filter {
        config.client.default_type = filter;
    }
    if let Some(sort) = sort {
        config.client.default_sort = sort;
    }

    tracing::debug!(
        operation = "search",
        query = %query,
        page = page,
        filter = %config.client.default_type,
        sort = %config.client.default_sort,
        "Running search"
    );

    let mut controller = client_controller(&config, &paths, output)?;
    controller.search_page(&query, page).await;
    terminal::print_search(output, &controller.state().search);
    Ok(())
}
