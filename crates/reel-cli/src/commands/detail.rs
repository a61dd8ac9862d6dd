use super::{client_controller, load_config, terminal};
use crate::output::Output;
use color_eyre::Result;
use reel_config::PathManager;
use reel_models::MediaType;
use std::path::Path;

pub async fn run_detail(id: String, media_type: Option<MediaType>, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = load_config(config_path, &paths)?;
    let mut controller = client_controller(&config, &paths, output)?;

    controller.open_detail(&id, media_type).await;
    terminal::print_detail(output, &controller.state().detail);
    Ok(())
}
