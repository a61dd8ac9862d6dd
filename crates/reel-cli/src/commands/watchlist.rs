use super::{client_controller, load_config, terminal};
use crate::output::Output;
use crate::WatchlistCommands;
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use reel_config::PathManager;
use reel_core::DetailStatus;
use std::path::Path;

pub async fn run_watchlist(cmd: WatchlistCommands, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    paths
        .ensure_directories()
        .map_err(|e| eyre!("{}", e))
        .wrap_err("Failed to create data directories")?;
    let config = load_config(config_path, &paths)?;
    let mut controller = client_controller(&config, &paths, output)?;

    match cmd {
        WatchlistCommands::List => {
            controller.show_watchlist();
        }
        WatchlistCommands::Add { id, media_type } => {
            if controller.watchlist().contains(&id) {
                output.warn(format!("{} is already on your watchlist", id));
                return Ok(());
            }
            // Saved entries carry the title and poster, so the record has to be loaded first.
            // Related titles are never shown here, so their lookup is skipped.
            controller.load_detail(&id, media_type).await;
            if let DetailStatus::Failed { message } = &controller.state().detail.status {
                output.error(message);
                return Ok(());
            }
            // The canonical id may differ from what was typed (a bare TMDB number, say).
            let Some(loaded) = controller
                .state()
                .detail
                .content
                .as_ref()
                .map(|content| content.record.id().to_string())
            else {
                return Ok(());
            };
            if !controller.watchlist().contains(&loaded) {
                controller.toggle_watchlist(&loaded).wrap_err("Failed to update watchlist")?;
            }
            controller.show_watchlist();
        }
        WatchlistCommands::Remove { id } => {
            controller.show_watchlist();
            if !controller.watchlist().contains(&id) {
                output.warn(format!("{} is not on your watchlist", id));
                return Ok(());
            }
            controller.toggle_watchlist(&id).wrap_err("Failed to update watchlist")?;
        }
    }

    let state = controller.state();
    terminal::print_watchlist(output, &state.watchlist, &state.watchlist_count);
    Ok(())
}
