use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{config, detail, search, serve, watchlist};
use reel_config::{PathManager, UpstreamFamily};
use reel_models::{MediaType, SortMode, TypeFilter};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;
mod server;

#[derive(Parser)]
#[command(name = "reel")]
#[command(about = "Reel - Search movies and series, keep a watchlist")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Path to a configuration file (defaults to the per-user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the proxy gateway
    #[command(long_about = "Run the HTTP gateway that holds the upstream API key and answers /api/search and /api/detail. Optionally serves a static client from a directory.")]
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Directory of static client files to serve
        #[arg(long, value_name = "DIR")]
        static_dir: Option<PathBuf>,

        /// Also write logs to the daily-rotated server log file
        #[arg(long, action = ArgAction::SetTrue)]
        log_file: bool,
    },
    /// Search titles through the gateway
    Search {
        /// Title text to search for
        query: String,

        /// Result page (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Restrict results: any, movie or series
        #[arg(long = "type", value_name = "TYPE")]
        type_filter: Option<TypeFilter>,

        /// Order of the current page: year-desc, year-asc, title-asc, title-desc
        #[arg(long)]
        sort: Option<SortMode>,
    },
    /// Show the full details of one title
    Detail {
        /// Title id as returned by search
        id: String,

        /// Kind of title, for upstreams whose ids need it
        #[arg(long = "type", value_name = "TYPE")]
        media_type: Option<MediaType>,
    },
    /// Manage the local watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// List saved titles in the order they were added
    List,
    /// Save a title
    Add {
        id: String,

        /// Kind of title, for upstreams whose ids need it
        #[arg(long = "type", value_name = "TYPE")]
        media_type: Option<MediaType>,
    },
    /// Remove a saved title
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a default configuration file
    Init {
        /// Upstream family: omdb or tmdb
        #[arg(long)]
        upstream: Option<UpstreamFamily>,

        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve { log_file: true, .. } => {
            let log_path = PathManager::default().server_log_file();
            logging::init_logging_with_file(cli.verbose, cli.quiet, Some(&log_path))
        }
        _ => logging::init_logging(cli.verbose, cli.quiet),
    }
    .map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Serve { port, static_dir, .. } => serve::run_serve(port, static_dir, config_path, &output).await,
        Commands::Search {
            query,
            page,
            type_filter,
            sort,
        } => search::run_search(query, page, type_filter, sort, config_path, &output).await,
        Commands::Detail { id, media_type } => detail::run_detail(id, media_type, config_path, &output).await,
        Commands::Watchlist { cmd } => {
            let cmd = cmd.unwrap_or(WatchlistCommands::List);
            watchlist::run_watchlist(cmd, config_path, &output).await
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, config_path, &output)
        }
    }
}
