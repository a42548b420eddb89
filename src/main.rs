#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::perf)]
#![warn(clippy::complexity)]
#![warn(clippy::style)]
#![allow(clippy::multiple_crate_versions)]

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{Result, bail, ensure};
use clap::{Parser, Subcommand};
use playlist_scout::{
    categories::CategoryCatalog,
    export::update_all,
    server::{AppState, serve},
    suggest::{DEFAULT_CHANNEL_LIMIT, DEFAULT_PLAYLIST_LIMIT, SearchLimits, suggest_playlists},
    util::{init_http_client, init_tracing, spawn_ct_watcher},
    youtube::InnertubeClient,
};
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Suggests YouTube playlists for a set of topics, seeded by well-known channel names
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    search: SearchArgs,
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// How many channels to keep for each seed channel name
    #[arg(long, global = true, env = "SCOUT_CHANNEL_LIMIT", default_value_t = DEFAULT_CHANNEL_LIMIT)]
    channel_limit: usize,

    /// How many playlists to keep for each channel found
    #[arg(long, global = true, env = "SCOUT_PLAYLIST_LIMIT", default_value_t = DEFAULT_PLAYLIST_LIMIT)]
    playlist_limit: usize,

    /// Interface language sent to YouTube (`hl`)
    #[arg(long, global = true, env = "SCOUT_LANGUAGE", default_value = "pt")]
    language: String,

    /// Content region sent to YouTube (`gl`)
    #[arg(long, global = true, env = "SCOUT_REGION", default_value = "BR")]
    region: String,
}

impl SearchArgs {
    fn limits(&self) -> Result<SearchLimits> {
        ensure!(self.channel_limit > 0, "--channel-limit must be at least 1");
        ensure!(self.playlist_limit > 0, "--playlist-limit must be at least 1");

        Ok(SearchLimits {
            channels: self.channel_limit,
            playlists: self.playlist_limit,
        })
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Refreshes suggestions for every category and writes them to a timestamped JSON file
    Update {
        /// Directory the `playlists_<timestamp>.json` file is written to
        #[arg(short, long, env = "SCOUT_OUTPUT_DIR", default_value = ".")]
        output_dir: PathBuf,
    },

    /// Serves suggestions over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "SCOUT_BIND", default_value = "127.0.0.1:8000")]
        bind: SocketAddr,
    },

    /// Prints suggestions for a single category as JSON
    Suggest {
        /// Category name, e.g. "Marketing Digital"
        category: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    debug!("{args:?}");
    let limits = args.search.limits()?;

    let client = InnertubeClient::new(
        init_http_client(&args.search.language)?,
        &args.search.language,
        &args.search.region,
    );
    let catalog = CategoryCatalog::builtin();

    let ct = CancellationToken::new();
    spawn_ct_watcher(ct.clone());

    match args.command {
        Command::Update { output_dir } => {
            update_all(&client, &catalog, limits, &output_dir, &ct).await?;
        }

        Command::Serve { bind } => {
            let state = AppState {
                search: Arc::new(client),
                catalog,
                limits,
            };
            serve(bind, state, ct).await?;
        }

        Command::Suggest { category } => {
            let Some(category) = catalog.get(&category) else {
                bail!(
                    "Unknown category {category:?}. Available categories: {}",
                    catalog.names().join(", ")
                );
            };

            let playlists = select! {
                () = ct.cancelled() => bail!("Cancelled"),
                p = suggest_playlists(&client, category.seed_channels, limits) => p?,
            };
            println!("{}", serde_json::to_string_pretty(&playlists)?);
        }
    }

    info!("All done successfully!");
    Ok(())
}
