mod chat;
mod cli;
mod commands;
mod handler;
mod reply;
mod shutdown;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use heardle_core::Config;
use reply::Markup;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (default to info when RUST_LOG is unset)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("heardle=info,heardle_core=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = load_config(&args);

    match &args.command {
        Some(Command::Library { action }) => commands::library::run(&config, action),
        Some(Command::Play { song_id, markdown }) => {
            let markup = if *markdown {
                Markup::MarkdownV2
            } else {
                Markup::Plain
            };
            commands::play::run(&config, song_id.as_deref(), markup)
        }
        None => commands::play::run(&config, None, Markup::Plain),
    }
}

/// Load the config file, falling back to defaults, then apply CLI overrides
fn load_config(args: &Args) -> Config {
    let path = args.config.clone().or_else(Config::default_path);

    let mut config = match path {
        Some(path) if path.exists() => match Config::load(&path) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Failed to load config {:?}: {}, using defaults", path, e);
                Config::default()
            }
        },
        Some(path) => {
            warn!("Config file {:?} not found, using defaults", path);
            Config::default()
        }
        None => Config::default(),
    };

    if let Some(library) = &args.library {
        config.catalog.cache_path = library.clone();
    }
    if let Some(clips) = &args.clips {
        config.clips.dir = clips.clone();
    }

    config
}
