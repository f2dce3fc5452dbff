//! CLI argument definitions for heardle.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "heardle")]
#[command(about = "Daily guess-the-song game", version)]
pub struct Args {
    /// Config file (default: <config dir>/heardle/heardle.toml)
    #[arg(long, value_name = "FILE", env = "HEARDLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Library cache file (overrides config)
    #[arg(long, value_name = "FILE")]
    pub library: Option<PathBuf>,

    /// Clip directory (overrides config)
    #[arg(long, value_name = "DIR")]
    pub clips: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a round on the console (default)
    Play {
        /// Song id to play (default: random song from the library)
        #[arg(long)]
        song_id: Option<String>,
        /// Render replies as Telegram MarkdownV2
        #[arg(long)]
        markdown: bool,
    },
    /// Inspect or rebuild the library cache
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },
}

#[derive(Subcommand)]
pub enum LibraryAction {
    /// Show the number of songs and artists in the cache
    Stats,
    /// List songs matching a query
    Suggest {
        /// Text to search in "artist; title"
        query: String,
        /// Maximum number of results (default: from config)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Rebuild the cache from a JSON library export
    Import {
        /// JSON array of library records
        source: PathBuf,
    },
}
