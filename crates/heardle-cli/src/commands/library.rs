//! Library cache inspection and import.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use heardle_core::{Config, LibraryCache, SongCatalog};
use tracing::info;

use crate::cli::LibraryAction;

pub fn run(config: &Config, action: &LibraryAction) -> Result<()> {
    let cache_path = &config.catalog.cache_path;

    match action {
        LibraryAction::Stats => {
            let library = load(cache_path)?;
            let artists: HashSet<_> = library.iter().map(|song| &song.artist).collect();
            println!("Library: {}", cache_path.display());
            println!("  Songs   : {}", library.len());
            println!("  Artists : {}", artists.len());
        }
        LibraryAction::Suggest { query, limit } => {
            let library = load(cache_path)?;
            let limit = limit.unwrap_or(config.catalog.suggestion_limit);
            let suggestions = library.suggest(query, limit);
            if suggestions.is_empty() {
                println!("No songs match \"{}\"", query);
            }
            for song in suggestions {
                println!("{}  ({})", song.guess_text(), song.id);
            }
        }
        LibraryAction::Import { source } => {
            let content = fs::read_to_string(source)
                .with_context(|| format!("Failed to read {:?}", source))?;
            let library = LibraryCache::parse_export(&content)
                .with_context(|| format!("Failed to parse library export {:?}", source))?;
            library.save(cache_path)?;
            info!("Imported {} songs from {:?}", library.len(), source);
            println!("Wrote {} songs to {}", library.len(), cache_path.display());
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<LibraryCache> {
    LibraryCache::load(path).with_context(|| format!("Failed to load library cache {:?}", path))
}
