//! Song catalog.
//!
//! This module contains:
//! - `Song` - immutable song metadata
//! - `SongCatalog` - lookup interface used to pick rounds and suggest guesses
//! - `LibraryCache` - JSON-lines library cache implementing `SongCatalog`

mod library;
mod song;

pub use library::*;
pub use song::*;

use crate::error::Result;

/// Source of songs for rounds and guess suggestions.
pub trait SongCatalog {
    /// Look up a song by its id.
    fn song_by_id(&self, id: &str) -> Result<Song>;

    /// Pick a random song for a new round.
    fn random_song(&self) -> Result<Song>;

    /// Songs whose "artist; title" text contains `query`, case-insensitively.
    ///
    /// At most `limit` songs are returned. Each call queries the catalog
    /// afresh.
    fn suggest(&self, query: &str, limit: usize) -> Vec<Song>;
}
