use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use rand::seq::IndexedRandom;
use tracing::{debug, info, warn};

use crate::catalog::{LibraryEntry, Song, SongCatalog};
use crate::error::{Error, Result};

/// In-memory song library backed by a JSON-lines cache file.
///
/// Each line of the cache holds one library record. Records without an
/// artist are skipped; duplicate ids keep the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct LibraryCache {
    songs: Vec<Song>,
    index: HashMap<Arc<str>, usize>,
}

impl LibraryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_songs<I: IntoIterator<Item = Song>>(songs: I) -> Self {
        let mut cache = Self::new();
        for song in songs {
            cache.insert(song);
        }
        cache
    }

    /// Load the cache from a JSON-lines file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let cache = Self::parse_lines(&content)?;
        info!("Loaded {} songs from {:?}", cache.len(), path.as_ref());
        Ok(cache)
    }

    /// Parse JSON-lines content, one library record per line
    pub fn parse_lines(content: &str) -> Result<Self> {
        let mut cache = Self::new();

        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let entry: LibraryEntry =
                serde_json::from_str(line).map_err(|e| Error::InvalidLibraryEntry {
                    line: i + 1,
                    message: e.to_string(),
                })?;
            cache.insert_entry(&entry);
        }

        Ok(cache)
    }

    /// Parse a JSON array of library records (the shape of a full library export)
    pub fn parse_export(content: &str) -> Result<Self> {
        let entries: Vec<LibraryEntry> = serde_json::from_str(content)?;
        let mut cache = Self::new();
        for entry in &entries {
            cache.insert_entry(entry);
        }
        Ok(cache)
    }

    /// Write the cache as JSON lines
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = fs::File::create(path.as_ref())?;
        for song in &self.songs {
            serde_json::to_writer(&mut file, &LibraryEntry::from(song))?;
            writeln!(file)?;
        }
        info!("Saved {} songs to {:?}", self.len(), path.as_ref());
        Ok(())
    }

    fn insert_entry(&mut self, entry: &LibraryEntry) {
        match entry.to_song() {
            Some(song) => self.insert(song),
            None => debug!("Skipping library entry {} without artist", entry.video_id),
        }
    }

    /// Add a song; returns without change if the id is already present
    pub fn insert(&mut self, song: Song) {
        if self.index.contains_key(&song.id) {
            warn!("Duplicate song id {} in library, keeping first", song.id);
            return;
        }
        self.index.insert(song.id.clone(), self.songs.len());
        self.songs.push(song);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Song> {
        self.songs.iter()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

impl SongCatalog for LibraryCache {
    fn song_by_id(&self, id: &str) -> Result<Song> {
        self.index
            .get(id)
            .and_then(|&i| self.songs.get(i))
            .cloned()
            .ok_or_else(|| Error::SongNotFound(id.to_string()))
    }

    fn random_song(&self) -> Result<Song> {
        self.songs
            .choose(&mut rand::rng())
            .cloned()
            .ok_or(Error::EmptyCatalog)
    }

    fn suggest(&self, query: &str, limit: usize) -> Vec<Song> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.songs
            .iter()
            .filter(|song| song.guess_text().to_lowercase().contains(&query))
            .take(limit)
            .cloned()
            .collect()
    }
}
