use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::catalog::WATCH_URL_BASE;

/// A song that can be picked for a round.
///
/// Identity is the source-provided id: two songs with the same id are the
/// same song even if their metadata differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: Arc<str>,
    pub title: Arc<str>,
    pub artist: Arc<str>,
    pub url: Arc<str>,
}

impl Song {
    pub fn new(id: &str, title: &str, artist: &str) -> Self {
        Self {
            id: Arc::from(id),
            title: Arc::from(title),
            artist: Arc::from(artist),
            url: Arc::from(format!("{}{}", WATCH_URL_BASE, id)),
        }
    }

    /// Canonical answer text, e.g. "Song A — Artist A"
    pub fn answer_text(&self) -> String {
        format!("{} — {}", self.title, self.artist)
    }

    /// Text used for guess suggestions and free-text guesses: "artist; title"
    pub fn guess_text(&self) -> String {
        format!("{}; {}", self.artist, self.title)
    }
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Song {}

impl Hash for Song {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.guess_text())
    }
}

/// One song record as stored in the streaming service's library export.
///
/// Only the fields the game needs are modelled; everything else in the
/// record is ignored on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryEntry {
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub artists: Vec<LibraryArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryArtist {
    pub name: String,
}

impl LibraryEntry {
    /// Convert to a `Song`, using the first listed artist.
    ///
    /// Returns `None` for entries without any artist.
    pub fn to_song(&self) -> Option<Song> {
        let artist = self.artists.first()?;
        Some(Song::new(&self.video_id, &self.title, &artist.name))
    }
}

impl From<&Song> for LibraryEntry {
    fn from(song: &Song) -> Self {
        Self {
            video_id: song.id.to_string(),
            title: song.title.to_string(),
            artists: vec![LibraryArtist {
                name: song.artist.to_string(),
            }],
        }
    }
}
