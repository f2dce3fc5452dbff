//! Clip provider abstraction.
//!
//! The game never touches audio itself: it asks a `ClipProvider` for an opaque
//! reference to "clip n" and hands that to the transport for delivery.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{ClipConfig, clips};
use crate::error::{Error, Result};

/// Reference to a playable audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRef {
    pub path: PathBuf,
    /// Clip length, `None` for the full song
    pub duration: Option<Duration>,
}

impl ClipRef {
    pub fn is_full_song(&self) -> bool {
        self.duration.is_none()
    }
}

/// Supplies clips of increasing length for the current round's song.
pub trait ClipProvider: Send + Sync {
    /// Number of clips in the ladder.
    fn clip_count(&self) -> usize;

    /// Reference to clip `index` (0 = shortest).
    ///
    /// Fails with `ClipUnavailable` past the end of the ladder.
    fn clip_reference(&self, index: usize) -> Result<ClipRef>;

    /// Reference to the full song.
    fn full_song_reference(&self) -> ClipRef;

    /// Clip `index`, or the full song when the ladder is exhausted.
    fn clip_or_full_song(&self, index: usize) -> ClipRef {
        self.clip_reference(index)
            .unwrap_or_else(|_| self.full_song_reference())
    }
}

/// Directory-backed clip ladder.
///
/// Expects `clip_<secs>s.mp3` files for each configured duration and the
/// full song as `song_full.mp3`, all in one directory.
#[derive(Debug, Clone)]
pub struct ClipLadder {
    dir: PathBuf,
    durations: Vec<Duration>,
}

impl ClipLadder {
    pub fn new<P: AsRef<Path>>(dir: P, durations_secs: &[u64]) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            durations: durations_secs
                .iter()
                .map(|&secs| Duration::from_secs(secs))
                .collect(),
        }
    }

    pub fn from_config(config: &ClipConfig) -> Self {
        Self::new(&config.dir, &config.durations_secs)
    }

    pub fn clip_file_name(duration: Duration) -> String {
        format!("clip_{}s.mp3", duration.as_secs())
    }

    /// Paths of clips missing from the clip directory
    pub fn missing_files(&self) -> Vec<PathBuf> {
        self.durations
            .iter()
            .map(|&d| self.dir.join(Self::clip_file_name(d)))
            .chain(std::iter::once(self.dir.join(clips::FULL_SONG_FILE)))
            .filter(|path| !path.exists())
            .collect()
    }
}

impl Default for ClipLadder {
    fn default() -> Self {
        Self::new(clips::DEFAULT_CLIP_DIR, &clips::CLIP_DURATIONS_SECS)
    }
}

impl ClipProvider for ClipLadder {
    fn clip_count(&self) -> usize {
        self.durations.len()
    }

    fn clip_reference(&self, index: usize) -> Result<ClipRef> {
        let duration = *self.durations.get(index).ok_or(Error::ClipUnavailable {
            index,
            available: self.durations.len(),
        })?;

        Ok(ClipRef {
            path: self.dir.join(Self::clip_file_name(duration)),
            duration: Some(duration),
        })
    }

    fn full_song_reference(&self) -> ClipRef {
        ClipRef {
            path: self.dir.join(clips::FULL_SONG_FILE),
            duration: None,
        }
    }
}
