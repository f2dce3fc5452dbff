//! Configuration and game constants.
//!
//! This module contains:
//! - `Config` - the TOML-backed runtime configuration
//! - Game rule constants (guess limit, clip ladder, suggestion limit)

mod settings;

pub use settings::*;

/// Game rule configuration.
pub mod game {
    /// Number of attempts (passes and wrong guesses) a player gets per round.
    pub const MAX_GUESSES: u32 = 6;

    /// Scoreboard label shown for players who did not solve the round.
    pub const LOSS_LABEL: &str = "X/6";
}

/// Clip ladder configuration.
///
/// Clip `n` is the first `CLIP_DURATIONS_SECS[n]` seconds of the song, so every
/// pass or wrong guess reveals a longer excerpt.
pub mod clips {
    /// Clip durations in seconds, shortest first.
    pub const CLIP_DURATIONS_SECS: [u64; 6] = [1, 2, 3, 5, 10, 20];

    /// Default directory holding the prepared clips.
    pub const DEFAULT_CLIP_DIR: &str = "song_clips";

    /// File name of the full song inside the clip directory.
    pub const FULL_SONG_FILE: &str = "song_full.mp3";
}

/// Song catalog configuration.
pub mod catalog {
    /// Default path of the JSON-lines library cache.
    pub const DEFAULT_CACHE_PATH: &str = "library_cache";

    /// Maximum number of suggestions returned for one query.
    pub const SUGGESTION_LIMIT: usize = 10;

    /// Base URL for song playback links.
    pub const WATCH_URL_BASE: &str = "https://music.youtube.com/watch?v=";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_ladder_covers_every_guess() {
        assert_eq!(clips::CLIP_DURATIONS_SECS.len(), game::MAX_GUESSES as usize);
    }

    #[test]
    fn test_clip_ladder_is_increasing() {
        assert!(clips::CLIP_DURATIONS_SECS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_catalog_constants() {
        assert_eq!(catalog::SUGGESTION_LIMIT, 10);
        assert!(catalog::WATCH_URL_BASE.ends_with("v="));
    }
}
