use thiserror::Error;

use crate::game::PlayerId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Player {0} has already started this round")]
    AlreadyStarted(PlayerId),

    #[error("Round already finished for player {0}")]
    AlreadyFinished(PlayerId),

    #[error("Player {0} has not started this round")]
    NotStarted(PlayerId),

    #[error("Round {0} is closed")]
    RoundClosed(String),

    #[error("No clip at index {index} (ladder has {available} clips)")]
    ClipUnavailable { index: usize, available: usize },

    #[error("Song not found: {0}")]
    SongNotFound(String),

    #[error("Song catalog is empty")]
    EmptyCatalog,

    #[error("Invalid library entry on line {line}: {message}")]
    InvalidLibraryEntry { line: usize, message: String },

    #[error("Scoreboard invariant violated for player {player}: {message}")]
    ScoreboardInvariant { player: PlayerId, message: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error is a normal game branch a transport should answer
    /// with a message, as opposed to an environment or programming failure.
    pub fn is_player_facing(&self) -> bool {
        matches!(
            self,
            Self::AlreadyStarted(_)
                | Self::AlreadyFinished(_)
                | Self::NotStarted(_)
                | Self::RoundClosed(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
