//! # heardle-core
//!
//! Core library for the daily song-guessing game.
//!
//! This crate provides:
//! - The shared round and per-player session state machine
//! - Guess evaluation and scoreboard aggregation
//! - Song catalog and clip provider interfaces, with file-backed implementations
//! - TOML configuration
//!
//! The crate never delivers messages or audio itself; every operation returns
//! a structured outcome for the transport to render.

pub mod catalog;
pub mod clip;
pub mod config;
pub mod error;
pub mod game;
pub mod scoreboard;

// Re-export from catalog module
pub use catalog::{LibraryCache, LibraryEntry, Song, SongCatalog};

// Re-export from clip module
pub use clip::{ClipLadder, ClipProvider, ClipRef};

// Re-export from config module
pub use config::Config;

// Re-export from error module
pub use error::{Error, Result};

// Re-export from game module
pub use game::{
    Action, AdvanceOutcome, Answer, Candidate, GuessOutcome, GuessVerdict, LossReason, Player,
    PlayerId, PlayerSession, Round, RoundHost, RoundId, RoundSummary, SessionStatus,
    evaluate_guess,
};

// Re-export from scoreboard module
pub use scoreboard::{ScoreEntry, Scoreboard};
