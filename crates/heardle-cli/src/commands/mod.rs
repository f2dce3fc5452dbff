//! Subcommand implementations.

pub mod library;
pub mod play;
