//! Round and session state.
//!
//! This module contains the game itself:
//! - `Round` - the shared round for one song, with every player's session
//! - `PlayerSession`, `SessionStatus` - one player's progress
//! - `Candidate`, `GuessVerdict` - guess parsing and evaluation
//! - `RoundHost` - holder of the current round

mod guess;
mod host;
mod player;
mod round;
mod session;

pub use guess::*;
pub use host::*;
pub use player::*;
pub use round::*;
pub use session::*;
