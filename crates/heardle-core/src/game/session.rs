use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::config::game::MAX_GUESSES;
use crate::error::{Error, Result};
use crate::game::{Player, PlayerId};

/// Progress of one player through a round.
///
/// ## State Transition Rules
///
/// - InProgress -> InProgress (pass or wrong guess, attempts left)
/// - InProgress -> Lost (pass or wrong guess on the last attempt, or give-up)
/// - InProgress -> Won (correct guess)
///
/// Won and Lost are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr,
)]
pub enum SessionStatus {
    #[default]
    #[strum(serialize = "in progress")]
    InProgress,
    #[strum(serialize = "won")]
    Won,
    #[strum(serialize = "lost")]
    Lost,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// A player move within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Pass,
    Guess { correct: bool },
    GiveUp,
}

/// Result of applying an action to an in-progress session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Still playing; deliver clip `index` next
    NextClip(usize),
    /// Session reached a terminal status with this final score
    Finished { status: SessionStatus, score: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSession {
    pub player_id: PlayerId,
    pub display_name: String,
    guesses: u32,
    status: SessionStatus,
    /// Position in the round's start order
    seq: usize,
}

impl PlayerSession {
    pub(crate) fn new(player: &Player, seq: usize) -> Self {
        Self {
            player_id: player.id.clone(),
            display_name: player.display_name().to_string(),
            guesses: 0,
            status: SessionStatus::InProgress,
            seq,
        }
    }

    /// Attempts used so far (passes and wrong guesses)
    pub fn guesses(&self) -> u32 {
        self.guesses
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn seq(&self) -> usize {
        self.seq
    }

    /// Index of the clip the player should currently be listening to
    pub fn current_clip(&self) -> usize {
        self.guesses as usize
    }

    /// Final score once terminal: the number of attempts consumed
    pub fn final_score(&self) -> Option<u32> {
        self.status
            .is_terminal()
            .then(|| (self.guesses + 1).min(MAX_GUESSES))
    }

    /// Apply an action. Fails with `AlreadyFinished` on a terminal session
    /// without changing it.
    pub(crate) fn apply(&mut self, action: Action) -> Result<Progress> {
        if self.status.is_terminal() {
            return Err(Error::AlreadyFinished(self.player_id.clone()));
        }

        match action {
            Action::Guess { correct: true } => self.status = SessionStatus::Won,
            Action::GiveUp => self.status = SessionStatus::Lost,
            Action::Pass | Action::Guess { correct: false } => {
                self.guesses += 1;
                if self.guesses < MAX_GUESSES {
                    return Ok(Progress::NextClip(self.guesses as usize));
                }
                self.status = SessionStatus::Lost;
            }
        }

        let score = self.final_score().unwrap_or(MAX_GUESSES);
        Ok(Progress::Finished {
            status: self.status,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_session() -> PlayerSession {
        PlayerSession::new(&Player::new("p1").with_display_name("Player One"), 0)
    }

    #[test]
    fn test_new_session() {
        let session = new_session();
        assert_eq!(session.guesses(), 0);
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.display_name, "Player One");
        assert_eq!(session.final_score(), None);
    }

    #[test]
    fn test_pass_advances_clip() {
        let mut session = new_session();
        assert_eq!(session.apply(Action::Pass).unwrap(), Progress::NextClip(1));
        assert_eq!(
            session.apply(Action::Guess { correct: false }).unwrap(),
            Progress::NextClip(2)
        );
        assert_eq!(session.guesses(), 2);
        assert_eq!(session.current_clip(), 2);
    }

    #[test]
    fn test_sixth_miss_loses() {
        let mut session = new_session();
        for _ in 0..5 {
            session.apply(Action::Pass).unwrap();
        }
        let progress = session.apply(Action::Pass).unwrap();
        assert_eq!(
            progress,
            Progress::Finished {
                status: SessionStatus::Lost,
                score: 6
            }
        );
        assert_eq!(session.guesses(), 6);
    }

    #[test]
    fn test_correct_guess_keeps_counter() {
        let mut session = new_session();
        session.apply(Action::Pass).unwrap();
        let progress = session.apply(Action::Guess { correct: true }).unwrap();
        assert_eq!(
            progress,
            Progress::Finished {
                status: SessionStatus::Won,
                score: 2
            }
        );
        assert_eq!(session.guesses(), 1);
    }

    #[test]
    fn test_give_up_scores_current_attempt() {
        let mut session = new_session();
        let progress = session.apply(Action::GiveUp).unwrap();
        assert_eq!(
            progress,
            Progress::Finished {
                status: SessionStatus::Lost,
                score: 1
            }
        );
    }

    #[test]
    fn test_terminal_session_rejects_actions() {
        let mut session = new_session();
        session.apply(Action::GiveUp).unwrap();
        let before = session.clone();

        for action in [Action::Pass, Action::Guess { correct: true }, Action::GiveUp] {
            assert!(matches!(
                session.apply(action),
                Err(Error::AlreadyFinished(_))
            ));
        }
        assert_eq!(session, before);
    }

    #[test]
    fn test_status_names() {
        assert_eq!(SessionStatus::InProgress.as_str(), "in progress");
        assert_eq!(SessionStatus::Won.as_str(), "won");
        assert!(SessionStatus::Lost.is_terminal());
        assert!(!SessionStatus::InProgress.is_terminal());
    }
}
