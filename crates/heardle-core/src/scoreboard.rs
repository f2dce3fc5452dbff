//! Per-round scoreboard.
//!
//! Rows are ordered by score (fewest attempts first); equal scores keep the
//! order in which players started the round. Losses are ranked by the
//! attempts they consumed like any other score, so a player who gave up on
//! the first clip sits above a player who won on the third.

use std::collections::HashMap;
use std::fmt::{self, Write as _};

use crate::config::game::{LOSS_LABEL, MAX_GUESSES};
use crate::error::{Error, Result};
use crate::game::{Answer, PlayerId, PlayerSession, Round, RoundId, SessionStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub player_id: PlayerId,
    pub display_name: String,
    pub score: u32,
    pub status: SessionStatus,
}

impl ScoreEntry {
    /// Score as shown to players: the attempt count, or "X/6" when the round
    /// was not solved
    pub fn display_score(&self) -> String {
        if self.status == SessionStatus::Lost || self.score > MAX_GUESSES {
            LOSS_LABEL.to_string()
        } else {
            self.score.to_string()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scoreboard {
    round_id: RoundId,
    answer: Answer,
    entries: Vec<ScoreEntry>,
    unfinished: Vec<String>,
}

impl Scoreboard {
    /// Build from sessions in start order and the recorded final scores.
    ///
    /// Every terminal session must have a score and every score must belong
    /// to a terminal session; anything else is reported as
    /// `ScoreboardInvariant`.
    pub fn build(
        round_id: RoundId,
        answer: Answer,
        sessions: &[PlayerSession],
        scores: &HashMap<PlayerId, u32>,
    ) -> Result<Self> {
        let mut entries = Vec::new();
        let mut unfinished = Vec::new();

        for session in sessions {
            let score = scores.get(&session.player_id).copied();
            match (session.status().is_terminal(), score) {
                (true, Some(score)) => entries.push(ScoreEntry {
                    player_id: session.player_id.clone(),
                    display_name: session.display_name.clone(),
                    score,
                    status: session.status(),
                }),
                (false, None) => unfinished.push(session.display_name.clone()),
                (true, None) => {
                    return Err(Error::ScoreboardInvariant {
                        player: session.player_id.clone(),
                        message: "finished without a recorded score".to_string(),
                    });
                }
                (false, Some(_)) => {
                    return Err(Error::ScoreboardInvariant {
                        player: session.player_id.clone(),
                        message: "score recorded while still in progress".to_string(),
                    });
                }
            }
        }

        if let Some(orphan) = scores
            .keys()
            .find(|id| !sessions.iter().any(|s| &s.player_id == *id))
        {
            return Err(Error::ScoreboardInvariant {
                player: orphan.clone(),
                message: "score recorded without a session".to_string(),
            });
        }

        // Stable sort keeps start order among equal scores.
        entries.sort_by_key(|entry| entry.score);

        Ok(Self {
            round_id,
            answer,
            entries,
            unfinished,
        })
    }

    pub fn round_id(&self) -> &RoundId {
        &self.round_id
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Display names of players who started but never finished
    pub fn unfinished(&self) -> &[String] {
        &self.unfinished
    }

    /// Plain-text table, one row per finished player
    pub fn render(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Scoreboard for round {}", self.round_id);
        let _ = writeln!(output, "Answer: {}", self.answer.text);

        if self.entries.is_empty() {
            let _ = writeln!(output, "No finished players");
        }

        let name_width = self
            .entries
            .iter()
            .map(|e| e.display_name.chars().count())
            .max()
            .unwrap_or(0);

        for (rank, entry) in self.entries.iter().enumerate() {
            let _ = writeln!(
                output,
                "{:>2}. {:<width$}  {}",
                rank + 1,
                entry.display_name,
                entry.display_score(),
                width = name_width
            );
        }

        if !self.unfinished.is_empty() {
            let _ = writeln!(output, "Unfinished: {}", self.unfinished.join(", "));
        }

        output
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Render the final standings of a round
pub fn render(round: &Round) -> Result<String> {
    Ok(round.scoreboard()?.render())
}
