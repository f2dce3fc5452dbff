use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::error::Result;
use crate::game::{PlayerId, Round};
use crate::scoreboard::Scoreboard;

/// What is left of a round once it has been closed.
#[derive(Debug, Clone)]
pub struct RoundSummary {
    pub scoreboard: Scoreboard,
    /// Everyone who started the round and should hear that it ended
    pub notify: BTreeSet<PlayerId>,
}

impl RoundSummary {
    fn from_round(round: &Round) -> Result<Self> {
        round.close();
        Ok(Self {
            scoreboard: round.scoreboard()?,
            notify: round.finished_players(),
        })
    }
}

/// Holds the round currently being played.
///
/// Handlers clone the `Arc<Round>` out and work on it without holding the
/// host lock, so replacing the round never waits on player actions.
#[derive(Debug, Default)]
pub struct RoundHost {
    current: RwLock<Option<Arc<Round>>>,
}

impl RoundHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Arc<Round>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Install `round` as the current round.
    ///
    /// The previous round, if any, is closed and summarized. The new round is
    /// installed even when summarizing the previous one fails.
    pub fn begin(&self, round: Round) -> Result<(Arc<Round>, Option<RoundSummary>)> {
        let round = Arc::new(round);
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(Arc::clone(&round));

        info!("Round {} is now current", round.id());

        let summary = previous
            .as_deref()
            .map(RoundSummary::from_round)
            .transpose()?;
        Ok((round, summary))
    }

    /// Close and remove the current round
    pub fn end(&self) -> Result<Option<RoundSummary>> {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        previous
            .as_deref()
            .map(RoundSummary::from_round)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Song;
    use crate::clip::ClipLadder;
    use crate::game::Player;

    fn round(id: &str) -> Round {
        Round::new(
            Song::new(id, "Title", "Artist"),
            Arc::new(ClipLadder::default()),
        )
    }

    #[test]
    fn test_empty_host() {
        let host = RoundHost::new();
        assert!(host.current().is_none());
        assert!(host.end().unwrap().is_none());
    }

    #[test]
    fn test_begin_replaces_and_summarizes() {
        let host = RoundHost::new();
        let (first, summary) = host.begin(round("v1")).unwrap();
        assert!(summary.is_none());

        first.start_session(&Player::new("p1")).unwrap();
        first.give_up(&PlayerId::from("p1")).unwrap();
        first.start_session(&Player::new("p2")).unwrap();

        let (second, summary) = host.begin(round("v2")).unwrap();
        let summary = summary.unwrap();

        assert!(!first.is_open());
        assert!(second.is_open());
        assert_eq!(summary.notify.len(), 2);
        assert_eq!(summary.scoreboard.entries().len(), 1);
        assert_eq!(summary.scoreboard.unfinished(), ["p2".to_string()]);
        assert_eq!(&*host.current().unwrap().song().id, "v2");
    }

    #[test]
    fn test_end_closes_current() {
        let host = RoundHost::new();
        let (round, _) = host.begin(round("v1")).unwrap();

        let summary = host.end().unwrap();
        assert!(summary.is_some());
        assert!(!round.is_open());
        assert!(host.current().is_none());
    }
}
