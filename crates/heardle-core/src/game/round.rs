use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::catalog::Song;
use crate::clip::{ClipProvider, ClipRef};
use crate::error::{Error, Result};
use crate::game::{
    Action, Candidate, GuessVerdict, Player, PlayerId, PlayerSession, Progress, SessionStatus,
    evaluate_guess,
};
use crate::scoreboard::Scoreboard;

/// Display handle for a round: creation time plus song id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoundId(String);

impl RoundId {
    pub fn new(song: &Song, created_at: DateTime<Utc>) -> Self {
        Self(format!("{}-{}", created_at.format("%Y%m%d%H%M%S"), song.id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a session ended in a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    OutOfGuesses,
    GaveUp,
}

/// What the transport should do after a pass, guess or give-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Deliver clip `clip_index`; `guesses` attempts are used up
    NextClip { clip_index: usize, guesses: u32 },
    /// Player solved the round; reveal the answer
    Won { score: u32 },
    /// Player lost; reveal the answer
    Lost { score: u32, reason: LossReason },
}

impl AdvanceOutcome {
    pub fn reveals_answer(&self) -> bool {
        !matches!(self, Self::NextClip { .. })
    }

    pub fn score(&self) -> Option<u32> {
        match self {
            Self::NextClip { .. } => None,
            Self::Won { score } | Self::Lost { score, .. } => Some(*score),
        }
    }
}

/// Verdict of a guess together with the resulting transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    pub verdict: GuessVerdict,
    pub outcome: AdvanceOutcome,
}

/// The round's answer, unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// "title — artist"
    pub text: String,
    pub url: Arc<str>,
}

#[derive(Debug, Default)]
struct RoundState {
    open: bool,
    sessions: HashMap<PlayerId, PlayerSession>,
    scores: HashMap<PlayerId, u32>,
}

/// One shared round: a song, its clips, and every player's session.
///
/// All mutable state sits behind one mutex. The song and clip provider are
/// immutable and read without locking, so clip lookups and answer reveals
/// never wait on other players.
pub struct Round {
    id: RoundId,
    song: Song,
    created_at: DateTime<Utc>,
    clips: Arc<dyn ClipProvider>,
    state: Mutex<RoundState>,
}

impl Round {
    pub fn new(song: Song, clips: Arc<dyn ClipProvider>) -> Self {
        Self::with_created_at(song, clips, Utc::now())
    }

    pub fn with_created_at(
        song: Song,
        clips: Arc<dyn ClipProvider>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let id = RoundId::new(&song, created_at);
        info!("Launching round {} ({} clips)", id, clips.clip_count());
        Self {
            id,
            song,
            created_at,
            clips,
            state: Mutex::new(RoundState {
                open: true,
                ..Default::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, RoundState> {
        // Mutations are single writes after validation, so a poisoned lock
        // still guards consistent state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> &RoundId {
        &self.id
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_open(&self) -> bool {
        self.state().open
    }

    /// Stop accepting new sessions. Returns `false` if already closed.
    ///
    /// Existing sessions can still be read; in-progress players can still
    /// finish.
    pub fn close(&self) -> bool {
        let mut state = self.state();
        let was_open = std::mem::replace(&mut state.open, false);
        if was_open {
            info!("Closed round {}", self.id);
        }
        was_open
    }

    pub fn has_session(&self, player_id: &PlayerId) -> bool {
        self.state().sessions.contains_key(player_id)
    }

    /// Start a session for `player` and return it with the first clip index.
    pub fn start_session(&self, player: &Player) -> Result<(PlayerSession, usize)> {
        let mut state = self.state();

        if let Some(existing) = state.sessions.get(&player.id) {
            return Err(if existing.status().is_terminal() {
                Error::AlreadyFinished(player.id.clone())
            } else {
                Error::AlreadyStarted(player.id.clone())
            });
        }

        if !state.open {
            return Err(Error::RoundClosed(self.id.to_string()));
        }

        let session = PlayerSession::new(player, state.sessions.len());
        state.sessions.insert(player.id.clone(), session.clone());
        info!("Started round {} for player {}", self.id, player.id);

        Ok((session, 0))
    }

    /// Snapshot of a player's session
    pub fn session(&self, player_id: &PlayerId) -> Result<PlayerSession> {
        self.state()
            .sessions
            .get(player_id)
            .cloned()
            .ok_or_else(|| Error::NotStarted(player_id.clone()))
    }

    /// Snapshot of every session in start order
    pub fn sessions(&self) -> Vec<PlayerSession> {
        let mut sessions: Vec<_> = self.state().sessions.values().cloned().collect();
        sessions.sort_by_key(PlayerSession::seq);
        sessions
    }

    pub fn evaluate_guess(&self, candidate: &Candidate) -> GuessVerdict {
        evaluate_guess(candidate, &self.song)
    }

    /// Apply a pass, guess or give-up to a player's session.
    ///
    /// The final score is recorded in the same critical section as the
    /// terminal transition, so it is written exactly once.
    pub fn advance(&self, player_id: &PlayerId, action: Action) -> Result<AdvanceOutcome> {
        let mut state = self.state();

        let session = state
            .sessions
            .get_mut(player_id)
            .ok_or_else(|| Error::NotStarted(player_id.clone()))?;

        let progress = session.apply(action)?;
        let guesses = session.guesses();

        let outcome = match progress {
            Progress::NextClip(clip_index) => {
                debug!("Player {} moves to clip {}", player_id, clip_index);
                return Ok(AdvanceOutcome::NextClip {
                    clip_index,
                    guesses,
                });
            }
            Progress::Finished {
                status: SessionStatus::Won,
                score,
            } => AdvanceOutcome::Won { score },
            Progress::Finished { score, .. } => AdvanceOutcome::Lost {
                score,
                reason: if action == Action::GiveUp {
                    LossReason::GaveUp
                } else {
                    LossReason::OutOfGuesses
                },
            },
        };

        if let Some(score) = outcome.score() {
            state.scores.insert(player_id.clone(), score);
            info!("Player {} finished round {}: {:?}", player_id, self.id, outcome);
        }

        Ok(outcome)
    }

    pub fn pass(&self, player_id: &PlayerId) -> Result<AdvanceOutcome> {
        self.advance(player_id, Action::Pass)
    }

    pub fn give_up(&self, player_id: &PlayerId) -> Result<AdvanceOutcome> {
        self.advance(player_id, Action::GiveUp)
    }

    /// Evaluate a guess and advance the player's session with its result
    pub fn guess(&self, player_id: &PlayerId, candidate: &Candidate) -> Result<GuessOutcome> {
        let verdict = self.evaluate_guess(candidate);
        debug!("Guess from {}: {:?} -> {:?}", player_id, candidate, verdict);
        let outcome = self.advance(
            player_id,
            Action::Guess {
                correct: verdict.is_correct(),
            },
        )?;
        Ok(GuessOutcome { verdict, outcome })
    }

    /// Store a player's final score, overwriting any previous value.
    ///
    /// `advance` already records scores on terminal transitions; this is for
    /// callers that manage scoring themselves.
    pub fn record_final_score(&self, player_id: &PlayerId, score: u32) {
        self.state().scores.insert(player_id.clone(), score);
    }

    pub fn final_score(&self, player_id: &PlayerId) -> Option<u32> {
        self.state().scores.get(player_id).copied()
    }

    /// Every player who started this round
    pub fn finished_players(&self) -> BTreeSet<PlayerId> {
        self.state().sessions.keys().cloned().collect()
    }

    pub fn reveal_answer(&self) -> Answer {
        Answer {
            text: self.song.answer_text(),
            url: self.song.url.clone(),
        }
    }

    pub fn clip(&self, index: usize) -> Result<ClipRef> {
        self.clips.clip_reference(index)
    }

    pub fn full_song(&self) -> ClipRef {
        self.clips.full_song_reference()
    }

    /// Clip for `index`, falling back to the full song past the ladder
    pub fn clip_or_full_song(&self, index: usize) -> ClipRef {
        self.clips.clip_or_full_song(index)
    }

    /// Build the scoreboard from a consistent snapshot of sessions and scores
    pub fn scoreboard(&self) -> Result<Scoreboard> {
        let (mut sessions, scores) = {
            let state = self.state();
            (
                state.sessions.values().cloned().collect::<Vec<_>>(),
                state.scores.clone(),
            )
        };
        sessions.sort_by_key(PlayerSession::seq);
        Scoreboard::build(self.id.clone(), self.reveal_answer(), &sessions, &scores)
    }
}

impl fmt::Debug for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Round")
            .field("id", &self.id)
            .field("song", &self.song)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipLadder;
    use chrono::TimeZone;

    fn round() -> Round {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        Round::with_created_at(
            Song::new("v1", "Song A", "Artist A"),
            Arc::new(ClipLadder::default()),
            created_at,
        )
    }

    #[test]
    fn test_round_id_from_song_and_time() {
        assert_eq!(round().id().as_str(), "20240501090000-v1");
    }

    #[test]
    fn test_start_session() {
        let round = round();
        let player = Player::new("p1");
        assert!(!round.has_session(&player.id));

        let (session, clip) = round.start_session(&player).unwrap();
        assert_eq!(clip, 0);
        assert_eq!(session.guesses(), 0);
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert!(round.has_session(&player.id));
    }

    #[test]
    fn test_start_twice() {
        let round = round();
        let player = Player::new("p1");
        round.start_session(&player).unwrap();

        assert!(matches!(
            round.start_session(&player),
            Err(Error::AlreadyStarted(_))
        ));

        round.give_up(&player.id).unwrap();
        assert!(matches!(
            round.start_session(&player),
            Err(Error::AlreadyFinished(_))
        ));
    }

    #[test]
    fn test_start_after_close() {
        let round = round();
        round.start_session(&Player::new("early")).unwrap();
        assert!(round.close());
        assert!(!round.close());

        assert!(matches!(
            round.start_session(&Player::new("late")),
            Err(Error::RoundClosed(_))
        ));
        // Players who joined before close can still play.
        assert!(round.pass(&PlayerId::from("early")).is_ok());
        assert_eq!(round.finished_players().len(), 1);
    }

    #[test]
    fn test_session_not_started() {
        let round = round();
        assert!(matches!(
            round.session(&PlayerId::from("ghost")),
            Err(Error::NotStarted(_))
        ));
    }

    #[test]
    fn test_loss_reasons() {
        let round = round();
        let quitter = Player::new("quitter");
        round.start_session(&quitter).unwrap();
        assert_eq!(
            round.give_up(&quitter.id).unwrap(),
            AdvanceOutcome::Lost {
                score: 1,
                reason: LossReason::GaveUp
            }
        );

        let stubborn = Player::new("stubborn");
        round.start_session(&stubborn).unwrap();
        for _ in 0..5 {
            round.pass(&stubborn.id).unwrap();
        }
        assert_eq!(
            round.pass(&stubborn.id).unwrap(),
            AdvanceOutcome::Lost {
                score: 6,
                reason: LossReason::OutOfGuesses
            }
        );
    }

    #[test]
    fn test_record_final_score_overwrites() {
        let round = round();
        let id = PlayerId::from("p1");
        round.record_final_score(&id, 3);
        round.record_final_score(&id, 4);
        assert_eq!(round.final_score(&id), Some(4));
    }

    #[test]
    fn test_reveal_answer_without_sessions() {
        let answer = round().reveal_answer();
        assert_eq!(answer.text, "Song A — Artist A");
        assert_eq!(&*answer.url, "https://music.youtube.com/watch?v=v1");
    }

    #[test]
    fn test_outcome_helpers() {
        let next = AdvanceOutcome::NextClip {
            clip_index: 2,
            guesses: 2,
        };
        assert!(!next.reveals_answer());
        assert_eq!(next.score(), None);
        assert!(AdvanceOutcome::Won { score: 3 }.reveals_answer());
        assert_eq!(AdvanceOutcome::Won { score: 3 }.score(), Some(3));
    }

    #[test]
    fn test_clip_delegation() {
        let round = round();
        assert!(round.clip(0).is_ok());
        assert!(matches!(round.clip(6), Err(Error::ClipUnavailable { .. })));
        assert!(round.clip_or_full_song(6).is_full_song());
        assert!(round.full_song().is_full_song());
    }
}
