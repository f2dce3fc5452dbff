//! Maps chat commands onto the current round and builds the replies.
//!
//! Player-facing game errors (not started, already finished, ...) become
//! ordinary replies here; anything else is returned to the caller.

use std::sync::Arc;

use heardle_core::{
    AdvanceOutcome, Candidate, ClipProvider, Error, LossReason, Player, Round, RoundHost,
    RoundSummary, SongCatalog,
};
use tracing::{debug, info};

use crate::chat::{ChatCommand, ChatLine};
use crate::reply::Reply;

pub const HELP_TEXT: &str = "Heardle console\n\
    @you /start: Start playing the current round\n\
    @you /pass: Skip to the next, longer clip\n\
    @you /guess artist; title: Take a guess\n\
    @you /giveup: Give up and reveal the answer\n\
    /suggest text: Find songs to guess\n\
    /status: Check whether a round is running\n\
    /scoreboard: Show the standings so far\n\
    /next: End this round and start a new one\n\
    /end: End this round and quit";

pub struct GameContext {
    pub host: RoundHost,
    pub catalog: Box<dyn SongCatalog>,
    pub clips: Arc<dyn ClipProvider>,
    pub suggestion_limit: usize,
}

impl GameContext {
    /// Start a round with a random song from the catalog
    pub fn begin_random_round(&self) -> heardle_core::Result<(Arc<Round>, Option<RoundSummary>)> {
        let song = self.catalog.random_song()?;
        self.host.begin(Round::new(song, Arc::clone(&self.clips)))
    }

    pub fn handle(&self, line: &ChatLine) -> heardle_core::Result<Vec<Reply>> {
        debug!("Handling {:?}", line.command);

        match (&line.command, &line.sender) {
            (ChatCommand::Help, _) => Ok(vec![Reply::text(HELP_TEXT)]),
            (ChatCommand::Status, _) => Ok(vec![self.status()]),
            (ChatCommand::Suggest(query), _) => Ok(self.suggest(query)),
            (ChatCommand::Scoreboard, _) => self.scoreboard(),
            (ChatCommand::Next, _) => self.next_round(),
            (ChatCommand::End, _) => self.end_round(),
            (command, Some(player)) => {
                let Some(round) = self.host.current() else {
                    return Ok(vec![Reply::text("No round is running")]);
                };
                player_action(&round, player, command)
            }
            (_, None) => Ok(vec![Reply::text("This command needs a sender")]),
        }
    }

    fn status(&self) -> Reply {
        match self.host.current() {
            Some(round) if round.is_open() => Reply::Text(format!("Game {} running", round.id())),
            Some(round) => Reply::Text(format!("Game {} closed", round.id())),
            None => Reply::text("No round is running"),
        }
    }

    fn suggest(&self, query: &str) -> Vec<Reply> {
        let suggestions = self.catalog.suggest(query, self.suggestion_limit);
        if suggestions.is_empty() {
            return vec![Reply::Text(format!("No songs match \"{}\"", query))];
        }
        let lines: Vec<_> = suggestions
            .iter()
            .map(|song| format!("/guess {}", song.guess_text()))
            .collect();
        vec![Reply::Text(lines.join("\n"))]
    }

    fn scoreboard(&self) -> heardle_core::Result<Vec<Reply>> {
        match self.host.current() {
            Some(round) => Ok(vec![Reply::Text(round.scoreboard()?.render())]),
            None => Ok(vec![Reply::text("No round is running")]),
        }
    }

    fn next_round(&self) -> heardle_core::Result<Vec<Reply>> {
        let (round, summary) = self.begin_random_round()?;
        let mut replies = summary.map(summary_replies).unwrap_or_default();
        replies.push(Reply::Text(format!("Started new game {}", round.id())));
        Ok(replies)
    }

    fn end_round(&self) -> heardle_core::Result<Vec<Reply>> {
        Ok(self
            .host
            .end()?
            .map(summary_replies)
            .unwrap_or_else(|| vec![Reply::text("No round is running")]))
    }
}

fn summary_replies(summary: RoundSummary) -> Vec<Reply> {
    info!(
        "Round {} ended with {} players",
        summary.scoreboard.round_id(),
        summary.notify.len()
    );
    let mut replies: Vec<_> = summary
        .notify
        .iter()
        .map(|player| {
            Reply::Text(format!(
                "@{}: game {} has ended",
                player,
                summary.scoreboard.round_id()
            ))
        })
        .collect();
    replies.push(Reply::Text(summary.scoreboard.render()));
    replies
}

fn player_action(
    round: &Round,
    player: &Player,
    command: &ChatCommand,
) -> heardle_core::Result<Vec<Reply>> {
    let name = player.display_name();

    let result = match command {
        ChatCommand::Start => round.start_session(player).map(|(_, clip)| {
            vec![
                Reply::Text(format!("Started game for {}", name)),
                clip_reply(round, clip),
            ]
        }),
        ChatCommand::Pass => round
            .pass(&player.id)
            .map(|outcome| outcome_replies(round, name, outcome)),
        ChatCommand::Guess(text) if text.trim().is_empty() => {
            return Ok(vec![Reply::text("Usage: /guess artist; title")]);
        }
        ChatCommand::Guess(text) => round.guess(&player.id, &Candidate::parse(text)).map(|guess| {
            let feedback = match (guess.verdict.artist, guess.verdict.title) {
                (true, true) => None,
                (true, false) => Some("You got the artist right"),
                (false, true) => Some("You got the title right"),
                (false, false) => Some("Wrong answer"),
            };
            feedback
                .map(Reply::text)
                .into_iter()
                .chain(outcome_replies(round, name, guess.outcome))
                .collect::<Vec<_>>()
        }),
        ChatCommand::GiveUp => round
            .give_up(&player.id)
            .map(|outcome| outcome_replies(round, name, outcome)),
        _ => return Ok(Vec::new()),
    };

    match result {
        Ok(replies) => Ok(replies),
        // Giving up twice still shows the answer.
        Err(Error::AlreadyFinished(_)) if *command == ChatCommand::GiveUp => {
            let mut replies = vec![Reply::Text(format!("Game already finished for {}", name))];
            replies.extend(answer_replies(round));
            Ok(replies)
        }
        Err(e) if e.is_player_facing() => Ok(vec![Reply::Text(refusal(&e, name))]),
        Err(e) => Err(e),
    }
}

fn refusal(error: &Error, name: &str) -> String {
    match error {
        Error::AlreadyStarted(_) => format!("{} has already started this game", name),
        Error::AlreadyFinished(_) => format!("Game already finished for {}", name),
        Error::NotStarted(_) => format!("{} has not started this game", name),
        Error::RoundClosed(_) => "This game has ended, wait for the next one".to_string(),
        other => other.to_string(),
    }
}

fn outcome_replies(round: &Round, name: &str, outcome: AdvanceOutcome) -> Vec<Reply> {
    let headline = match outcome {
        AdvanceOutcome::NextClip { clip_index, .. } => return vec![clip_reply(round, clip_index)],
        AdvanceOutcome::Won { score } => format!("{} finished in {} moves!", name, score),
        AdvanceOutcome::Lost {
            reason: LossReason::OutOfGuesses,
            ..
        } => format!("{} lost the game", name),
        AdvanceOutcome::Lost {
            reason: LossReason::GaveUp,
            ..
        } => format!("{} gave up", name),
    };

    let mut replies = vec![Reply::Text(headline)];
    replies.extend(answer_replies(round));
    replies
}

/// Clip `index` as audio, or the full song once the ladder runs out
fn clip_reply(round: &Round, index: usize) -> Reply {
    let clip = round.clip_or_full_song(index);
    let caption = if clip.is_full_song() {
        debug!("No clip #{}, sending full song", index + 1);
        "Full song".to_string()
    } else {
        format!("Clip #{}", index + 1)
    };
    Reply::Audio { clip, caption }
}

fn answer_replies(round: &Round) -> Vec<Reply> {
    vec![
        Reply::Answer(round.reveal_answer()),
        Reply::Audio {
            clip: round.full_song(),
            caption: "Full song".to_string(),
        },
    ]
}
