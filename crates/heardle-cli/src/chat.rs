//! Console chat line parsing.
//!
//! Lines look like a group chat: `@alice /start`, `@alice=Alice /guess Artist; Title`.
//! Commands that do not act on a player (`/help`, `/status`, `/suggest`, ...)
//! may omit the sender.

use heardle_core::Player;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Start,
    Pass,
    Guess(String),
    GiveUp,
    Suggest(String),
    Status,
    Help,
    Scoreboard,
    Next,
    End,
}

impl ChatCommand {
    pub fn needs_sender(&self) -> bool {
        matches!(self, Self::Start | Self::Pass | Self::Guess(_) | Self::GiveUp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub sender: Option<Player>,
    pub command: ChatCommand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    MissingCommand,
    UnknownCommand(String),
    MissingSender(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty line"),
            Self::MissingCommand => write!(f, "expected a /command"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command {}", cmd),
            Self::MissingSender(cmd) => write!(f, "{} needs a sender, e.g. @alice {}", cmd, cmd),
        }
    }
}

/// Parse one console line
pub fn parse_line(line: &str) -> Result<ChatLine, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let (sender, rest) = match line.strip_prefix('@') {
        Some(tagged) => {
            let (tag, rest) = tagged.split_once(char::is_whitespace).unwrap_or((tagged, ""));
            (Some(parse_sender(tag)), rest.trim_start())
        }
        None => (None, line),
    };

    let Some(rest) = rest.strip_prefix('/') else {
        return Err(ParseError::MissingCommand);
    };
    let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let args = args.trim();

    let command = match name.to_lowercase().as_str() {
        "start" => ChatCommand::Start,
        "pass" => ChatCommand::Pass,
        "guess" => ChatCommand::Guess(args.to_string()),
        "giveup" => ChatCommand::GiveUp,
        "suggest" => ChatCommand::Suggest(args.to_string()),
        "status" => ChatCommand::Status,
        "help" => ChatCommand::Help,
        "scoreboard" => ChatCommand::Scoreboard,
        "next" => ChatCommand::Next,
        "end" => ChatCommand::End,
        _ => return Err(ParseError::UnknownCommand(format!("/{}", name))),
    };

    if command.needs_sender() && sender.is_none() {
        return Err(ParseError::MissingSender(format!("/{}", name)));
    }

    Ok(ChatLine { sender, command })
}

/// `id` or `id=Display Name`
fn parse_sender(tag: &str) -> Player {
    match tag.split_once('=') {
        Some((id, name)) => Player::new(id).with_display_name(name.replace('_', " ")),
        None => Player::new(tag),
    }
}
