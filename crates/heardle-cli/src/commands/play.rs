//! Console game mode.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use heardle_core::{ClipLadder, Config, LibraryCache, Round, RoundHost, SongCatalog};
use owo_colors::OwoColorize;
use tracing::{debug, error, info, warn};

use crate::chat::{ChatCommand, ParseError, parse_line};
use crate::handler::{GameContext, HELP_TEXT};
use crate::reply::{Markup, Reply, render};
use crate::shutdown::ShutdownSignal;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Run one console session: start a round, relay chat lines until `/end`,
/// end of input or Ctrl+C, then print the scoreboard.
pub fn run(config: &Config, song_id: Option<&str>, markup: Markup) -> Result<()> {
    let library = LibraryCache::load(&config.catalog.cache_path).with_context(|| {
        format!(
            "Failed to load library cache {:?}",
            config.catalog.cache_path
        )
    })?;
    if library.is_empty() {
        bail!("Library cache {:?} has no songs", config.catalog.cache_path);
    }

    let clips = ClipLadder::from_config(&config.clips);
    for missing in clips.missing_files() {
        warn!("Clip file missing: {:?}", missing);
    }

    let first_song = match song_id {
        Some(id) => Some(library.song_by_id(id)?),
        None => None,
    };

    let ctx = GameContext {
        host: RoundHost::new(),
        catalog: Box::new(library),
        clips: Arc::new(clips),
        suggestion_limit: config.catalog.suggestion_limit,
    };

    let round = match first_song {
        Some(song) => ctx.host.begin(Round::new(song, Arc::clone(&ctx.clips)))?.0,
        None => ctx.begin_random_round()?.0,
    };

    let shutdown = setup_shutdown_handler()?;

    println!("Heardle v{}", env!("CARGO_PKG_VERSION"));
    println!("Game {} running", round.id());
    println!("{}", HELP_TEXT.dimmed());

    let lines = spawn_stdin_reader();

    loop {
        if shutdown.is_shutdown() {
            debug!("Shutdown signal received, leaving game loop");
            break;
        }

        let line = match lines.recv_timeout(POLL_INTERVAL) {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                debug!("Input closed");
                break;
            }
        };

        let chat = match parse_line(&line) {
            Ok(chat) => chat,
            Err(ParseError::Empty) => continue,
            Err(e) => {
                println!("{}", e.to_string().yellow());
                continue;
            }
        };

        match ctx.handle(&chat) {
            Ok(replies) => print_replies(&replies, markup),
            Err(e) => error!("Failed to handle {:?}: {}", chat.command, e),
        }

        if chat.command == ChatCommand::End {
            return Ok(());
        }
    }

    // Input ended without /end: close the round and show the standings.
    if let Some(summary) = ctx.host.end()? {
        info!("Closed round {} on exit", summary.scoreboard.round_id());
        print_replies(&[Reply::Text(summary.scoreboard.render())], markup);
    }

    println!("Shutdown complete.");
    Ok(())
}

/// Setup graceful shutdown handler with Ctrl+C
fn setup_shutdown_handler() -> Result<Arc<ShutdownSignal>> {
    let shutdown = Arc::new(ShutdownSignal::new());

    let shutdown_ctrlc = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        println!("\nShutting down...");
        shutdown_ctrlc.trigger();
    })?;

    Ok(shutdown)
}

/// Read stdin on a separate thread so the game loop can notice shutdown
/// while no input arrives.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

fn print_replies(replies: &[Reply], markup: Markup) {
    for reply in replies {
        let text = render(reply, markup);
        match (reply, markup) {
            (_, Markup::MarkdownV2) | (Reply::Text(_), Markup::Plain) => println!("{}", text),
            (Reply::Audio { .. }, Markup::Plain) => println!("{}", text.dimmed()),
            (Reply::Answer(_), Markup::Plain) => println!("{}", text.bold()),
        }
    }
}
