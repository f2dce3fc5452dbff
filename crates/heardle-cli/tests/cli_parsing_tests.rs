//! CLI argument parsing tests.
//!
//! These tests verify that command-line arguments are parsed correctly
//! without running a game or touching the library cache.

use std::path::PathBuf;

use clap::Parser;

// Re-create Args structure for testing since it's not publicly exported
#[derive(Parser)]
#[command(name = "heardle")]
struct Args {
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "FILE")]
    library: Option<PathBuf>,

    #[arg(long, value_name = "DIR")]
    clips: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    Play {
        #[arg(long)]
        song_id: Option<String>,
        #[arg(long)]
        markdown: bool,
    },
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },
}

#[derive(clap::Subcommand)]
enum LibraryAction {
    Stats,
    Suggest {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    Import {
        source: PathBuf,
    },
}

#[test]
fn test_parse_no_args() {
    let args = Args::try_parse_from(["heardle"]).unwrap();
    assert!(args.command.is_none());
    assert!(args.config.is_none());
    assert!(args.library.is_none());
    assert!(args.clips.is_none());
}

#[test]
fn test_parse_global_overrides() {
    let args = Args::try_parse_from([
        "heardle",
        "--library",
        "cache.jsonl",
        "--clips",
        "clips",
        "play",
    ])
    .unwrap();
    assert_eq!(args.library, Some(PathBuf::from("cache.jsonl")));
    assert_eq!(args.clips, Some(PathBuf::from("clips")));
    assert!(matches!(args.command, Some(Command::Play { .. })));
}

#[test]
fn test_parse_play_defaults() {
    let args = Args::try_parse_from(["heardle", "play"]).unwrap();
    match args.command {
        Some(Command::Play { song_id, markdown }) => {
            assert!(song_id.is_none());
            assert!(!markdown);
        }
        _ => panic!("Expected Play command"),
    }
}

#[test]
fn test_parse_play_with_song_and_markdown() {
    let args =
        Args::try_parse_from(["heardle", "play", "--song-id", "abc123", "--markdown"]).unwrap();
    match args.command {
        Some(Command::Play { song_id, markdown }) => {
            assert_eq!(song_id.as_deref(), Some("abc123"));
            assert!(markdown);
        }
        _ => panic!("Expected Play command"),
    }
}

#[test]
fn test_parse_library_stats() {
    let args = Args::try_parse_from(["heardle", "library", "stats"]).unwrap();
    match args.command {
        Some(Command::Library {
            action: LibraryAction::Stats,
        }) => {}
        _ => panic!("Expected Library Stats command"),
    }
}

#[test]
fn test_parse_library_suggest() {
    let args =
        Args::try_parse_from(["heardle", "library", "suggest", "a-ha", "--limit", "3"]).unwrap();
    match args.command {
        Some(Command::Library {
            action: LibraryAction::Suggest { query, limit },
        }) => {
            assert_eq!(query, "a-ha");
            assert_eq!(limit, Some(3));
        }
        _ => panic!("Expected Library Suggest command"),
    }
}

#[test]
fn test_parse_library_import() {
    let args = Args::try_parse_from(["heardle", "library", "import", "export.json"]).unwrap();
    match args.command {
        Some(Command::Library {
            action: LibraryAction::Import { source },
        }) => {
            assert_eq!(source, PathBuf::from("export.json"));
        }
        _ => panic!("Expected Library Import command"),
    }
}

#[test]
fn test_parse_library_requires_action() {
    assert!(Args::try_parse_from(["heardle", "library"]).is_err());
}

#[test]
fn test_parse_suggest_requires_query() {
    assert!(Args::try_parse_from(["heardle", "library", "suggest"]).is_err());
}
