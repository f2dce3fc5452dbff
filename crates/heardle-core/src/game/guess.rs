use crate::catalog::Song;

/// A player's answer: an artist and a title, compared field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub artist: String,
    pub title: String,
}

impl Candidate {
    pub fn new(artist: &str, title: &str) -> Self {
        Self {
            artist: artist.trim().to_string(),
            title: title.trim().to_string(),
        }
    }

    /// Parse free text of the form "artist; title".
    ///
    /// Text without a separator is taken as an artist with an empty title.
    pub fn parse(text: &str) -> Self {
        match text.split_once(';') {
            Some((artist, title)) => Self::new(artist, title),
            None => Self::new(text, ""),
        }
    }
}

impl From<&Song> for Candidate {
    fn from(song: &Song) -> Self {
        Self::new(&song.artist, &song.title)
    }
}

/// Per-field outcome of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuessVerdict {
    pub artist: bool,
    pub title: bool,
}

impl GuessVerdict {
    pub fn is_correct(&self) -> bool {
        self.artist && self.title
    }

    fn matched_fields(&self) -> u8 {
        u8::from(self.artist) + u8::from(self.title)
    }
}

/// Compare a candidate against the round's song.
///
/// Each field matches on case-insensitive equality after trimming. Artists
/// and titles may contain `;` themselves, so every split point of the
/// rejoined text is tried and the one matching the most fields wins.
pub fn evaluate_guess(candidate: &Candidate, song: &Song) -> GuessVerdict {
    let joined = format!("{};{}", candidate.artist, candidate.title);
    joined
        .match_indices(';')
        .map(|(i, _)| GuessVerdict {
            artist: field_matches(&joined[..i], &song.artist),
            title: field_matches(&joined[i + 1..], &song.title),
        })
        .fold(GuessVerdict::default(), |best, verdict| {
            if verdict.matched_fields() > best.matched_fields() {
                verdict
            } else {
                best
            }
        })
}

fn field_matches(guess: &str, answer: &str) -> bool {
    guess.trim().to_lowercase() == answer.trim().to_lowercase()
}
