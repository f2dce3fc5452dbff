//! Replies produced by the game handler and their text rendering.

use heardle_core::{Answer, ClipRef};

/// One outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Audio { clip: ClipRef, caption: String },
    Answer(Answer),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Output markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Markup {
    #[default]
    Plain,
    MarkdownV2,
}

/// Characters that must be escaped in Telegram MarkdownV2 text
const MARKDOWN_V2_SPECIAL: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_V2_SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escape a URL for use inside a MarkdownV2 inline link target
fn escape_markdown_v2_url(url: &str) -> String {
    url.replace('\\', "\\\\").replace(')', "\\)")
}

pub fn render(reply: &Reply, markup: Markup) -> String {
    match (reply, markup) {
        (Reply::Text(text), Markup::Plain) => text.clone(),
        (Reply::Text(text), Markup::MarkdownV2) => escape_markdown_v2(text),
        (Reply::Audio { clip, caption }, Markup::Plain) => {
            format!("[audio] {}: {}", caption, clip.path.display())
        }
        (Reply::Audio { clip, caption }, Markup::MarkdownV2) => format!(
            "\\[audio\\] {}: {}",
            escape_markdown_v2(caption),
            escape_markdown_v2(&clip.path.display().to_string())
        ),
        (Reply::Answer(answer), Markup::Plain) => {
            format!("The answer is: {} ({})", answer.text, answer.url)
        }
        (Reply::Answer(answer), Markup::MarkdownV2) => format!(
            "The answer is: [{}]({})",
            escape_markdown_v2(&answer.text),
            escape_markdown_v2_url(&answer.url)
        ),
    }
}
