use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Transport-independent player identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(Arc<str>);

impl PlayerId {
    pub fn new(id: &str) -> Self {
        Self(Arc::from(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        Self(Arc::from(id.to_string()))
    }
}

/// A player as seen by the game: an id and an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: Option<String>,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.display_name = (!name.trim().is_empty()).then_some(name);
        self
    }

    /// Display name, falling back to the id
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallback() {
        let player = Player::new("42");
        assert_eq!(player.display_name(), "42");

        let named = Player::new("42").with_display_name("Alice");
        assert_eq!(named.display_name(), "Alice");
    }

    #[test]
    fn test_blank_display_name_ignored() {
        let player = Player::new("42").with_display_name("  ");
        assert!(player.display_name.is_none());
        assert_eq!(player.display_name(), "42");
    }

    #[test]
    fn test_player_id_conversions() {
        assert_eq!(PlayerId::from(42u64), PlayerId::from("42"));
        assert_eq!(PlayerId::from(String::from("bob")).as_str(), "bob");
        assert_eq!(PlayerId::new("bob").to_string(), "bob");
    }
}
