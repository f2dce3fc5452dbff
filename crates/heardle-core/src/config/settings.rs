use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{catalog, clips, game};
use crate::error::{Error, Result};

/// Name of the config file looked up in the user's config directory.
pub const CONFIG_FILE_NAME: &str = "heardle.toml";

/// Runtime configuration loaded from TOML.
///
/// Every section is optional in the file; absent keys fall back to the
/// compiled-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub clips: ClipConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON-lines library cache
    pub cache_path: PathBuf,
    /// Upper bound on suggestions per query
    pub suggestion_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from(catalog::DEFAULT_CACHE_PATH),
            suggestion_limit: catalog::SUGGESTION_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipConfig {
    /// Directory with `clip_<n>s.mp3` files and the full song
    pub dir: PathBuf,
    /// Clip durations in seconds, shortest first
    pub durations_secs: Vec<u64>,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(clips::DEFAULT_CLIP_DIR),
            durations_secs: clips::CLIP_DURATIONS_SECS.to_vec(),
        }
    }
}

impl ClipConfig {
    /// Check that there is one strictly longer clip for every attempt.
    pub fn validate(&self) -> Result<()> {
        let needed = game::MAX_GUESSES as usize;
        if self.durations_secs.len() < needed {
            return Err(Error::InvalidConfig(format!(
                "clips.durations_secs needs at least {} entries, got {}",
                needed,
                self.durations_secs.len()
            )));
        }
        if self.durations_secs[0] == 0 || self.durations_secs.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidConfig(format!(
                "clips.durations_secs must be positive and strictly increasing: {:?}",
                self.durations_secs
            )));
        }
        Ok(())
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        debug!("Parsing config from {:?}", path.as_ref());
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.clips.validate()?;
        Ok(config)
    }

    /// Default config location: `<config dir>/heardle/heardle.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("heardle").join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.clips.durations_secs, vec![1, 2, 3, 5, 10, 20]);
    }

    #[test]
    fn test_parse_partial_sections() {
        let config = Config::parse(
            r#"
            [catalog]
            cache_path = "/tmp/songs.jsonl"

            [clips]
            durations_secs = [2, 4, 6, 8, 12, 30]
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.cache_path, PathBuf::from("/tmp/songs.jsonl"));
        assert_eq!(config.catalog.suggestion_limit, catalog::SUGGESTION_LIMIT);
        assert_eq!(config.clips.durations_secs, vec![2, 4, 6, 8, 12, 30]);
        assert_eq!(config.clips.dir, PathBuf::from("song_clips"));
    }

    #[test]
    fn test_parse_rejects_short_ladder() {
        for ladder in ["[]", "[2, 4]", "[1, 2, 3, 5, 10]"] {
            let result = Config::parse(&format!("[clips]\ndurations_secs = {}", ladder));
            assert!(
                matches!(result, Err(crate::Error::InvalidConfig(_))),
                "ladder {} accepted",
                ladder
            );
        }
    }

    #[test]
    fn test_parse_rejects_unordered_ladder() {
        for ladder in ["[1, 2, 2, 5, 10, 20]", "[20, 10, 5, 3, 2, 1]", "[0, 1, 2, 3, 4, 5]"] {
            let result = Config::parse(&format!("[clips]\ndurations_secs = {}", ladder));
            assert!(
                matches!(result, Err(crate::Error::InvalidConfig(_))),
                "ladder {} accepted",
                ladder
            );
        }
    }

    #[test]
    fn test_parse_accepts_longer_ladder() {
        let config = Config::parse("[clips]\ndurations_secs = [1, 2, 3, 5, 10, 20, 30]").unwrap();
        assert_eq!(config.clips.durations_secs.len(), 7);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Config::parse("[catalog\ncache_path = 1");
        assert!(matches!(result, Err(crate::Error::ConfigParseError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[catalog]\nsuggestion_limit = 3\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.catalog.suggestion_limit, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = Config::load(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
