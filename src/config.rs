use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "arena.ron";

/// Arena settings, read from a RON file. Every field is optional in the file.
///
/// ```ron
/// (
///     roster_path: Some("data/fighters.ron"),
///     seed: Some(42),
///     series_battles: 100,
/// )
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    /// `None` uses the built-in roster.
    pub roster_path: Option<PathBuf>,
    pub moves_log: PathBuf,
    pub results_log: PathBuf,
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
    pub series_battles: u32,
    pub fights_per_match: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            roster_path: None,
            moves_log: PathBuf::from("battle_moves.jsonl"),
            results_log: PathBuf::from("results.jsonl"),
            seed: None,
            series_battles: 50,
            fights_per_match: 5,
        }
    }
}

impl ArenaConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Loads the file at `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::from_ron_str(&text)?;
                tracing::debug!(path = %path.display(), "config loaded");
                Ok(config)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
