//! Configuration file loading for self-play.

use chess_ai::{SearchConfig, Strategy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Settings for a self-play game.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    pub white: Strategy,
    pub black: Strategy,
    pub search: SearchConfig,
    /// The game is abandoned as unfinished after this many plies.
    pub max_plies: u32,
    /// Seed for move shuffling and random play. Unset means a fresh seed.
    pub seed: Option<u64>,
    /// Starting position as FEN. Unset means the standard position.
    pub fen: Option<String>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            white: Strategy::Negamax,
            black: Strategy::Negamax,
            search: SearchConfig::default(),
            max_plies: 200,
            seed: None,
            fen: None,
        }
    }
}

impl SelfPlayConfig {
    /// Loads the configuration from `path`.
    ///
    /// A missing file is not an error and yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default configuration path, `selfplay.toml` in the current
    /// working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("selfplay.toml")
    }
}
