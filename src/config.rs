//! Session configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! opponent_enabled = true
//! opponent_delay_ms = 500
//! promotion = "queen"
//! undo = "repeat"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::position::PromotionPiece;

/// Delay before the computer opponent replies.
pub const DEFAULT_OPPONENT_DELAY_MS: u64 = 500;

/// How `undo` walks back through the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndoPolicy {
    /// Needs two recorded positions and restores the second-to-last one.
    /// The first move of a game cannot be taken back.
    #[default]
    Repeat,
    /// Steps back exactly one ply, down to the start position.
    Takeback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub opponent_enabled: bool,
    pub opponent_delay_ms: u64,
    pub promotion: PromotionPiece,
    pub undo: UndoPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            opponent_enabled: false,
            opponent_delay_ms: DEFAULT_OPPONENT_DELAY_MS,
            promotion: PromotionPiece::Queen,
            undo: UndoPolicy::Repeat,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl SessionConfig {
    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
