//! Session setup read from JSON, and environment-driven paths.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::state::{AbandonBudget, GameOptions};
use crate::errors::domain::DomainError;

const STATE_PATH_VAR: &str = "ESCALIER_STATE_PATH";
const DEFAULT_STATE_PATH: &str = "escalier-state.json";

/// Table setup as written by hand in a config file.
///
/// ```json
/// { "players": ["Noah", "Spart", "Alex"], "abandon_budget": 5, "bonus": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub players: Vec<String>,
    #[serde(default)]
    pub abandon_budget: u8,
    #[serde(default)]
    pub bonus: bool,
}

/// Validated arguments for [`crate::domain::GameSession::start_new_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSetup {
    pub num_players: u8,
    pub names: Vec<String>,
    pub options: GameOptions,
}

impl SessionConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw)
            .map_err(|e| DomainError::invalid_configuration(format!("config: {e}")))
    }

    pub fn from_path(path: &Path) -> Result<Self, DomainError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DomainError::invalid_configuration(format!("reading {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    /// Check the budget and player count. Names are checked when the
    /// session starts.
    pub fn into_setup(self) -> Result<SessionSetup, DomainError> {
        let abandon_budget = AbandonBudget::try_from(self.abandon_budget)?;
        let num_players = u8::try_from(self.players.len()).map_err(|_| {
            DomainError::invalid_configuration(format!("{} players", self.players.len()))
        })?;
        Ok(SessionSetup {
            num_players,
            names: self.players,
            options: GameOptions::new(abandon_budget, self.bonus),
        })
    }
}

/// Where the active session is persisted (`ESCALIER_STATE_PATH`, defaults
/// to `escalier-state.json` in the working directory).
pub fn store_path() -> PathBuf {
    env::var(STATE_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_PATH))
}
