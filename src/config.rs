use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables for a battle session.
///
/// Missing fields fall back to their defaults, so a config file only needs to
/// name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Currency granted per opponent level on a win.
    pub reward_per_level: u32,
    /// Number of trailing log entries a snapshot exposes.
    pub log_window: usize,
    /// Narrate an immune (0x) hit exactly like a miss, as older builds did.
    pub legacy_miss_narration: bool,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            reward_per_level: 10,
            log_window: 5,
            legacy_miss_narration: false,
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        ron::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a config from a RON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_ron_str(&content)
    }
}
