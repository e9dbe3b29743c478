//! # Game Configuration
//!
//! Tunable parameters of a session, readable from YAML:
//!
//! ```yaml
//! time_budget_secs: 90
//! reveal_delay_ms: 1500
//! tick_interval_ms: 1000
//! frets: 12
//! tuning: [G2, D2, A1, E1]
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above (except the
//! time budget, which defaults to 60 seconds).

use crate::catalog::{standard_tuning, NoteCatalog, OPEN_STRING_OCTAVES, STANDARD_FRETS};
use crate::error::FretboardError;
use crate::pitch::Pitch;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TIME_BUDGET_SECS: u32 = 60;
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 1500;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Frets beyond this are not playable on any real bass
pub const MAX_FRETS: usize = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub time_budget_secs: u32,
    pub reveal_delay_ms: u64,
    pub tick_interval_ms: u64,
    pub frets: usize,
    pub tuning: Vec<Pitch>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: DEFAULT_TIME_BUDGET_SECS,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            frets: STANDARD_FRETS,
            tuning: standard_tuning().to_vec(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a YAML document
    ///
    /// # Errors
    /// [`FretboardError::InvalidConfig`] for malformed YAML, unknown keys or values
    /// rejected by [`GameConfig::validate`].
    pub fn from_yaml(source: &str) -> Result<Self, FretboardError> {
        // An empty document is a valid "all defaults" file
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: GameConfig = serde_yaml::from_str(source)
            .map_err(|e| FretboardError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FretboardError> {
        if self.time_budget_secs == 0 {
            return Err(FretboardError::InvalidConfig(
                "time_budget_secs must be at least 1".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(FretboardError::InvalidConfig(
                "tick_interval_ms must be at least 1".to_string(),
            ));
        }
        if self.frets == 0 || self.frets > MAX_FRETS {
            return Err(FretboardError::InvalidConfig(format!(
                "frets must be between 1 and {}, got {}",
                MAX_FRETS, self.frets
            )));
        }
        if self.tuning.is_empty() {
            return Err(FretboardError::InvalidConfig(
                "tuning needs at least one string".to_string(),
            ));
        }
        if let Some(open) = self
            .tuning
            .iter()
            .find(|open| !OPEN_STRING_OCTAVES.contains(&open.octave))
        {
            return Err(FretboardError::InvalidConfig(format!(
                "tuning pitch {} must be in octaves {} to {}",
                open,
                OPEN_STRING_OCTAVES.start(),
                OPEN_STRING_OCTAVES.end()
            )));
        }
        Ok(())
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn build_catalog(&self) -> Result<NoteCatalog, FretboardError> {
        NoteCatalog::from_tuning(&self.tuning, self.frets)
    }
}
