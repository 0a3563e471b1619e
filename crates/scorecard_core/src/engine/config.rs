//! # Scoring Configuration
//!
//! Rules that are a matter of interpretation rather than arithmetic live here
//! so that a scorer can pick the behaviour they expect.
//!
//! ## Usage
//! ```rust
//! use scorecard_core::engine::config::{MaidenRule, ScoringConfig};
//!
//! let config = ScoringConfig::default();
//! assert_eq!(config.maiden_rule, MaidenRule::PerOver);
//! let legacy = ScoringConfig::legacy();
//! assert_eq!(legacy.maiden_rule, MaidenRule::PerBall);
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{env, fs};

use crate::error::ScoreError;
use crate::models::MatchFormat;

/// Environment variable naming a JSON file with a [`ScoringConfig`].
pub const SCORING_CONFIG_PATH_ENV: &str = "SCORECARD_CONFIG_PATH";

/// How maidens are credited to a bowler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum MaidenRule {
    /// One maiden per completed over of six scoreless, extra-less balls.
    #[default]
    PerOver,
    /// One maiden per scoreless, extra-less ball (older scorecards).
    PerBall,
}

/// Power-play window, in overs, per match format. `None` means no power play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PowerPlayConfig {
    /// Short format window (default: 6)
    pub t20_overs: Option<u32>,
    /// One-day window (default: 10)
    pub odi_overs: Option<u32>,
    /// Long format window (default: 10, same rule as one-day)
    pub test_overs: Option<u32>,
}

impl Default for PowerPlayConfig {
    fn default() -> Self {
        Self {
            t20_overs: Some(6),
            odi_overs: Some(10),
            test_overs: Some(10),
        }
    }
}

impl PowerPlayConfig {
    pub fn overs_for(&self, format: MatchFormat) -> Option<u32> {
        match format {
            MatchFormat::T20 => self.t20_overs,
            MatchFormat::Odi => self.odi_overs,
            MatchFormat::Test => self.test_overs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ScoringConfig {
    #[serde(default)]
    pub maiden_rule: MaidenRule,
    #[serde(default)]
    pub power_play: PowerPlayConfig,
}

impl ScoringConfig {
    /// Per-over maidens, power play in every format.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Reproduces scorecards kept with per-ball maidens.
    pub fn legacy() -> Self {
        Self {
            maiden_rule: MaidenRule::PerBall,
            ..Self::default()
        }
    }

    /// Standard rules without a power play in Test matches.
    pub fn no_test_power_play() -> Self {
        let mut cfg = Self::default();
        cfg.power_play.test_overs = None;
        cfg
    }

    pub fn from_json(json: &str) -> Result<Self, ScoreError> {
        serde_json::from_str(json).map_err(|e| ScoreError::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        let windows = [
            ("t20_overs", self.power_play.t20_overs),
            ("odi_overs", self.power_play.odi_overs),
            ("test_overs", self.power_play.test_overs),
        ];
        for (name, overs) in windows {
            if overs == Some(0) {
                return Err(ScoreError::InvalidConfig(format!(
                    "power_play.{name} must be positive or null"
                )));
            }
        }
        Ok(())
    }

    /// Load and validate a config file.
    pub fn from_path(path: &str) -> Result<Self, ScoreError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ScoreError::InvalidConfig(format!("failed to read '{path}': {e}")))?;
        let config = Self::from_json(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Config from the file named by [`SCORING_CONFIG_PATH_ENV`], or the
    /// default when the variable is unset or blank.
    pub fn from_env() -> Result<Self, ScoreError> {
        let Ok(path) = env::var(SCORING_CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        log::info!("Loading scoring config from {SCORING_CONFIG_PATH_ENV}='{path}'");
        Self::from_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_windows() {
        let cfg = ScoringConfig::default();
        assert_eq!(cfg.power_play.overs_for(MatchFormat::T20), Some(6));
        assert_eq!(cfg.power_play.overs_for(MatchFormat::Odi), Some(10));
        assert_eq!(cfg.power_play.overs_for(MatchFormat::Test), Some(10));
        let no_test = ScoringConfig::no_test_power_play();
        assert_eq!(no_test.power_play.overs_for(MatchFormat::Test), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg = ScoringConfig::from_json(r#"{"maiden_rule": "per_ball"}"#).unwrap();
        assert_eq!(cfg.maiden_rule, MaidenRule::PerBall);
        assert_eq!(cfg.power_play, PowerPlayConfig::default());
    }

    #[test]
    fn test_zero_window_rejected() {
        let cfg = ScoringConfig::from_json(
            r#"{"power_play": {"t20_overs": 0, "odi_overs": 10, "test_overs": null}}"#,
        )
        .unwrap();
        assert!(matches!(cfg.validate(), Err(ScoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("scoring.json");
        let json = r#"{"power_play": {"t20_overs": 6, "odi_overs": 10, "test_overs": null}}"#;
        std::fs::write(&path, json).unwrap();

        let cfg = ScoringConfig::from_path(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.power_play.test_overs, None);
        assert_eq!(cfg.maiden_rule, MaidenRule::PerOver);

        assert!(ScoringConfig::from_path("/definitely/missing.json").is_err());
    }
}
