use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{LastBall, Partnership, Player, PowerPlayStats, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum MatchFormat {
    /// Twenty overs a side
    #[serde(rename = "T20")]
    T20,
    /// Fifty overs a side
    #[serde(rename = "ODI")]
    Odi,
    #[serde(rename = "Test")]
    Test,
}

impl MatchFormat {
    pub fn code(&self) -> &'static str {
        match self {
            MatchFormat::T20 => "T20",
            MatchFormat::Odi => "ODI",
            MatchFormat::Test => "Test",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TossDecision {
    Bat,
    Field,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Umpires {
    pub on_field: Vec<String>,
    pub third_umpire: String,
}

/// A match in play. Owns both teams, the partnerships and the power-play figures.
///
/// Only the reducer and [`crate::state::ScoringState`] mutate it. Innings
/// changes (swapping the batting and bowling sides) are not modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Match {
    pub id: String,
    /// RFC 3339
    pub date: String,
    pub venue: String,
    pub format: MatchFormat,
    pub toss_winner: String,
    pub toss_decision: TossDecision,
    pub batting_team: Team,
    pub bowling_team: Team,
    /// Striker first
    pub current_batsmen: [String; 2],
    pub current_bowler: String,
    #[serde(default)]
    pub last_ball: LastBall,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub umpires: Umpires,
    #[serde(default)]
    pub partnerships: Vec<Partnership>,
    #[serde(default)]
    pub current_partnership: Option<Partnership>,
    #[serde(default)]
    pub power_play: PowerPlayStats,
}

impl Match {
    /// Zero every aggregate so the match can start from the first ball.
    pub fn reset_for_start(&mut self) {
        self.batting_team.reset();
        self.bowling_team.reset();
        self.last_ball = LastBall::default();
        self.partnerships.clear();
        self.current_partnership = None;
        self.power_play = PowerPlayStats::default();
    }

    pub fn striker(&self) -> Option<&Player> {
        self.batting_team.find_player(&self.current_batsmen[0])
    }

    pub fn non_striker(&self) -> Option<&Player> {
        self.batting_team.find_player(&self.current_batsmen[1])
    }

    pub fn current_bowler_player(&self) -> Option<&Player> {
        self.bowling_team.find_player(&self.current_bowler)
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == MatchStatus::InProgress
    }

    /// One-line summary for listings.
    pub fn summary(&self) -> String {
        format!(
            "{} v {} at {} ({}): {}",
            self.batting_team.name,
            self.bowling_team.name,
            self.venue,
            self.format.code(),
            self.batting_team.score_line()
        )
    }
}
