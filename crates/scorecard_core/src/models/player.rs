use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::config::MaidenRule;
use crate::engine::rates::{self, BALLS_PER_OVER};

/// Roster entry as entered during match setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerEntry {
    pub id: String,
    pub name: String,
}

/// A squad member with batting and bowling figures for the current match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub batting: BattingStats,
    #[serde(default)]
    pub bowling: BowlingStats,
}

impl Player {
    /// New player with zeroed figures.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            batting: BattingStats::default(),
            bowling: BowlingStats::default(),
        }
    }

    pub fn reset_figures(&mut self) {
        self.batting = BattingStats::default();
        self.bowling = BowlingStats::default();
    }
}

impl From<PlayerEntry> for Player {
    fn from(entry: PlayerEntry) -> Self {
        Self::new(entry.id, entry.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct BattingStats {
    pub runs: u32,
    /// Balls faced
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    /// Balls faced without scoring
    pub dot_balls: u32,
    strike_rate: f64,
}

impl BattingStats {
    /// Runs per 100 balls faced, recomputed on every ball.
    pub fn strike_rate(&self) -> f64 {
        self.strike_rate
    }

    /// Recompute the strike rate from the counters.
    pub(crate) fn refresh_rates(&mut self) {
        self.strike_rate = rates::strike_rate(self.runs, self.balls);
    }

    /// Credit one ball faced.
    pub fn record_ball(&mut self, runs: u32) {
        self.runs = self.runs.saturating_add(runs);
        self.balls = self.balls.saturating_add(1);
        self.strike_rate = rates::strike_rate(self.runs, self.balls);

        match runs {
            0 => self.dot_balls = self.dot_balls.saturating_add(1),
            4 => self.fours = self.fours.saturating_add(1),
            6 => self.sixes = self.sixes.saturating_add(1),
            _ => {}
        }
    }
}

/// Bowling figures. `runs_conceded` includes extras.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct BowlingStats {
    /// Balls bowled, wides and no-balls included
    pub balls: u32,
    pub overs: f64,
    pub maidens: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
    economy: f64,
    pub dot_balls: u32,
    pub wides: u32,
    pub no_balls: u32,
    /// Runs and extras conceded in the over in progress
    #[serde(default)]
    pub over_runs: u32,
}

/// One delivery from the bowler's point of view.
#[derive(Debug, Clone, Copy)]
pub struct Delivery {
    pub runs: u32,
    pub extras: u32,
    pub wicket: bool,
    pub is_wide: bool,
    pub is_no_ball: bool,
}

impl BowlingStats {
    /// Runs conceded per over, recomputed on every ball.
    pub fn economy(&self) -> f64 {
        self.economy
    }

    /// Recompute overs and economy from the ball count and runs conceded.
    pub(crate) fn refresh_rates(&mut self) {
        self.overs = rates::overs_from_balls(self.balls);
        self.economy = rates::economy(self.runs_conceded, self.overs);
    }

    /// Credit one delivery. Returns `true` when a maiden was credited.
    pub fn record_delivery(&mut self, delivery: Delivery, rule: MaidenRule) -> bool {
        let conceded = delivery.runs.saturating_add(delivery.extras);

        self.balls = self.balls.saturating_add(1);
        self.overs = rates::overs_from_balls(self.balls);
        self.runs_conceded = self.runs_conceded.saturating_add(conceded);
        self.over_runs = self.over_runs.saturating_add(conceded);
        if delivery.wicket {
            self.wickets = self.wickets.saturating_add(1);
        }

        let maiden = match rule {
            MaidenRule::PerBall => conceded == 0,
            MaidenRule::PerOver => self.balls % BALLS_PER_OVER == 0 && self.over_runs == 0,
        };
        if maiden {
            self.maidens = self.maidens.saturating_add(1);
        }
        if self.balls % BALLS_PER_OVER == 0 {
            self.over_runs = 0;
        }

        self.economy = rates::economy(self.runs_conceded, self.overs);

        if delivery.runs == 0 {
            self.dot_balls = self.dot_balls.saturating_add(1);
        }
        if delivery.is_wide {
            self.wides = self.wides.saturating_add(1);
        }
        if delivery.is_no_ball {
            self.no_balls = self.no_balls.saturating_add(1);
        }

        maiden
    }
}
