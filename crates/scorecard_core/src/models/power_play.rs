use crate::engine::rates;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Aggregates for the deliveries bowled inside the power-play window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct PowerPlayStats {
    pub balls: u32,
    pub overs: f64,
    pub runs: u32,
    pub wickets: u32,
    pub run_rate: f64,
}

impl PowerPlayStats {
    pub fn record_ball(&mut self, runs: u32, wicket: bool) {
        self.balls = self.balls.saturating_add(1);
        self.overs = rates::overs_from_balls(self.balls);
        self.runs = self.runs.saturating_add(runs);
        if wicket {
            self.wickets = self.wickets.saturating_add(1);
        }
        self.run_rate = rates::run_rate(self.runs, self.overs);
    }
}
