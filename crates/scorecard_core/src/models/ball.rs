use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single delivery as entered by the scorer.
///
/// `runs` are off the bat and are not bounds-checked; `extras` are added to the
/// team total and the bowler's runs conceded but not to the batsman.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BallEvent {
    pub runs: u32,
    #[serde(default)]
    pub wicket: bool,
    #[serde(default)]
    pub extras: u32,
    pub batsman_id: String,
    pub bowler_id: String,
    #[serde(default)]
    pub is_wide: bool,
    #[serde(default)]
    pub is_no_ball: bool,
}

impl BallEvent {
    /// A plain delivery: runs off the bat, no extras, no wicket.
    pub fn runs(runs: u32, batsman_id: impl Into<String>, bowler_id: impl Into<String>) -> Self {
        Self {
            runs,
            wicket: false,
            extras: 0,
            batsman_id: batsman_id.into(),
            bowler_id: bowler_id.into(),
            is_wide: false,
            is_no_ball: false,
        }
    }

    pub fn with_wicket(mut self) -> Self {
        self.wicket = true;
        self
    }

    pub fn with_extras(mut self, extras: u32) -> Self {
        self.extras = extras;
        self
    }

    pub fn wide(mut self) -> Self {
        self.is_wide = true;
        self
    }

    pub fn no_ball(mut self) -> Self {
        self.is_no_ball = true;
        self
    }

    /// Runs added to the team total for this delivery.
    pub fn total_runs(&self) -> u32 {
        self.runs.saturating_add(self.extras)
    }
}

/// What the scoreboard shows for the most recent delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct LastBall {
    pub runs: u32,
    pub wicket: bool,
    pub extras: u32,
}

impl From<&BallEvent> for LastBall {
    fn from(ball: &BallEvent) -> Self {
        Self {
            runs: ball.runs,
            wicket: ball.wicket,
            extras: ball.extras,
        }
    }
}
