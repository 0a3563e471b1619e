use crate::engine::rates;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Joint contribution of the two batsmen at the crease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Partnership {
    pub batsman1_id: String,
    pub batsman2_id: String,
    /// Runs off the bat; extras are not credited to a partnership
    pub runs: u32,
    pub balls: u32,
    pub start_over: f64,
    /// Unset while the partnership is active
    pub end_over: Option<f64>,
}

impl Partnership {
    pub fn open(pair: &[String; 2], start_over: f64) -> Self {
        Self {
            batsman1_id: pair[0].clone(),
            batsman2_id: pair[1].clone(),
            runs: 0,
            balls: 0,
            start_over,
            end_over: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.end_over.is_none()
    }

    pub fn involves(&self, batsman_id: &str) -> bool {
        self.batsman1_id == batsman_id || self.batsman2_id == batsman_id
    }

    /// Swap one batsman id for another. Returns `false` if `old_id` is not in the pair.
    pub fn replace_batsman(&mut self, old_id: &str, new_id: &str) -> bool {
        if self.batsman1_id == old_id {
            self.batsman1_id = new_id.to_string();
        } else if self.batsman2_id == old_id {
            self.batsman2_id = new_id.to_string();
        } else {
            return false;
        }
        true
    }

    /// Runs per over for the stand so far.
    pub fn run_rate(&self) -> f64 {
        rates::per_over_rate(self.runs, self.balls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_replace() {
        let pair = ["b1".to_string(), "b2".to_string()];
        let mut stand = Partnership::open(&pair, 2.5);
        assert!(stand.is_active());
        assert_eq!(stand.run_rate(), 0.0);

        assert!(stand.replace_batsman("b1", "b3"));
        assert!(stand.involves("b3"));
        assert!(!stand.involves("b1"));
        assert!(!stand.replace_batsman("b9", "b4"));

        stand.runs = 15;
        stand.balls = 9;
        assert_eq!(stand.run_rate(), 10.0);
    }
}
