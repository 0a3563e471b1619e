use super::Player;
use crate::engine::rates;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub players: Vec<Player>, // squad order, not a ranking
    pub total_runs: u32,
    pub wickets: u32,
    /// Deliveries bowled in the innings
    pub balls: u32,
    /// `balls / 6`
    pub overs: f64,
    pub current_run_rate: f64,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>, players: Vec<Player>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            players,
            total_runs: 0,
            wickets: 0,
            balls: 0,
            overs: 0.0,
            current_run_rate: 0.0,
        }
    }

    /// Zero the aggregates and every player's figures.
    pub fn reset(&mut self) {
        self.total_runs = 0;
        self.wickets = 0;
        self.balls = 0;
        self.overs = 0.0;
        self.current_run_rate = 0.0;
        for player in &mut self.players {
            player.reset_figures();
        }
    }

    /// Add one delivery to the aggregates.
    pub fn record_ball(&mut self, runs: u32, wicket: bool) {
        self.total_runs = self.total_runs.saturating_add(runs);
        if wicket {
            self.wickets = self.wickets.saturating_add(1);
        }
        self.balls = self.balls.saturating_add(1);
        self.overs = rates::overs_from_balls(self.balls);
        self.current_run_rate = rates::run_rate(self.total_runs, self.overs);
    }

    pub fn find_player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn find_player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    /// Players by runs scored, highest first. Ties keep squad order.
    pub fn batting_card(&self) -> Vec<&Player> {
        let mut card: Vec<&Player> = self.players.iter().collect();
        card.sort_by(|a, b| b.batting.runs.cmp(&a.batting.runs));
        card
    }

    /// Players by wickets taken, highest first. Ties keep squad order.
    pub fn bowling_card(&self) -> Vec<&Player> {
        let mut card: Vec<&Player> = self.players.iter().collect();
        card.sort_by(|a, b| b.bowling.wickets.cmp(&a.bowling.wickets));
        card
    }

    /// Players that can replace `current_id`, filtered by a case-insensitive
    /// name fragment. An empty search matches everyone.
    pub fn switch_candidates(&self, current_id: &str, search: &str) -> Vec<&Player> {
        let needle = search.to_lowercase();
        self.players
            .iter()
            .filter(|p| p.id != current_id && p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// `"45/2 (5.3 ov, RR 8.18)"`
    pub fn score_line(&self) -> String {
        format!(
            "{}/{} ({} ov, RR {:.2})",
            self.total_runs,
            self.wickets,
            rates::format_overs(self.balls),
            self.current_run_rate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squad() -> Team {
        Team::new(
            "1",
            "Riverside",
            vec![
                Player::new("a", "Asha Rao"),
                Player::new("b", "Ben Cole"),
                Player::new("c", "Cara Ash"),
            ],
        )
    }

    #[test]
    fn test_record_ball_and_run_rate() {
        let mut team = squad();
        assert_eq!(team.current_run_rate, 0.0);

        for _ in 0..6 {
            team.record_ball(2, false);
        }
        team.record_ball(0, true);

        assert_eq!(team.total_runs, 12);
        assert_eq!(team.wickets, 1);
        assert_eq!(team.balls, 7);
        assert!((team.overs - 7.0 / 6.0).abs() < 1e-12);
        assert!((team.current_run_rate - 12.0 / (7.0 / 6.0)).abs() < 1e-9);
        assert_eq!(team.score_line(), "12/1 (1.1 ov, RR 10.29)");
    }

    #[test]
    fn test_cards_sorted() {
        let mut team = squad();
        team.players[1].batting.record_ball(6);
        team.players[2].batting.record_ball(4);
        team.players[2].bowling.wickets = 2;

        let batting: Vec<&str> = team.batting_card().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(batting, vec!["b", "c", "a"]);

        let bowling: Vec<&str> = team.bowling_card().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(bowling, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_switch_candidates() {
        let team = squad();
        let ids = |v: Vec<&Player>| v.iter().map(|p| p.id.clone()).collect::<Vec<_>>();

        assert_eq!(ids(team.switch_candidates("a", "")), vec!["b", "c"]);
        assert_eq!(ids(team.switch_candidates("a", "ASH")), vec!["c"]);
        assert_eq!(ids(team.switch_candidates("b", "co")), Vec::<String>::new());
    }

    #[test]
    fn test_reset() {
        let mut team = squad();
        team.record_ball(4, false);
        team.players[0].batting.record_ball(4);
        team.reset();
        assert_eq!(team, squad());
    }
}
