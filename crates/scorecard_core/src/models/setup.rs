//! Match setup: turns the toss and two squads into a ready-to-start [`Match`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use super::{
    LastBall, Match, MatchFormat, MatchStatus, Player, PlayerEntry, PowerPlayStats, TossDecision,
    Team, Umpires,
};
use crate::error::{Result, ScoreError};

pub const BATTING_TEAM_ID: &str = "1";
pub const BOWLING_TEAM_ID: &str = "2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchSetup {
    pub team1_name: String,
    pub team2_name: String,
    pub team1_players: Vec<PlayerEntry>,
    pub team2_players: Vec<PlayerEntry>,
    #[serde(default)]
    pub venue: String,
    pub format: MatchFormat,
    pub toss_winner: String,
    pub toss_decision: TossDecision,
    #[serde(default)]
    pub umpires: Umpires,
    pub opening_batsmen: Vec<String>,
    pub opening_bowler: String,
}

impl MatchSetup {
    /// Names of (batting side, bowling side) decided by the toss.
    fn sides(&self) -> ((&str, &[PlayerEntry]), (&str, &[PlayerEntry])) {
        let team1 = (self.team1_name.as_str(), self.team1_players.as_slice());
        let team2 = (self.team2_name.as_str(), self.team2_players.as_slice());
        let winner_is_team1 = self.toss_winner == self.team1_name;

        match (self.toss_decision, winner_is_team1) {
            (TossDecision::Bat, true) | (TossDecision::Field, false) => (team1, team2),
            (TossDecision::Bat, false) | (TossDecision::Field, true) => (team2, team1),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(ScoreError::InvalidSetup(msg));

        if self.team1_name.trim().is_empty() || self.team2_name.trim().is_empty() {
            return invalid("team names must not be empty".to_string());
        }
        if self.team1_name == self.team2_name {
            return invalid(format!("both teams are named '{}'", self.team1_name));
        }
        if self.toss_winner != self.team1_name && self.toss_winner != self.team2_name {
            return invalid(format!("toss winner '{}' is not playing", self.toss_winner));
        }

        for (name, roster) in
            [(&self.team1_name, &self.team1_players), (&self.team2_name, &self.team2_players)]
        {
            let mut seen = HashSet::new();
            for entry in roster {
                if !seen.insert(entry.id.as_str()) {
                    return invalid(format!("duplicate player id '{}' in {}", entry.id, name));
                }
            }
        }

        let ((batting_name, batting), (bowling_name, bowling)) = self.sides();

        match self.opening_batsmen.as_slice() {
            [a, b] if a != b => {
                for id in [a, b] {
                    if !batting.iter().any(|p| &p.id == id) {
                        return invalid(format!("opening batsman '{id}' is not in {batting_name}"));
                    }
                }
            }
            _ => return invalid("exactly two distinct opening batsmen are required".to_string()),
        }

        if !bowling.iter().any(|p| p.id == self.opening_bowler) {
            return invalid(format!(
                "opening bowler '{}' is not in {bowling_name}",
                self.opening_bowler
            ));
        }

        Ok(())
    }

    /// Validate and build the match with zeroed figures, a fresh id and today's date.
    pub fn into_match(self) -> Result<Match> {
        self.validate()?;

        let ((batting_name, batting), (bowling_name, bowling)) = self.sides();
        let squad = |entries: &[PlayerEntry]| -> Vec<Player> {
            entries.iter().cloned().map(Player::from).collect()
        };
        let batting_team = Team::new(BATTING_TEAM_ID, batting_name, squad(batting));
        let bowling_team = Team::new(BOWLING_TEAM_ID, bowling_name, squad(bowling));

        let date = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| ScoreError::InvalidSetup(format!("cannot format match date: {e}")))?;

        Ok(Match {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            venue: self.venue,
            format: self.format,
            toss_winner: self.toss_winner,
            toss_decision: self.toss_decision,
            batting_team,
            bowling_team,
            current_batsmen: [self.opening_batsmen[0].clone(), self.opening_batsmen[1].clone()],
            current_bowler: self.opening_bowler,
            last_ball: LastBall::default(),
            status: MatchStatus::NotStarted,
            umpires: self.umpires,
            partnerships: Vec::new(),
            current_partnership: None,
            power_play: PowerPlayStats::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(prefix: &str) -> Vec<PlayerEntry> {
        (1..=11)
            .map(|i| PlayerEntry {
                id: format!("{prefix}{i}"),
                name: format!("{prefix} player {i}"),
            })
            .collect()
    }

    fn setup(toss_winner: &str, toss_decision: TossDecision) -> MatchSetup {
        MatchSetup {
            team1_name: "Harbour".to_string(),
            team2_name: "Hillside".to_string(),
            team1_players: roster("H"),
            team2_players: roster("S"),
            venue: "Oval".to_string(),
            format: MatchFormat::T20,
            toss_winner: toss_winner.to_string(),
            toss_decision,
            umpires: Umpires::default(),
            opening_batsmen: vec!["H1".to_string(), "H2".to_string()],
            opening_bowler: "S11".to_string(),
        }
    }

    #[test]
    fn test_toss_decides_batting_side() {
        let m = setup("Harbour", TossDecision::Bat).into_match().unwrap();
        assert_eq!(m.batting_team.name, "Harbour");
        assert_eq!(m.batting_team.id, BATTING_TEAM_ID);
        assert_eq!(m.bowling_team.name, "Hillside");

        let m = setup("Hillside", TossDecision::Field).into_match().unwrap();
        assert_eq!(m.batting_team.name, "Harbour");
        assert_eq!(m.status, MatchStatus::NotStarted);
        assert_eq!(m.batting_team.players.len(), 11);
        assert!(m.current_partnership.is_none());
    }

    #[test]
    fn test_fielding_first_swaps_sides() {
        let mut s = setup("Harbour", TossDecision::Field);
        s.opening_batsmen = vec!["S1".to_string(), "S2".to_string()];
        s.opening_bowler = "H11".to_string();

        let m = s.into_match().unwrap();
        assert_eq!(m.batting_team.name, "Hillside");
        assert_eq!(m.current_batsmen, ["S1".to_string(), "S2".to_string()]);
        assert_eq!(m.current_bowler, "H11");
    }

    #[test]
    fn test_rejects_bad_openers() {
        let mut s = setup("Harbour", TossDecision::Bat);
        s.opening_batsmen = vec!["H1".to_string(), "H1".to_string()];
        assert!(matches!(s.validate(), Err(ScoreError::InvalidSetup(_))));

        let mut s = setup("Harbour", TossDecision::Bat);
        s.opening_batsmen = vec!["H1".to_string(), "S2".to_string()];
        assert!(s.validate().is_err());

        let mut s = setup("Harbour", TossDecision::Bat);
        s.opening_bowler = "H5".to_string();
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_toss_winner_and_duplicates() {
        assert!(setup("Nobody", TossDecision::Bat).validate().is_err());

        let mut s = setup("Harbour", TossDecision::Bat);
        s.team2_players[3].id = "S1".to_string();
        assert!(s.validate().is_err());
    }
}
