use serde::Deserialize;
use serde_json::Value;

use super::error::StoreError;
use super::format::{SavedMatch, SavedMatches};
use super::SAVE_VERSION;
use crate::engine::rates;
use crate::models::{
    LastBall, Match, MatchFormat, MatchStatus, Partnership, Player, PowerPlayStats, Team,
    TossDecision, Umpires,
};

/// Bring a stored document to the current layout.
///
/// Version 0 is the browser scorer's layout: a bare array of camelCase match
/// objects, each carrying its own `savedAt`, with one shared `runs` counter
/// per player and overs kept as accumulated fractions.
pub fn migrate_document(value: Value) -> Result<SavedMatches, StoreError> {
    if value.is_array() {
        return migrate_v0_to_v1(value);
    }
    if !value.is_object() {
        return Err(StoreError::Corrupted(format!("unexpected document: {value}")));
    }

    let found = value
        .get("version")
        .and_then(Value::as_u64)
        .ok_or_else(|| StoreError::Corrupted("missing document version".to_string()))?
        as u32;

    if found > SAVE_VERSION {
        return Err(StoreError::VersionMismatch {
            found,
            expected: SAVE_VERSION,
        });
    }

    let mut doc: SavedMatches = serde_json::from_value(value)?;
    if doc.version != SAVE_VERSION {
        log::info!("Migrated saved matches from version {} to {}", doc.version, SAVE_VERSION);
        doc.version = SAVE_VERSION;
    }
    Ok(doc)
}

fn migrate_v0_to_v1(value: Value) -> Result<SavedMatches, StoreError> {
    let legacy: Vec<V0Match> = serde_json::from_value(value)?;
    log::info!("Migrating {} saved matches from version 0 to 1", legacy.len());

    let matches = legacy.into_iter().map(V0Match::upgrade).collect();
    Ok(SavedMatches {
        version: SAVE_VERSION,
        matches,
    })
}

// ========================
// Version 0 layout
// ========================

#[derive(Clone, Copy)]
enum Side {
    Batting,
    Bowling,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct V0Player {
    id: String,
    name: String,
    /// Runs scored for a batsman, runs conceded for a bowler
    runs: u32,
    balls: u32,
    fours: u32,
    sixes: u32,
    dot_balls_faced: u32,
    overs: f64,
    maidens: u32,
    wickets: u32,
    dot_balls: u32,
    wides: u32,
    no_balls: u32,
}

impl V0Player {
    fn upgrade(self, side: Side) -> Player {
        let mut player = Player::new(self.id, self.name);

        player.batting.balls = self.balls;
        player.batting.fours = self.fours;
        player.batting.sixes = self.sixes;
        player.batting.dot_balls = self.dot_balls_faced;

        player.bowling.balls = rates::balls_from_overs(self.overs);
        player.bowling.maidens = self.maidens;
        player.bowling.wickets = self.wickets;
        player.bowling.dot_balls = self.dot_balls;
        player.bowling.wides = self.wides;
        player.bowling.no_balls = self.no_balls;

        match side {
            Side::Batting => player.batting.runs = self.runs,
            Side::Bowling => player.bowling.runs_conceded = self.runs,
        }

        player.batting.refresh_rates();
        player.bowling.refresh_rates();
        player
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct V0Team {
    id: String,
    name: String,
    #[serde(default)]
    players: Vec<V0Player>,
    #[serde(default)]
    total_runs: u32,
    #[serde(default)]
    wickets: u32,
    #[serde(default)]
    overs: f64,
}

impl V0Team {
    fn upgrade(self, side: Side) -> Team {
        let players = self.players.into_iter().map(|p| p.upgrade(side)).collect();
        let mut team = Team::new(self.id, self.name, players);
        team.total_runs = self.total_runs;
        team.wickets = self.wickets;
        team.balls = rates::balls_from_overs(self.overs);
        team.overs = rates::overs_from_balls(team.balls);
        team.current_run_rate = rates::run_rate(team.total_runs, team.overs);
        team
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct V0Partnership {
    batsman1_id: String,
    batsman2_id: String,
    #[serde(default)]
    runs: u32,
    #[serde(default)]
    balls: u32,
    #[serde(default)]
    start_over: f64,
    #[serde(default)]
    end_over: Option<f64>,
}

impl From<V0Partnership> for Partnership {
    fn from(old: V0Partnership) -> Self {
        Self {
            batsman1_id: old.batsman1_id,
            batsman2_id: old.batsman2_id,
            runs: old.runs,
            balls: old.balls,
            start_over: old.start_over,
            end_over: old.end_over,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct V0PowerPlay {
    overs: f64,
    runs: u32,
    wickets: u32,
}

impl From<V0PowerPlay> for PowerPlayStats {
    fn from(old: V0PowerPlay) -> Self {
        let balls = rates::balls_from_overs(old.overs);
        let overs = rates::overs_from_balls(balls);
        Self {
            balls,
            overs,
            runs: old.runs,
            wickets: old.wickets,
            run_rate: rates::run_rate(old.runs, overs),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct V0Umpires {
    on_field: Vec<String>,
    third_umpire: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct V0Match {
    id: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    venue: String,
    format: MatchFormat,
    #[serde(default)]
    toss_winner: String,
    toss_decision: TossDecision,
    batting_team: V0Team,
    bowling_team: V0Team,
    #[serde(default)]
    current_batsmen: Vec<String>,
    #[serde(default)]
    current_bowler: String,
    #[serde(default)]
    last_ball: LastBall,
    #[serde(default)]
    match_status: MatchStatus,
    #[serde(default)]
    umpires: V0Umpires,
    #[serde(default)]
    partnerships: Vec<V0Partnership>,
    #[serde(default)]
    current_partnership: Option<V0Partnership>,
    #[serde(default)]
    power_play_stats: V0PowerPlay,
    #[serde(default)]
    saved_at: String,
}

impl V0Match {
    fn upgrade(self) -> SavedMatch {
        let mut batsmen = self.current_batsmen.into_iter();
        let current_batsmen = [
            batsmen.next().unwrap_or_default(),
            batsmen.next().unwrap_or_default(),
        ];

        let record = Match {
            id: self.id,
            date: self.date,
            venue: self.venue,
            format: self.format,
            toss_winner: self.toss_winner,
            toss_decision: self.toss_decision,
            batting_team: self.batting_team.upgrade(Side::Batting),
            bowling_team: self.bowling_team.upgrade(Side::Bowling),
            current_batsmen,
            current_bowler: self.current_bowler,
            last_ball: self.last_ball,
            status: self.match_status,
            umpires: Umpires {
                on_field: self.umpires.on_field,
                third_umpire: self.umpires.third_umpire,
            },
            partnerships: self
                .partnerships
                .into_iter()
                .map(Partnership::from)
                .collect(),
            current_partnership: self.current_partnership.map(Partnership::from),
            power_play: self.power_play_stats.into(),
        };

        SavedMatch {
            saved_at: self.saved_at,
            record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v0_player(id: &str, runs: u32, balls: u32, overs: f64) -> Value {
        json!({
            "id": id, "name": format!("Player {id}"),
            "runs": runs, "balls": balls, "fours": 1, "sixes": 0, "strikeRate": 0,
            "dotBallsFaced": 1, "overs": overs, "maidens": 0, "wickets": 0,
            "economy": 0, "dotBalls": 0, "wides": 0, "noBalls": 0
        })
    }

    /// Seven deliveries scored in the browser app: 4, 0, 1 wide, 1, W, 2, 3.
    fn v0_document() -> Value {
        let seven = 7.0 / 6.0;
        json!([{
            "id": "1718000000000",
            "date": "2024-06-10T09:00:00.000Z",
            "venue": "Oval",
            "format": "T20",
            "tossWinner": "Harbour",
            "tossDecision": "bat",
            "battingTeam": {
                "id": "1", "name": "Harbour",
                "players": [v0_player("B1", 5, 4, 0.0), v0_player("B2", 5, 2, 0.0)],
                "totalRuns": 11, "wickets": 1, "overs": seven, "currentRunRate": 9.43
            },
            "bowlingTeam": {
                "id": "2", "name": "Hillside",
                "players": [v0_player("W1", 11, 0, seven)],
                "totalRuns": 11, "wickets": 1, "overs": seven, "currentRunRate": 9.43
            },
            "currentBatsmen": ["B3", "B2"],
            "currentBowler": "W1",
            "lastBall": {"runs": 3, "wicket": false, "extras": 0},
            "matchStatus": "in_progress",
            "umpires": {"onField": ["Dar", "Taufel"], "thirdUmpire": "Bowden"},
            "partnerships": [{
                "batsman1Id": "B1", "batsman2Id": "B2", "runs": 5, "balls": 4,
                "startOver": 0, "endOver": 5.0 / 6.0
            }],
            "currentPartnership": {
                "batsman1Id": "B1", "batsman2Id": "B2", "runs": 5, "balls": 2,
                "startOver": 5.0 / 6.0, "endOver": null
            },
            "powerPlayStats": {"overs": seven, "runs": 11, "wickets": 1, "runRate": 9.43},
            "savedAt": "2024-06-10T09:30:00.000Z"
        }])
    }

    #[test]
    fn test_empty_array_is_version_zero() {
        let doc = migrate_document(json!([])).unwrap();
        assert_eq!(doc.version, SAVE_VERSION);
        assert!(doc.matches.is_empty());
    }

    #[test]
    fn test_browser_layout_migrates() {
        let doc = migrate_document(v0_document()).unwrap();
        assert_eq!(doc.version, SAVE_VERSION);
        assert_eq!(doc.matches.len(), 1);

        let saved = &doc.matches[0];
        assert_eq!(saved.saved_at, "2024-06-10T09:30:00.000Z");
        let m = &saved.record;
        assert_eq!(m.id, "1718000000000");
        assert_eq!(m.format, MatchFormat::T20);
        assert_eq!(m.status, MatchStatus::InProgress);
        assert_eq!(m.current_batsmen, ["B3".to_string(), "B2".to_string()]);
        assert_eq!(m.umpires.third_umpire, "Bowden");

        assert_eq!(m.batting_team.balls, 7);
        assert_eq!(m.batting_team.total_runs, 11);
        assert_eq!(m.batting_team.overs, 7.0 / 6.0);
        assert_eq!(m.power_play.balls, 7);
        assert_eq!(m.partnerships.len(), 1);
        assert!(m.current_partnership.as_ref().unwrap().is_active());
        assert_eq!(m.last_ball.runs, 3);
    }

    #[test]
    fn test_shared_runs_field_is_split_by_side() {
        let doc = migrate_document(v0_document()).unwrap();
        let m = &doc.matches[0].record;

        let b1 = m.batting_team.find_player("B1").unwrap();
        assert_eq!(b1.batting.runs, 5);
        assert_eq!(b1.bowling.runs_conceded, 0);
        assert_eq!(b1.batting.strike_rate(), 125.0);

        let w1 = m.bowling_team.find_player("W1").unwrap();
        assert_eq!(w1.batting.runs, 0);
        assert_eq!(w1.bowling.runs_conceded, 11);
        assert_eq!(w1.bowling.balls, 7);
        assert!((w1.bowling.economy() - 11.0 / (7.0 / 6.0)).abs() < 1e-9);
    }

    #[test]
    fn test_future_version_rejected() {
        let err = migrate_document(json!({"version": 9, "matches": []})).unwrap_err();
        assert!(matches!(
            err,
            StoreError::VersionMismatch {
                found: 9,
                expected: 1
            }
        ));
    }

    #[test]
    fn test_missing_version_is_corrupted() {
        let err = migrate_document(json!({"matches": []})).unwrap_err();
        assert!(matches!(err, StoreError::Corrupted(_)));
    }
}
