//! # scorecard_core - Live Cricket Scoring
//!
//! Ball-by-ball scoring state for a single innings view of a cricket match.
//!
//! ## Features
//! - Scoring reducer: team totals, batting and bowling figures, partnerships,
//!   power-play figures from one delivery at a time
//! - Match setup from the toss and two squads
//! - Explicit state container with match history
//! - Saved matches in any key-value store (in-memory or on disk)
//!
//! ```rust
//! use scorecard_core::{BallEvent, ScoringState};
//! # fn setup() -> scorecard_core::MatchSetup {
//! #     serde_json::from_str(r#"{
//! #         "team1_name": "Harbour", "team2_name": "Hillside",
//! #         "team1_players": [{"id": "B1", "name": "A"}, {"id": "B2", "name": "B"}],
//! #         "team2_players": [{"id": "W1", "name": "C"}],
//! #         "format": "T20", "toss_winner": "Harbour", "toss_decision": "bat",
//! #         "opening_batsmen": ["B1", "B2"], "opening_bowler": "W1"
//! #     }"#).unwrap()
//! # }
//!
//! let mut state = ScoringState::default();
//! state.start_from_setup(setup()).unwrap();
//! state.record_ball(&BallEvent::runs(4, "B1", "W1"));
//!
//! let m = state.current_match.as_ref().unwrap();
//! assert_eq!(m.batting_team.total_runs, 4);
//! ```

pub mod engine;
pub mod error;
pub mod models;
pub mod save;
pub mod state;

pub use engine::{apply_ball, BallEffects, MaidenRule, PowerPlayConfig, ScoringConfig};
pub use error::{Result, ScoreError};

pub use models::{
    BallEvent, BattingStats, BowlingStats, LastBall, Match, MatchFormat, MatchSetup, MatchStatus,
    Partnership, Player, PlayerEntry, PowerPlayStats, Team, TossDecision, Umpires,
};

pub use save::{
    FileStore, KeyValueStore, MemoryStore, SaveManager, SavedMatch, SavedMatches, StoreError,
};

pub use state::ScoringState;

/// Library version, as logged by the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Saved-match document version written by this build
pub const SCHEMA_VERSION: u32 = save::SAVE_VERSION;
