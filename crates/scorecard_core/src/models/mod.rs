pub mod ball;
pub mod match_state;
pub mod partnership;
pub mod player;
pub mod power_play;
pub mod setup;
pub mod team;

pub use ball::{BallEvent, LastBall};
pub use match_state::{Match, MatchFormat, MatchStatus, TossDecision, Umpires};
pub use partnership::Partnership;
pub use player::{BattingStats, BowlingStats, Delivery, Player, PlayerEntry};
pub use power_play::PowerPlayStats;
pub use setup::MatchSetup;
pub use team::Team;
