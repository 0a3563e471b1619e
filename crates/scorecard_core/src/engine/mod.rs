pub mod config;
pub mod rates;
pub mod reducer;


pub use config::{MaidenRule, PowerPlayConfig, ScoringConfig};
pub use reducer::{apply_ball, BallEffects};
