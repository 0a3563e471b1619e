use thiserror::Error;

use crate::save::StoreError;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Invalid match setup: {0}")]
    InvalidSetup(String),

    #[error("Invalid scoring config: {0}")]
    InvalidConfig(String),

    #[error("Saved match store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
