//! Library-specific error type

use crate::player::PlayerId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("state violation: {0}")]
    StateViolation(String),

    #[error("empty probability distribution")]
    EmptyDistribution,

    #[error("model error: {0}")]
    ModelError(String),

    #[error("could not find player with ID {0}")]
    PlayerNotFound(PlayerId),

    #[error("duplicate player ID: {0}")]
    DuplicatePlayerId(PlayerId),
}

pub type Result<T> = std::result::Result<T, Error>;
