use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Nothing to deal, the deck has no ranks or no suits")]
    EmptyDeck,
    #[error("Could not generate a hand within the attempt bound")]
    GenerationExhausted,
    #[error("Unknown difficulty")]
    UnknownDifficulty,
    #[error("Unknown operator")]
    UnknownOperator,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config deals no suits")]
    EmptySuits,
    #[error("Neutral is reserved for merge results and cannot be dealt")]
    NeutralSuitDealt,
    #[error("Config deals no ranks")]
    EmptyRanks,
    #[error("Time limit for {0} must be positive")]
    InvalidTimeLimit(crate::Difficulty),
    #[error("Unsolvable rate for {0} must be within 0 and 1")]
    InvalidUnsolvableRate(crate::Difficulty),
}
