use serde::{Deserialize, Serialize};

pub use card::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use solver::*;
pub use types::*;

mod card;
mod config;
mod engine;
mod error;
mod generator;
mod session;
mod solver;
mod types;

/// Outcome of a player action on a round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Ignored, the round is exactly as before.
    NoChange,
    /// Selection, operator or hand changed without a merge.
    Changed,
    /// Two cards merged and more than one card is still active.
    Merged,
    Won,
    Lost,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            NoChange => false,
            Changed => true,
            Merged => true,
            Won => true,
            Lost => true,
        }
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Outcome of polling the round clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// The round is over, nothing to count.
    Idle,
    Counting,
    TimedOut,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Idle)
    }
}
