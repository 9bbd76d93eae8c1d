use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Draws attempted per pass before a generator gives up.
pub const MAX_GENERATION_ATTEMPTS: u32 = 4000;

pub trait HandGenerator {
    fn generate(self, config: &GameConfig, mode: RoundMode) -> Result<DealtHand>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundMode {
    Solvable,
    Unsolvable,
}

impl RoundMode {
    pub const fn accepts(self, solvable: bool) -> bool {
        match self {
            Self::Solvable => solvable,
            Self::Unsolvable => !solvable,
        }
    }
}

impl Default for RoundMode {
    fn default() -> Self {
        Self::Solvable
    }
}

/// A fresh hand and the mode it actually satisfies, which differs from the
/// requested one when the unsolvable search fell back.
#[derive(Clone, Debug, PartialEq)]
pub struct DealtHand {
    pub cards: [Card; HAND_SIZE],
    pub mode: RoundMode,
}
