use rand::prelude::*;

use super::*;

/// Samples hands uniformly from the configured deck until one matches the
/// requested mode, falling back to any solvable hand when unsolvable ones
/// cannot be found.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomHandGenerator {
    seed: u64,
    max_attempts: u32,
}

impl RandomHandGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            max_attempts: MAX_GENERATION_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(self, max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..self
        }
    }
}

impl HandGenerator for RandomHandGenerator {
    fn generate(self, config: &GameConfig, mode: RoundMode) -> Result<DealtHand> {
        if config.ranks.is_empty() || config.suits.is_empty() {
            return Err(GameError::EmptyDeck);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);

        if let Some(cards) = find_hand(&mut rng, config, mode, self.max_attempts) {
            return Ok(DealtHand { cards, mode });
        }

        if mode == RoundMode::Unsolvable {
            log::warn!(
                "No unsolvable hand in {} draws, fallback to solvable",
                self.max_attempts
            );
            if let Some(cards) = find_hand(&mut rng, config, RoundMode::Solvable, self.max_attempts) {
                return Ok(DealtHand {
                    cards,
                    mode: RoundMode::Solvable,
                });
            }
        }

        log::warn!("Hand generation exhausted, requested {:?}", mode);
        Err(GameError::GenerationExhausted)
    }
}

fn find_hand(
    rng: &mut SmallRng,
    config: &GameConfig,
    mode: RoundMode,
    max_attempts: u32,
) -> Option<[Card; HAND_SIZE]> {
    for attempt in 0..max_attempts {
        let cards = draw_hand(rng, config);
        if mode.accepts(is_solvable(&active_values(&cards))) {
            log::debug!("Found {:?} hand after {} draws", mode, attempt + 1);
            return Some(cards);
        }
    }
    None
}

fn draw_hand(rng: &mut SmallRng, config: &GameConfig) -> [Card; HAND_SIZE] {
    core::array::from_fn(|_| {
        let rank = config.ranks[rng.random_range(0..config.ranks.len())];
        let suit = config.suits[rng.random_range(0..config.suits.len())];
        Card::dealt(CardId(rng.random()), rank, suit)
    })
}
