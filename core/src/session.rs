use rand::prelude::*;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Rounds that must be played before an unsolvable one may be requested.
pub const MIN_ROUNDS_BEFORE_UNSOLVABLE: u32 = 3;

/// Decides which mode to ask the generator for. `roll` is uniform in `[0, 1)`.
///
/// Unsolvable rounds are only eligible after a few rounds and never twice in
/// a row; once eligible they are requested with the difficulty's rate.
pub fn request_mode(
    spec: &DifficultySpec,
    previous_round_was_unsolvable: bool,
    rounds_played: u32,
    roll: f64,
) -> RoundMode {
    let eligible = rounds_played >= MIN_ROUNDS_BEFORE_UNSOLVABLE && !previous_round_was_unsolvable;
    if eligible && roll < spec.unsolvable_rate {
        RoundMode::Unsolvable
    } else {
        RoundMode::Solvable
    }
}

/// Deals the next round for `difficulty`, applying the unsolvable-round policy.
pub fn generate_round<R: Rng + ?Sized>(
    config: &GameConfig,
    difficulty: Difficulty,
    previous_round_was_unsolvable: bool,
    rounds_played: u32,
    rng: &mut R,
) -> Result<Round> {
    let spec = config.difficulty(difficulty);
    let requested = request_mode(
        &spec,
        previous_round_was_unsolvable,
        rounds_played,
        rng.random(),
    );
    let hand = RandomHandGenerator::new(rng.random()).generate(config, requested)?;
    log::debug!(
        "Dealt {:?} round {} at {}, requested {:?}",
        hand.mode,
        rounds_played + 1,
        difficulty,
        requested
    );
    Ok(Round::from_hand(hand, spec.time_limit()))
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub streak: u32,
    pub best_streak: u32,
}

impl SessionStats {
    pub fn record_win(&mut self) {
        self.streak += 1;
        self.best_streak = self.best_streak.max(self.streak);
    }

    /// Only wins count; a loss keeps the streak until the player leaves.
    pub fn record(&mut self, outcome: MoveOutcome) {
        if outcome == MoveOutcome::Won {
            self.record_win();
        }
    }

    pub fn reset_streak(&mut self) {
        self.streak = 0;
    }
}

/// A run of rounds at one difficulty and everything carried between them.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    difficulty: Difficulty,
    rng: SmallRng,
    rounds_played: u32,
    previous_round_was_unsolvable: bool,
    stats: SessionStats,
}

impl Session {
    pub fn new(config: GameConfig, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            config,
            difficulty,
            rng: SmallRng::seed_from_u64(seed),
            rounds_played: 0,
            previous_round_was_unsolvable: false,
            stats: Default::default(),
        }
    }

    pub fn with_stats(self, stats: SessionStats) -> Self {
        Self { stats, ..self }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Deals a new round and starts its clock at `now`.
    pub fn next_round(&mut self, now: Instant) -> Result<Round> {
        let mut round = generate_round(
            &self.config,
            self.difficulty,
            self.previous_round_was_unsolvable,
            self.rounds_played,
            &mut self.rng,
        )?;
        self.rounds_played += 1;
        self.previous_round_was_unsolvable = round.mode() == RoundMode::Unsolvable;
        round.start_clock(now);
        Ok(round)
    }

    pub fn record(&mut self, outcome: MoveOutcome) -> SessionStats {
        self.stats.record(outcome);
        self.stats
    }

    /// Returning to the menu ends the streak.
    pub fn leave(&mut self) -> SessionStats {
        self.stats.reset_streak();
        self.stats
    }
}
