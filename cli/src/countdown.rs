use make24_core::{Round, TickOutcome};
use web_time::Instant;

/// Seconds left at or below which every whole second is announced.
const ANNOUNCE_BELOW_SECS: u64 = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    SecondsLeft(u64),
    TimeUp,
}

/// Drives [`Round::tick`] for the terminal and remembers the last whole
/// second seen so each of the final seconds is announced once.
#[derive(Debug)]
pub struct Countdown {
    last_whole_secs: u64,
}

impl Countdown {
    pub fn new(round: &Round) -> Self {
        Self {
            last_whole_secs: round.time_left().as_secs(),
        }
    }

    /// Call after anything that refills the clock (reset, next round).
    pub fn restart(&mut self, round: &Round) {
        self.last_whole_secs = round.time_left().as_secs();
    }

    /// Brings `round` up to `now`. Must run before every command is applied,
    /// otherwise a move typed after the deadline could still land.
    pub fn poll(&mut self, round: &mut Round, now: Instant) -> Option<Notice> {
        let tick = round.tick(now);
        if !tick.has_update() {
            return None;
        }
        if tick == TickOutcome::TimedOut {
            return Some(Notice::TimeUp);
        }

        let whole_secs = round.time_left().as_secs();
        let announce = whole_secs < self.last_whole_secs && whole_secs < ANNOUNCE_BELOW_SECS;
        self.last_whole_secs = whole_secs;
        announce.then_some(Notice::SecondsLeft(whole_secs + 1))
    }
}
