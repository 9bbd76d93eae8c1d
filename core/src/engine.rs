use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use crate::*;

/// How often callers are expected to poll [`Round::tick`].
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
///
/// Only [`Round::reset`] brings a finished round back to `Playing`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    Playing,
    Won,
    Lost,
}

impl RoundState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::Playing
    }
}

/// One attempt at a dealt hand, from the deal until it is won or lost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    initial_cards: [Card; HAND_SIZE],
    cards: [Card; HAND_SIZE],
    history: Vec<[Card; HAND_SIZE]>,
    time_limit: Duration,
    time_left: Duration,
    /// Wall-clock end of the countdown, only set while playing. Not persisted,
    /// a restored round re-arms from `time_left` on its next tick.
    #[serde(skip)]
    deadline: Option<Instant>,
    state: RoundState,
    selected: Option<CardIndex>,
    operator: Option<Operator>,
    expression: Option<String>,
    hint: Option<String>,
    mode: RoundMode,
}

impl Round {
    pub fn new(cards: [Card; HAND_SIZE], time_limit: Duration, mode: RoundMode) -> Self {
        Self {
            initial_cards: cards.clone(),
            cards,
            history: Vec::new(),
            time_limit,
            time_left: time_limit,
            deadline: None,
            state: Default::default(),
            selected: None,
            operator: None,
            expression: None,
            hint: None,
            mode,
        }
    }

    pub fn from_hand(hand: DealtHand, time_limit: Duration) -> Self {
        Self::new(hand.cards, time_limit, hand.mode)
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn mode(&self) -> RoundMode {
        self.mode
    }

    pub fn cards(&self) -> &[Card; HAND_SIZE] {
        &self.cards
    }

    pub fn initial_cards(&self) -> &[Card; HAND_SIZE] {
        &self.initial_cards
    }

    pub fn card_at(&self, index: CardIndex) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn active_values(&self) -> Vec<f64> {
        active_values(&self.cards)
    }

    pub fn active_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_active()).count()
    }

    pub fn can_undo(&self) -> bool {
        self.state.is_playing() && !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn selected(&self) -> Option<CardIndex> {
        self.selected
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    /// Text of the most recent merge, such as `8 × 3 = 24`.
    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    pub fn time_left(&self) -> Duration {
        self.time_left
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Arms the countdown at `now + time_left`. Ticks arm it lazily otherwise.
    pub fn start_clock(&mut self, now: Instant) {
        if self.state.is_playing() {
            self.deadline = Some(now + self.time_left);
        }
    }

    pub fn tap_card(&mut self, index: CardIndex) -> MoveOutcome {
        use MoveOutcome::*;

        if !self.state.is_playing() {
            log::debug!("Ignoring tap on card {} after the round ended", index);
            return NoChange;
        }

        match self.cards.get(index) {
            Some(card) if card.is_active() => {}
            Some(_) => return NoChange,
            None => {
                log::debug!("Ignoring tap on card {} outside the hand", index);
                return NoChange;
            }
        }

        match (self.selected, self.operator) {
            (Some(selected), _) if selected == index => {
                self.selected = None;
                self.operator = None;
                Changed
            }
            (Some(selected), Some(operator)) => self.merge(selected, index, operator),
            _ => {
                self.selected = Some(index);
                Changed
            }
        }
    }

    pub fn tap_operator(&mut self, operator: Operator) -> MoveOutcome {
        if !self.state.is_playing() || self.selected.is_none() {
            return MoveOutcome::NoChange;
        }

        if self.operator.replace(operator) == Some(operator) {
            MoveOutcome::NoChange
        } else {
            MoveOutcome::Changed
        }
    }

    /// Solves what is left of the hand. A solution means the player missed it and
    /// becomes the hint; none means they correctly called a dead end.
    pub fn check(&mut self) -> MoveOutcome {
        if !self.state.is_playing() {
            return MoveOutcome::NoChange;
        }

        match solve(&self.active_values()) {
            Some(solution) => {
                log::debug!("Check found {}", solution);
                self.hint = Some(solution);
                self.end_round(false)
            }
            None => self.end_round(true),
        }
    }

    pub fn undo(&mut self) -> MoveOutcome {
        if !self.state.is_playing() {
            return MoveOutcome::NoChange;
        }

        let Some(previous) = self.history.pop() else {
            return MoveOutcome::NoChange;
        };
        self.cards = previous;
        self.clear_selection();
        MoveOutcome::Changed
    }

    /// Restores the dealt hand and restarts the countdown from `now`.
    pub fn reset(&mut self, now: Instant) -> MoveOutcome {
        self.cards = self.initial_cards.clone();
        self.history.clear();
        self.clear_selection();
        self.hint = None;
        self.state = RoundState::Playing;
        self.time_left = self.time_limit;
        self.deadline = Some(now + self.time_limit);
        MoveOutcome::Changed
    }

    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if !self.state.is_playing() {
            return TickOutcome::Idle;
        }

        let deadline = *self.deadline.get_or_insert(now + self.time_left);
        let remaining = deadline.saturating_duration_since(now);
        if !remaining.is_zero() {
            self.time_left = remaining;
            return TickOutcome::Counting;
        }

        self.hint = solve(&self.active_values());
        self.time_left = Duration::ZERO;
        log::debug!("Round timed out, hint: {:?}", self.hint);
        self.end_round(false);
        TickOutcome::TimedOut
    }

    fn merge(&mut self, lhs: CardIndex, rhs: CardIndex, operator: Operator) -> MoveOutcome {
        let lhs_value = self.cards[lhs].value();
        let rhs_value = self.cards[rhs].value();

        // merges only refuse an exact zero divisor
        let Some(result) = operator.apply(lhs_value, rhs_value, 0.0) else {
            log::debug!("Refusing to divide {} by zero", lhs_value);
            return MoveOutcome::NoChange;
        };

        self.history.push(self.cards.clone());
        self.cards[lhs] = self.cards[lhs].consumed();
        self.cards[rhs] = self.cards[rhs].merged(result);
        self.selected = Some(rhs);
        self.operator = None;

        let expression = format!(
            "{} {} {} = {}",
            lhs_value,
            operator,
            rhs_value,
            self.cards[rhs].rank()
        );
        log::debug!("Merged {}", expression);
        self.expression = Some(expression);

        let mut active = self.cards.iter().filter(|card| card.is_active());
        match (active.next(), active.next()) {
            (Some(last), None) => {
                let won = hits_target(last.value());
                self.end_round(won)
            }
            _ => MoveOutcome::Merged,
        }
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.operator = None;
        self.expression = None;
    }

    fn end_round(&mut self, won: bool) -> MoveOutcome {
        if self.state.is_finished() {
            return MoveOutcome::NoChange;
        }

        self.deadline = None;
        if won {
            self.state = RoundState::Won;
            MoveOutcome::Won
        } else {
            self.state = RoundState::Lost;
            MoveOutcome::Lost
        }
    }
}
