use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Number every round tries to reach.
pub const TARGET: f64 = 24.0;

/// Absolute tolerance when comparing a result against [`TARGET`].
pub const TARGET_TOLERANCE: f64 = 0.001;

/// Divisors at or below this magnitude are treated as zero by the solver.
pub const DIVISOR_TOLERANCE: f64 = 0.0001;

/// Slots in a hand, dealt or merged.
pub const HAND_SIZE: usize = 4;

/// Position of a card within the hand, `0..HAND_SIZE`.
pub type CardIndex = usize;

pub fn hits_target(value: f64) -> bool {
    (value - TARGET).abs() < TARGET_TOLERANCE
}

/// Rounds to two decimal places, the precision merge results are stored with.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Label for a merge result: whole numbers print bare, anything else with one decimal.
pub fn format_result(value: f64) -> String {
    if value.fract() == 0.0 {
        // avoid printing "-0"
        let value = if value == 0.0 { 0.0 } else { value };
        format!("{value}")
    } else {
        format!("{:.1}", round_tie_away_from_zero(value))
    }
}

/// `{:.1}` breaks exact ties towards the even digit; labels break them away
/// from zero. Only multiples of 0.25 with an odd quarter count can tie, and
/// scaling by 4 is exact, so nearby values such as 0.35 are left alone.
fn round_tie_away_from_zero(value: f64) -> f64 {
    let quarters = value.abs() * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        value.signum() * (value.abs() * 10.0).ceil() / 10.0
    } else {
        value
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Search order used by the solver.
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Returns `None` when dividing by zero; `zero_tolerance` is the largest
    /// divisor magnitude still considered zero.
    pub fn apply(self, lhs: f64, rhs: f64, zero_tolerance: f64) -> Option<f64> {
        match self {
            Self::Add => Some(lhs + rhs),
            Self::Subtract => Some(lhs - rhs),
            Self::Multiply => Some(lhs * rhs),
            Self::Divide if rhs.abs() > zero_tolerance => Some(lhs / rhs),
            Self::Divide => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "+" => Ok(Self::Add),
            "-" | "−" => Ok(Self::Subtract),
            "x" | "X" | "*" | "×" => Ok(Self::Multiply),
            "/" | "÷" => Ok(Self::Divide),
            _ => Err(GameError::UnknownOperator),
        }
    }
}
