use std::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
    /// Merge results carry no suit.
    Neutral,
}

impl Suit {
    pub const DEALT: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub const fn is_neutral(self) -> bool {
        matches!(self, Self::Neutral)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Point value: ace is 1, court cards continue past ten.
    pub const fn value(self) -> u8 {
        self as u8 + 1
    }

    pub const fn label(self) -> &'static str {
        use Rank::*;
        match self {
            Ace => "A",
            Two => "2",
            Three => "3",
            Four => "4",
            Five => "5",
            Six => "6",
            Seven => "7",
            Eight => "8",
            Nine => "9",
            Ten => "10",
            Jack => "J",
            Queen => "Q",
            King => "K",
        }
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies a card slot for list keying; carries no gameplay meaning.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u64);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    rank: String,
    value: f64,
    suit: Suit,
    is_used: bool,
}

impl Card {
    pub fn dealt(id: CardId, rank: Rank, suit: Suit) -> Self {
        Self {
            id,
            rank: rank.label().into(),
            value: rank.value().into(),
            suit,
            is_used: false,
        }
    }

    /// Replaces the face of this card with a merge result, keeping its id.
    pub(crate) fn merged(&self, result: f64) -> Self {
        Self {
            id: self.id,
            rank: format_result(result),
            value: round_to_cents(result),
            suit: Suit::Neutral,
            is_used: false,
        }
    }

    pub(crate) fn consumed(&self) -> Self {
        Self {
            is_used: true,
            ..self.clone()
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn rank(&self) -> &str {
        &self.rank
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn is_used(&self) -> bool {
        self.is_used
    }

    pub fn is_active(&self) -> bool {
        !self.is_used
    }
}

/// Values of the cards still in play, in slot order.
pub fn active_values(cards: &[Card]) -> Vec<f64> {
    cards
        .iter()
        .filter(|card| card.is_active())
        .map(Card::value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_values_follow_the_deck() {
        assert_eq!(Rank::Ace.value(), 1);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Jack.value(), 11);
        assert_eq!(Rank::King.value(), 13);
        assert_eq!(Rank::from_value(12), Some(Rank::Queen));
        assert_eq!(Rank::from_value(0), None);
        assert_eq!(Rank::from_value(14), None);
    }

    #[test]
    fn merged_card_keeps_id_and_drops_suit() {
        let card = Card::dealt(CardId(7), Rank::Eight, Suit::Hearts);

        let merged = card.merged(8.0 / 3.0);

        assert_eq!(merged.id(), CardId(7));
        assert_eq!(merged.rank(), "2.7");
        assert_eq!(merged.value(), 2.67);
        assert_eq!(merged.suit(), Suit::Neutral);
        assert!(merged.is_active());
    }

    #[test]
    fn active_values_skip_consumed_cards() {
        let cards = [
            Card::dealt(CardId(0), Rank::Ace, Suit::Spades).consumed(),
            Card::dealt(CardId(1), Rank::Queen, Suit::Clubs),
        ];

        assert_eq!(active_values(&cards), vec![12.0]);
    }

    #[test]
    fn ranks_serialize_as_labels() {
        assert_eq!(serde_json::to_string(&Rank::Ten).unwrap(), "\"10\"");
        assert_eq!(serde_json::to_string(&Suit::Neutral).unwrap(), "\"neutral\"");
    }
}
