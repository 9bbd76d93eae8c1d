use make24_core::{Card, Round, RoundState, SessionStats, Suit};

fn suit_symbol(suit: Suit) -> &'static str {
    match suit {
        Suit::Spades => "♠",
        Suit::Hearts => "♥",
        Suit::Diamonds => "♦",
        Suit::Clubs => "♣",
        Suit::Neutral => "",
    }
}

fn card(card: &Card, selected: bool) -> String {
    if card.is_used() {
        // keep the slot so the other cards don't shift
        return " ".repeat(9);
    }
    let face = format!("{}{}", card.rank(), suit_symbol(card.suit()));
    if selected {
        format!(">{face:^7}<")
    } else {
        format!("[{face:^7}]")
    }
}

pub fn hand(round: &Round) -> String {
    round
        .cards()
        .iter()
        .enumerate()
        .map(|(index, c)| format!("{} {}", index + 1, card(c, round.selected() == Some(index))))
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn status(round: &Round, stats: SessionStats) -> String {
    let mut line = format!(
        "{:>5.1}s  streak {}  best {}",
        round.time_left().as_secs_f64(),
        stats.streak,
        stats.best_streak
    );
    if let Some(operator) = round.operator() {
        line.push_str(&format!("  op {operator}"));
    }
    if let Some(expression) = round.expression() {
        line.push_str(&format!("  | {expression}"));
    }
    line
}

pub fn verdict(round: &Round, stats: SessionStats) -> Option<String> {
    match round.state() {
        RoundState::Playing => None,
        RoundState::Won => Some(format!("TARGET REACHED. Streak: {}", stats.streak)),
        RoundState::Lost => Some(match round.hint() {
            Some(hint) => format!("ROUND FAILED. Solution found: {hint}"),
            None => "ROUND FAILED.".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use make24_core::{CardId, Operator, Rank, RoundMode};
    use web_time::Duration;

    fn round() -> Round {
        let cards = [
            Card::dealt(CardId(1), Rank::Eight, Suit::Spades),
            Card::dealt(CardId(2), Rank::Three, Suit::Hearts),
            Card::dealt(CardId(3), Rank::Ten, Suit::Diamonds),
            Card::dealt(CardId(4), Rank::Ace, Suit::Clubs),
        ];
        Round::new(cards, Duration::from_secs(20), RoundMode::Solvable)
    }

    #[test]
    fn hand_marks_selection_and_blanks_used_slots() {
        let mut round = round();
        round.tap_card(0);
        round.tap_operator(Operator::Multiply);
        round.tap_card(1);

        let text = hand(&round);

        assert!(text.starts_with(&format!("1 {}  2 >  24   <", " ".repeat(9))), "{text}");
        assert!(text.contains("[  10♦  ]"), "{text}");
    }

    #[test]
    fn status_shows_last_merge() {
        let mut round = round();
        round.tap_card(0);
        round.tap_operator(Operator::Multiply);
        round.tap_card(1);

        let text = status(&round, SessionStats::default());

        assert!(text.ends_with("| 8 × 3 = 24"), "{text}");
        assert!(text.contains("streak 0"), "{text}");
    }

    #[test]
    fn verdict_only_for_finished_rounds() {
        let mut round = round();
        assert_eq!(verdict(&round, SessionStats::default()), None);

        round.check();
        let text = verdict(&round, SessionStats::default()).unwrap();
        assert!(text.starts_with("ROUND FAILED. Solution found: "), "{text}");
    }
}
