use make24_core::{CardIndex, HAND_SIZE, Operator};

pub const HELP: &str = "\
1-4      tap a card
+ - x /  pick an operator
u        undo the last merge
r        reset the hand and the clock
c        check: claim the hand can't make 24
n        next round (once this one is over)
q        quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Tap(CardIndex),
    Operator(Operator),
    Undo,
    Reset,
    Check,
    Next,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if let Ok(slot) = line.parse::<usize>() {
            return (1..=HAND_SIZE).contains(&slot).then(|| Self::Tap(slot - 1));
        }
        if let Ok(operator) = line.parse() {
            return Some(Self::Operator(operator));
        }

        Some(match line.to_ascii_lowercase().as_str() {
            "u" | "undo" => Self::Undo,
            "r" | "reset" => Self::Reset,
            "c" | "check" => Self::Check,
            "n" | "next" => Self::Next,
            "h" | "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_one_based() {
        assert_eq!(Command::parse("1"), Some(Command::Tap(0)));
        assert_eq!(Command::parse(" 4 "), Some(Command::Tap(3)));
        assert_eq!(Command::parse("0"), None);
        assert_eq!(Command::parse("5"), None);
    }

    #[test]
    fn operators_and_words() {
        assert_eq!(Command::parse("x"), Some(Command::Operator(Operator::Multiply)));
        assert_eq!(Command::parse("-"), Some(Command::Operator(Operator::Subtract)));
        assert_eq!(Command::parse("Check"), Some(Command::Check));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("flip"), None);
    }
}
