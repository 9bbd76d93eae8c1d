use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Resolves a level parameter, treating anything unrecognized as medium.
    pub fn from_level(level: Option<&str>) -> Self {
        level
            .and_then(|level| level.parse().ok())
            .unwrap_or_default()
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.id().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultySpec {
    pub label: String,
    pub description: String,
    pub time_limit_secs: u32,
    /// Chance of requesting an unsolvable round once one is allowed.
    pub unsolvable_rate: f64,
}

impl DifficultySpec {
    pub fn new(label: &str, description: &str, time_limit_secs: u32, unsolvable_rate: f64) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            time_limit_secs,
            unsolvable_rate,
        }
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs.into())
    }

    fn builtin(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::new("Easy", "Relaxed focus", 30, 0.05),
            Difficulty::Medium => Self::new("Medium", "Standard flow", 20, 0.12),
            Difficulty::Hard => Self::new("Hard", "Peak performance", 10, 0.2),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub difficulties: BTreeMap<Difficulty, DifficultySpec>,
    pub suits: Vec<Suit>,
    pub ranks: Vec<Rank>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulties: Difficulty::ALL
                .into_iter()
                .map(|difficulty| (difficulty, DifficultySpec::builtin(difficulty)))
                .collect(),
            suits: Suit::DEALT.to_vec(),
            ranks: Rank::ALL.to_vec(),
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> core::result::Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.suits.is_empty() {
            return Err(ConfigError::EmptySuits);
        }
        if self.suits.iter().any(|suit| suit.is_neutral()) {
            return Err(ConfigError::NeutralSuitDealt);
        }
        if self.ranks.is_empty() {
            return Err(ConfigError::EmptyRanks);
        }

        for (&difficulty, spec) in &self.difficulties {
            if spec.time_limit_secs == 0 {
                return Err(ConfigError::InvalidTimeLimit(difficulty));
            }
            if !(0.0..=1.0).contains(&spec.unsolvable_rate) {
                return Err(ConfigError::InvalidUnsolvableRate(difficulty));
            }
        }

        Ok(())
    }

    /// Spec for `difficulty`, falling back to medium and then to the built-in table.
    pub fn difficulty(&self, difficulty: Difficulty) -> DifficultySpec {
        self.difficulties
            .get(&difficulty)
            .or_else(|| self.difficulties.get(&Difficulty::Medium))
            .cloned()
            .unwrap_or_else(|| {
                log::warn!("No spec for {} or medium, using built-in", difficulty);
                DifficultySpec::builtin(difficulty)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_level_falls_back_to_medium() {
        assert_eq!(Difficulty::from_level(Some("hard")), Difficulty::Hard);
        assert_eq!(Difficulty::from_level(Some("HARD")), Difficulty::Hard);
        assert_eq!(Difficulty::from_level(Some("nightmare")), Difficulty::Medium);
        assert_eq!(Difficulty::from_level(None), Difficulty::Medium);
    }

    #[test]
    fn builtin_catalogue_matches_product_tuning() {
        let config = GameConfig::default();

        assert_eq!(config.difficulty(Difficulty::Easy).time_limit(), Duration::from_secs(30));
        assert_eq!(config.difficulty(Difficulty::Hard).unsolvable_rate, 0.2);
        assert_eq!(config.suits.len(), 4);
        assert_eq!(config.ranks.len(), 13);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_difficulty_uses_medium_entry() {
        let json = r#"{
            "difficulties": {
                "medium": { "label": "M", "description": "", "time_limit_secs": 15, "unsolvable_rate": 0.0 }
            },
            "suits": ["hearts"],
            "ranks": ["A", "10", "K"]
        }"#;

        let config = GameConfig::from_json(json).unwrap();

        assert_eq!(config.difficulty(Difficulty::Hard).time_limit_secs, 15);
        assert_eq!(config.ranks, vec![Rank::Ace, Rank::Ten, Rank::King]);
    }

    #[test]
    fn from_json_rejects_invalid_tables() {
        let neutral = r#"{ "difficulties": {}, "suits": ["neutral"], "ranks": ["A"] }"#;
        assert!(matches!(
            GameConfig::from_json(neutral),
            Err(ConfigError::NeutralSuitDealt)
        ));

        let no_ranks = r#"{ "difficulties": {}, "suits": ["clubs"], "ranks": [] }"#;
        assert!(matches!(GameConfig::from_json(no_ranks), Err(ConfigError::EmptyRanks)));

        let rate = r#"{
            "difficulties": {
                "easy": { "label": "E", "description": "", "time_limit_secs": 5, "unsolvable_rate": 1.5 }
            },
            "suits": ["clubs"],
            "ranks": ["A"]
        }"#;
        assert!(matches!(
            GameConfig::from_json(rate),
            Err(ConfigError::InvalidUnsolvableRate(Difficulty::Easy))
        ));

        assert!(matches!(GameConfig::from_json("{"), Err(ConfigError::Json(_))));
    }
}
