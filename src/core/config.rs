//! Game configuration.
//!
//! Rules constants live here rather than in the rules code:
//! - `StartingArmies`: army budget per headcount at setup
//! - `ConquestTransfer`: how many armies follow a successful attack
//! - dice caps, reinforcement floor and divisor, battle log capacity
//!
//! Configurations load from JSON; missing fields fall back to the
//! classic values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Army budget handed to each player at setup, keyed by headcount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingArmies {
    /// Budget per player in a two-player game.
    pub two_players: u32,
    /// Budget per player in a three-player game.
    pub three_players: u32,
    /// Budget per player for any other headcount.
    pub otherwise: u32,
}

impl Default for StartingArmies {
    fn default() -> Self {
        Self {
            two_players: 40,
            three_players: 35,
            otherwise: 30,
        }
    }
}

impl StartingArmies {
    /// Budget for a game with `headcount` in-play players.
    #[must_use]
    pub fn for_headcount(&self, headcount: usize) -> u32 {
        match headcount {
            2 => self.two_players,
            3 => self.three_players,
            _ => self.otherwise,
        }
    }
}

/// Number of armies moved into a conquered territory.
///
/// Either rule is clamped so the source keeps at least one army.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConquestTransfer {
    /// Move as many armies as the attacker rolled dice.
    #[default]
    DiceCount,
    /// Move half of the source's surviving armies, at least one.
    HalfSource,
}

/// Complete rules configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Setup budget per headcount.
    pub starting_armies: StartingArmies,

    /// Armies placed on every territory before the budget remainder.
    pub armies_per_initial_territory: u32,

    /// Reinforcement floor.
    pub min_reinforcements: u32,

    /// Owned territories per reinforcement army.
    pub reinforcement_divisor: u32,

    /// Most dice an attacker may roll.
    pub max_attacker_dice: u32,

    /// Most dice a defender may roll.
    pub max_defender_dice: u32,

    /// Post-conquest army movement.
    pub conquest_transfer: ConquestTransfer,

    /// Battle log entries kept before the oldest are dropped.
    pub log_capacity: usize,

    /// Roster size upper bound (active and inactive seats).
    pub max_players: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_armies: StartingArmies::default(),
            armies_per_initial_territory: 3,
            min_reinforcements: 3,
            reinforcement_divisor: 3,
            max_attacker_dice: 3,
            max_defender_dice: 2,
            conquest_transfer: ConquestTransfer::DiceCount,
            log_capacity: 8,
            max_players: 6,
        }
    }
}

/// Invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse game config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        min: u64,
        value: u64,
    },
    #[error("max_players must be between 2 and 255, got {0}")]
    PlayerBound(usize),
}

impl GameConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every constant keeps the rules well-defined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let at_least_one = [
            ("armies_per_initial_territory", u64::from(self.armies_per_initial_territory)),
            ("min_reinforcements", u64::from(self.min_reinforcements)),
            ("reinforcement_divisor", u64::from(self.reinforcement_divisor)),
            ("max_attacker_dice", u64::from(self.max_attacker_dice)),
            ("max_defender_dice", u64::from(self.max_defender_dice)),
            ("log_capacity", self.log_capacity as u64),
        ];
        for (field, value) in at_least_one {
            if value < 1 {
                return Err(ConfigError::TooSmall { field, min: 1, value });
            }
        }
        if !(2..=255).contains(&self.max_players) {
            return Err(ConfigError::PlayerBound(self.max_players));
        }
        Ok(())
    }

    /// Set the conquest transfer rule.
    #[must_use]
    pub fn with_conquest_transfer(mut self, rule: ConquestTransfer) -> Self {
        self.conquest_transfer = rule;
        self
    }

    /// Set the battle log capacity.
    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// Set the setup budgets.
    #[must_use]
    pub fn with_starting_armies(mut self, armies: StartingArmies) -> Self {
        self.starting_armies = armies;
        self
    }

    /// Set the roster size upper bound.
    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_armies_by_headcount() {
        let armies = StartingArmies::default();
        assert_eq!(armies.for_headcount(2), 40);
        assert_eq!(armies.for_headcount(3), 35);
        assert_eq!(armies.for_headcount(4), 30);
        assert_eq!(armies.for_headcount(6), 30);
    }

    #[test]
    fn test_default_validates() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = GameConfig::from_json_str(
            r#"{ "log_capacity": 5, "conquest_transfer": "half_source" }"#,
        )
        .unwrap();

        assert_eq!(config.log_capacity, 5);
        assert_eq!(config.conquest_transfer, ConquestTransfer::HalfSource);
        assert_eq!(config.min_reinforcements, 3);
        assert_eq!(config.starting_armies.two_players, 40);
    }

    #[test]
    fn test_from_json_rejects_zero_divisor() {
        let err = GameConfig::from_json_str(r#"{ "reinforcement_divisor": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TooSmall { field: "reinforcement_divisor", .. }
        ));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            GameConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_player_bound() {
        let config = GameConfig::default().with_max_players(1);
        assert!(matches!(config.validate(), Err(ConfigError::PlayerBound(1))));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = GameConfig::default()
            .with_conquest_transfer(ConquestTransfer::HalfSource)
            .with_log_capacity(12);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
