//! Game constants configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConstants {
    /// Health restored by one potion
    #[serde(default = "default_potion_power")]
    pub potion_power: f64,
    /// Lower bound of the dodge draw. Negative, so no attack is a sure hit.
    #[serde(default = "default_dodge_floor")]
    pub dodge_floor: f64,
    /// Chance a Queen Spider paralyzes instead of attacking
    #[serde(default = "default_paralyze_chance")]
    pub paralyze_chance: f64,
    /// Turns a paralyzed player loses
    #[serde(default = "default_paralyze_turns")]
    pub paralyze_turns: u32,
    /// Fraction of max health fallen players get back after a victory
    #[serde(default = "default_revive_fraction")]
    pub revive_fraction: f64,
    /// Triple attack hits for attack power divided by this (truncated)
    #[serde(default = "default_triple_attack_divisor")]
    pub triple_attack_divisor: f64,
}

impl Default for GameConstants {
    fn default() -> Self {
        GameConstants {
            potion_power: default_potion_power(),
            dodge_floor: default_dodge_floor(),
            paralyze_chance: default_paralyze_chance(),
            paralyze_turns: default_paralyze_turns(),
            revive_fraction: default_revive_fraction(),
            triple_attack_divisor: default_triple_attack_divisor(),
        }
    }
}

impl GameConstants {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.potion_power <= 0.0 {
            return Err(ConfigError::ValidationError(
                "potion_power must be positive".to_string(),
            ));
        }
        if self.dodge_floor >= 0.0 {
            return Err(ConfigError::ValidationError(
                "dodge_floor must be negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.paralyze_chance) {
            return Err(ConfigError::ValidationError(
                "paralyze_chance must be within 0..=1".to_string(),
            ));
        }
        if self.revive_fraction <= 0.0 || self.revive_fraction > 1.0 {
            return Err(ConfigError::ValidationError(
                "revive_fraction must be within (0, 1]".to_string(),
            ));
        }
        if self.triple_attack_divisor <= 0.0 {
            return Err(ConfigError::ValidationError(
                "triple_attack_divisor must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_potion_power() -> f64 {
    20.0
}
fn default_dodge_floor() -> f64 {
    -0.75
}
fn default_paralyze_chance() -> f64 {
    0.25
}
fn default_paralyze_turns() -> u32 {
    3
}
fn default_revive_fraction() -> f64 {
    1.0 / 3.0
}
fn default_triple_attack_divisor() -> f64 {
    6.0
}
