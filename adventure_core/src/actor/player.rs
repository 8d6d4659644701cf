//! Player characters

use crate::equipment::Equipment;
use crate::stats::{round1, StatField, Stats};
use crate::types::{ItemId, PlayerClass};

impl PlayerClass {
    /// Base stats a freshly created member of this class starts with
    pub fn base_stats(&self) -> Stats {
        match self {
            PlayerClass::Archer => Stats::new()
                .with(StatField::MaxHealth, 80.0)
                .with(StatField::AttackPower, 12.0)
                .with(StatField::Speed, 5.0),
            PlayerClass::Knight => Stats::new()
                .with(StatField::MaxHealth, 100.0)
                .with(StatField::AttackPower, 15.0)
                .with(StatField::Speed, 5.0),
            PlayerClass::Cleric => Stats::new()
                .with(StatField::MaxHealth, 60.0)
                .with(StatField::AttackPower, 5.0)
                .with(StatField::Speed, 5.0)
                .with(StatField::HealingPower, 5.0),
        }
    }

    /// Potions this class brings into the shared stash
    pub fn starting_potions(&self) -> u32 {
        match self {
            PlayerClass::Archer => 6,
            PlayerClass::Knight | PlayerClass::Cleric => 1,
        }
    }
}

/// A party member
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub class: PlayerClass,
    pub stats: Stats,
    pub health: f64,
    /// Actions left this turn. Negative while paralyzed.
    pub budget: i32,
    pub equipment: Equipment,
    pub kills: u32,
    pub inventory: Vec<ItemId>,
}

impl Player {
    /// Create a player at full health with the given stats
    pub fn new(name: impl Into<String>, class: PlayerClass, stats: Stats) -> Self {
        Player {
            name: name.into(),
            class,
            health: stats.max_health.unwrap_or(0.0),
            stats,
            budget: 0,
            equipment: Equipment::new(),
            kills: 0,
            inventory: Vec::new(),
        }
    }

    pub fn max_health(&self) -> f64 {
        self.stats.max_health.unwrap_or(0.0)
    }

    pub fn attack_power(&self) -> f64 {
        self.stats.attack_power.unwrap_or(0.0)
    }

    pub fn healing_power(&self) -> f64 {
        self.stats.healing_power.unwrap_or(0.0)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn is_full_health(&self) -> bool {
        self.health >= self.max_health()
    }

    /// Restore health, clamped to max health. Returns whether the player was
    /// brought back from zero or below.
    pub fn heal(&mut self, amount: f64) -> bool {
        let was_down = !self.is_alive();
        self.health = round1((self.health + amount).min(self.max_health()));
        was_down && self.is_alive()
    }

    /// Keep health within max health after a stat change
    pub fn clamp_health(&mut self) {
        if self.health > self.max_health() {
            self.health = self.max_health();
        }
    }

    /// Start-of-turn grant. Returns the budget after the grant.
    pub fn grant_turn(&mut self) -> i32 {
        self.budget += 1;
        self.budget
    }

    pub fn can_act(&self) -> bool {
        self.is_alive() && self.budget >= 1
    }

    pub fn spend_action(&mut self) {
        self.budget -= 1;
    }

    pub fn end_turn(&mut self) {
        self.budget = 0;
    }

    /// Lock the player out for `turns` attempted turns
    pub fn paralyze(&mut self, turns: u32) {
        self.budget = -(turns as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_starts_at_full_health() {
        let player = Player::new("Ayame", PlayerClass::Knight, PlayerClass::Knight.base_stats());
        assert!((player.health - 100.0).abs() < f64::EPSILON);
        assert!(player.is_full_health());
        assert_eq!(player.budget, 0);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut player = Player::new("Yana", PlayerClass::Cleric, PlayerClass::Cleric.base_stats());
        player.health = 50.0;
        assert!(!player.heal(20.0));
        assert!((player.health - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_heal_reports_revival() {
        let mut player = Player::new("Yana", PlayerClass::Cleric, PlayerClass::Cleric.base_stats());
        player.health = -4.0;
        assert!(player.heal(20.0));
        assert!((player.health - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_paralysis_counts_up_with_turns() {
        let mut player = Player::new("Crystia", PlayerClass::Archer, PlayerClass::Archer.base_stats());
        player.paralyze(3);
        assert_eq!(player.grant_turn(), -2);
        assert_eq!(player.grant_turn(), -1);
        assert_eq!(player.grant_turn(), 0);
        assert_eq!(player.grant_turn(), 1);
        assert!(player.can_act());
    }
}
