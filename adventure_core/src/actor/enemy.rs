//! Enemies

use crate::stats::Stats;
use crate::types::{EnemyKind, ItemId};

#[derive(Debug, Clone)]
pub struct Enemy {
    pub name: String,
    pub kind: EnemyKind,
    pub stats: Stats,
    pub health: f64,
    /// Loot handed to the party when the enemy side is cleared
    pub inventory: Vec<ItemId>,
}

impl Enemy {
    pub fn new(name: impl Into<String>, kind: EnemyKind, stats: Stats) -> Self {
        Enemy {
            name: name.into(),
            kind,
            health: stats.max_health.unwrap_or(0.0),
            stats,
            inventory: Vec::new(),
        }
    }

    pub fn attack_power(&self) -> f64 {
        self.stats.attack_power.unwrap_or(0.0)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}
