//! Entities - breakable, lootable obstacles that never act

use crate::types::ItemId;

#[derive(Debug, Clone)]
pub struct Entity {
    pub name: String,
    /// Durability; the entity is broken at zero or below
    pub health: f64,
    pub inventory: Vec<ItemId>,
}

impl Entity {
    pub fn new(name: impl Into<String>, durability: f64) -> Self {
        Entity {
            name: name.into(),
            health: durability,
            inventory: Vec::new(),
        }
    }

    pub fn is_broken(&self) -> bool {
        self.health <= 0.0
    }
}
