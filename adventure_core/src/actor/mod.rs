//! Actors - players, enemies and entities sharing one health life-cycle

mod enemy;
mod entity;
mod player;

pub use enemy::Enemy;
pub use entity::Entity;
pub use player::Player;

use crate::stats::{round1, Stats};
use crate::types::{ActorKind, ItemId};

/// Anything that takes part in combat accounting
#[derive(Debug, Clone)]
pub enum Actor {
    Player(Player),
    Enemy(Enemy),
    Entity(Entity),
}

impl Actor {
    pub fn kind(&self) -> ActorKind {
        match self {
            Actor::Player(_) => ActorKind::Player,
            Actor::Enemy(_) => ActorKind::Enemy,
            Actor::Entity(_) => ActorKind::Entity,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Actor::Player(p) => &p.name,
            Actor::Enemy(e) => &e.name,
            Actor::Entity(e) => &e.name,
        }
    }

    pub fn health(&self) -> f64 {
        match self {
            Actor::Player(p) => p.health,
            Actor::Enemy(e) => e.health,
            Actor::Entity(e) => e.health,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health() > 0.0
    }

    /// Stats record; entities have none
    pub fn stats(&self) -> Option<&Stats> {
        match self {
            Actor::Player(p) => Some(&p.stats),
            Actor::Enemy(e) => Some(&e.stats),
            Actor::Entity(_) => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        self.stats().and_then(|stats| stats.speed)
    }

    pub fn inventory(&self) -> &[ItemId] {
        match self {
            Actor::Player(p) => &p.inventory,
            Actor::Enemy(e) => &e.inventory,
            Actor::Entity(e) => &e.inventory,
        }
    }

    pub fn inventory_mut(&mut self) -> &mut Vec<ItemId> {
        match self {
            Actor::Player(p) => &mut p.inventory,
            Actor::Enemy(e) => &mut e.inventory,
            Actor::Entity(e) => &mut e.inventory,
        }
    }

    /// Enemies and entities can be looted once down; players cannot
    pub fn is_lootable(&self) -> bool {
        !matches!(self, Actor::Player(_))
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Actor::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match self {
            Actor::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_enemy(&self) -> Option<&Enemy> {
        match self {
            Actor::Enemy(e) => Some(e),
            _ => None,
        }
    }

    /// Subtract damage from health, rounded to one decimal
    ///
    /// Returns true when this hit took the actor from alive to down.
    pub fn apply_hit(&mut self, amount: f64) -> bool {
        let was_alive = self.is_alive();
        let health = match self {
            Actor::Player(p) => &mut p.health,
            Actor::Enemy(e) => &mut e.health,
            Actor::Entity(e) => &mut e.health,
        };
        *health = round1(*health - amount);
        was_alive && *health <= 0.0
    }
}

impl From<Player> for Actor {
    fn from(player: Player) -> Self {
        Actor::Player(player)
    }
}

impl From<Enemy> for Actor {
    fn from(enemy: Enemy) -> Self {
        Actor::Enemy(enemy)
    }
}

impl From<Entity> for Actor {
    fn from(entity: Entity) -> Self {
        Actor::Entity(entity)
    }
}
