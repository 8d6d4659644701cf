//! Command - The abstract command surface consumed by the engine
//!
//! Targets are already resolved to ids; turning typed names into ids is the
//! front end's job.

use crate::types::{ActorId, EquipSlot, ItemId};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Attack(ActorId),
    /// Use a potion on a player
    Heal(ActorId),
    ShowInventory,
    ShowEquipment(ActorId),
    ShowStats(ActorId),
    PickUp(ItemId),
    Loot(ActorId),
    /// Equip an item from the shared inventory; `target` defaults to the actor
    Equip {
        item: ItemId,
        target: Option<ActorId>,
    },
    Unequip {
        slot: EquipSlot,
        target: Option<ActorId>,
    },
    /// Knight only
    Defend,
    /// Archer only
    TripleAttack([ActorId; 3]),
    /// Cleric only
    Purify,
    ChangePlayer,
    Continue,
    /// Anything the front end could not recognize
    Unknown(String),
}

/// What a resolved command costs the acting player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCost {
    /// One action-budget unit
    Active,
    /// Free; the player may act again
    Passive,
    /// Spends whatever budget is left
    Drain,
    /// Ends the player's turn
    EndTurn,
    /// Ends the player's turn and the interaction phase
    EndPhase,
}

impl Command {
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Attack(_) => "attack",
            Command::Heal(_) => "heal",
            Command::ShowInventory => "inventory",
            Command::ShowEquipment(_) => "equipment",
            Command::ShowStats(_) => "stats",
            Command::PickUp(_) => "pick up",
            Command::Loot(_) => "loot",
            Command::Equip { .. } => "equip",
            Command::Unequip { .. } => "unequip",
            Command::Defend => "defend",
            Command::TripleAttack(_) => "triple",
            Command::Purify => "purify",
            Command::ChangePlayer => "change",
            Command::Continue => "continue",
            Command::Unknown(_) => "unknown",
        }
    }
}
