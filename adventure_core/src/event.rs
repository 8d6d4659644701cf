//! GameEvent - Everything the engine reports to the presentation layer
//!
//! Events carry ids, not text. Names for ids (including purged enemies) are
//! resolved with `GameState::name_of`.

use crate::battle::BattleOutcome;
use crate::error::ActionError;
use crate::stats::Stats;
use crate::types::{ActorId, ActorKind, EquipSlot, ItemId};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    // === Flow ===
    EncounterStarted {
        name: String,
        intro: String,
    },
    /// Obstacles still standing in the way after a won battle
    PathBlocked {
        obstacles: Vec<ActorId>,
    },
    BattleStarted {
        roster: Vec<ActorId>,
    },
    RoundStarted {
        round: u32,
    },
    TurnStarted {
        actor: ActorId,
    },
    /// The actor is down and loses its turn
    TurnSkipped {
        actor: ActorId,
    },
    /// Paralyzed; `turns_left` more turns will be skipped after this one
    Immobilized {
        actor: ActorId,
        turns_left: u32,
    },
    BattleConcluded {
        outcome: BattleOutcome,
        rounds: u32,
    },
    InteractionStarted,
    PlayerSelected {
        actor: ActorId,
    },
    InteractionEnded,

    // === Combat ===
    DamageDealt {
        source: Option<ActorId>,
        target: ActorId,
        amount: f64,
        remaining: f64,
    },
    Dodged {
        source: Option<ActorId>,
        target: ActorId,
    },
    FriendlyFire {
        source: ActorId,
        target: ActorId,
    },
    /// Health reached zero. For entities this means broken.
    ActorDefeated {
        actor: ActorId,
        kind: ActorKind,
        /// Members of the same side still standing
        remaining: u32,
    },
    PartyWiped,
    Victory,
    Healed {
        target: ActorId,
        amount: f64,
        health: f64,
    },
    Revived {
        actor: ActorId,
        health: f64,
    },
    Defending {
        knight: ActorId,
    },
    DefendEnded {
        knight: ActorId,
    },
    Paralyzed {
        source: ActorId,
        target: ActorId,
        turns: u32,
    },
    Purified {
        cleric: ActorId,
    },

    // === Items ===
    ItemCollected {
        item: String,
        from: Option<ActorId>,
    },
    Equipped {
        actor: ActorId,
        item: ItemId,
        slot: EquipSlot,
    },
    Unequipped {
        actor: ActorId,
        item: ItemId,
        slot: EquipSlot,
    },

    // === Views ===
    InventoryShown {
        items: Vec<String>,
        potions: u32,
        coins: u32,
    },
    EquipmentShown {
        actor: ActorId,
        slots: Vec<(EquipSlot, Option<String>)>,
    },
    StatsShown {
        actor: ActorId,
        stats: Stats,
    },

    // === Failures ===
    ActionFailed {
        actor: Option<ActorId>,
        error: ActionError,
    },
}

impl GameEvent {
    /// Whether the event changed any health value
    pub fn is_damage(&self) -> bool {
        matches!(self, GameEvent::DamageDealt { .. })
    }
}
