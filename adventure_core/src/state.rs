//! GameState - The single context object every engine operation works on
//!
//! Holds the actors, the item registry, the shared inventory, the alive
//! counters and battle flags, and the queue of events waiting to be rendered.

use crate::actor::{Actor, Enemy, Entity, Player};
use crate::config::GameConstants;
use crate::event::GameEvent;
use crate::item::{ItemLocation, ItemRegistry, SharedInventory, WorldItem};
use crate::stats::Stats;
use crate::types::{ActorId, ActorKind, EnemyKind, ItemId, PlayerClass};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct GameState {
    actors: BTreeMap<ActorId, Actor>,
    /// Names stay resolvable after an actor is purged
    names: BTreeMap<ActorId, String>,
    next_actor: u32,
    pub(crate) items: ItemRegistry,
    pub inventory: SharedInventory,

    // Denormalized counts of actors with health above zero
    pub(crate) alive_players: u32,
    pub(crate) alive_enemies: u32,

    pub(crate) party_defeated: bool,
    pub(crate) enemies_cleared: bool,
    pub(crate) in_battle: bool,
    /// A defending knight draws every enemy attack while set
    pub(crate) targeting_override: Option<ActorId>,

    constants: GameConstants,
    events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConstants::default())
    }
}

impl GameState {
    pub fn new(constants: GameConstants) -> Self {
        GameState {
            actors: BTreeMap::new(),
            names: BTreeMap::new(),
            next_actor: 0,
            items: ItemRegistry::new(),
            inventory: SharedInventory::default(),
            alive_players: 0,
            alive_enemies: 0,
            party_defeated: false,
            enemies_cleared: false,
            in_battle: false,
            targeting_override: None,
            constants,
            events: Vec::new(),
        }
    }

    // === Spawning ===

    fn insert_actor(&mut self, actor: Actor) -> ActorId {
        let id = ActorId(self.next_actor);
        self.next_actor += 1;
        self.names.insert(id, actor.name().to_string());
        self.actors.insert(id, actor);
        id
    }

    /// Add a party member with the given stats; their class potions join the stash
    pub fn spawn_player(&mut self, name: impl Into<String>, class: PlayerClass, stats: Stats) -> ActorId {
        let player = Player::new(name, class, stats);
        if player.is_alive() {
            self.alive_players += 1;
        }
        self.inventory.potions += class.starting_potions();
        self.insert_actor(player.into())
    }

    pub fn spawn_enemy(&mut self, name: impl Into<String>, kind: EnemyKind, stats: Stats) -> ActorId {
        let enemy = Enemy::new(name, kind, stats);
        if enemy.is_alive() {
            self.alive_enemies += 1;
        }
        // A fresh enemy side means a fresh fight
        self.enemies_cleared = false;
        self.insert_actor(enemy.into())
    }

    pub fn spawn_entity(&mut self, name: impl Into<String>, durability: f64) -> ActorId {
        self.insert_actor(Entity::new(name, durability).into())
    }

    /// Remove an actor from play
    ///
    /// Carried coins and potions leave the world with it; carried equipment
    /// is dropped on the ground.
    pub fn despawn(&mut self, id: ActorId) -> Option<Actor> {
        let actor = self.actors.remove(&id)?;
        if actor.is_alive() {
            match actor.kind() {
                ActorKind::Player => self.alive_players -= 1,
                ActorKind::Enemy => self.alive_enemies -= 1,
                ActorKind::Entity => {}
            }
        }
        for item in actor.inventory() {
            let is_equip = self
                .items
                .get(*item)
                .is_some_and(|record| record.item.as_equip().is_some());
            if is_equip {
                self.items.set_location(*item, ItemLocation::Ground);
            } else {
                self.items.remove(*item);
            }
        }
        if self.targeting_override == Some(id) {
            self.targeting_override = None;
        }
        Some(actor)
    }

    // === Items ===

    /// Register an item and put it in an actor's lootable inventory
    pub fn give_item(&mut self, owner: ActorId, item: WorldItem) -> Option<ItemId> {
        let actor = self.actors.get_mut(&owner)?;
        let id = self.items.register(item, ItemLocation::Carried(owner));
        actor.inventory_mut().push(id);
        Some(id)
    }

    /// Register an item lying on the ground
    pub fn place_on_ground(&mut self, item: WorldItem) -> ItemId {
        self.items.register(item, ItemLocation::Ground)
    }

    /// Register an item directly in the shared inventory
    pub fn add_to_shared(&mut self, item: WorldItem) -> ItemId {
        self.items.register(item, ItemLocation::Shared)
    }

    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    /// Items in the shared inventory
    pub fn shared_items(&self) -> Vec<ItemId> {
        self.items.at(ItemLocation::Shared)
    }

    pub fn ground_items(&self) -> Vec<ItemId> {
        self.items.at(ItemLocation::Ground)
    }

    pub fn item_name(&self, id: ItemId) -> String {
        self.items.name(id).unwrap_or_else(|| id.to_string())
    }

    // === Actors ===

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn player(&self, id: ActorId) -> Option<&Player> {
        self.actors.get(&id).and_then(Actor::as_player)
    }

    pub fn player_mut(&mut self, id: ActorId) -> Option<&mut Player> {
        self.actors.get_mut(&id).and_then(Actor::as_player_mut)
    }

    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actors.iter().map(|(id, actor)| (*id, actor))
    }

    /// Ids of one kind of actor, in creation order
    pub fn ids_of(&self, kind: ActorKind) -> Vec<ActorId> {
        self.actors
            .iter()
            .filter(|(_, actor)| actor.kind() == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn players(&self) -> Vec<ActorId> {
        self.ids_of(ActorKind::Player)
    }

    pub fn enemies(&self) -> Vec<ActorId> {
        self.ids_of(ActorKind::Enemy)
    }

    pub fn entities(&self) -> Vec<ActorId> {
        self.ids_of(ActorKind::Entity)
    }

    pub fn living_players(&self) -> Vec<ActorId> {
        self.actors
            .iter()
            .filter(|(_, actor)| actor.kind() == ActorKind::Player && actor.is_alive())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Players enemies may currently attack
    ///
    /// A living defender is the only target; otherwise every living player.
    pub fn targetable_players(&self) -> Vec<ActorId> {
        if let Some(knight) = self.targeting_override {
            if self.actor(knight).is_some_and(Actor::is_alive) {
                return vec![knight];
            }
        }
        self.living_players()
    }

    /// Count living actors of a kind by scanning (the counters cache this)
    pub fn count_living(&self, kind: ActorKind) -> u32 {
        self.actors
            .values()
            .filter(|actor| actor.kind() == kind && actor.is_alive())
            .count() as u32
    }

    /// Display name for an id, including purged actors
    pub fn name_of(&self, id: ActorId) -> &str {
        self.names.get(&id).map(String::as_str).unwrap_or("someone")
    }

    /// Case-insensitive actor lookup for the presentation layer
    pub fn find_actor(&self, name: &str) -> Option<ActorId> {
        let name = name.trim();
        self.actors
            .iter()
            .find(|(_, actor)| actor.name().eq_ignore_ascii_case(name))
            .map(|(id, _)| *id)
    }

    /// Case-insensitive item lookup for the presentation layer
    pub fn find_item(&self, name: &str) -> Option<ItemId> {
        self.items.find_by_name(name)
    }

    // === Flags ===

    pub fn alive_players(&self) -> u32 {
        self.alive_players
    }

    pub fn alive_enemies(&self) -> u32 {
        self.alive_enemies
    }

    pub fn is_party_defeated(&self) -> bool {
        self.party_defeated
    }

    pub fn are_enemies_cleared(&self) -> bool {
        self.enemies_cleared
    }

    /// Either side has been wiped out
    pub fn is_concluded(&self) -> bool {
        self.party_defeated || self.enemies_cleared
    }

    pub fn in_battle(&self) -> bool {
        self.in_battle
    }

    pub fn targeting_override(&self) -> Option<ActorId> {
        self.targeting_override
    }

    pub fn constants(&self) -> &GameConstants {
        &self.constants
    }

    // === Events ===

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events not yet handed to the presentation layer
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
