//! Looting and picking up - moving world items into the party's possession

use crate::error::ActionError;
use crate::event::GameEvent;
use crate::item::{ItemLocation, WorldItem};
use crate::state::GameState;
use crate::types::{ActorId, ItemId};
use tracing::debug;

impl GameState {
    /// Take one registered item into the party's possession
    ///
    /// Collectibles bump the currency counters and leave the registry;
    /// equipment moves to the shared inventory.
    fn collect(&mut self, item: ItemId, from: Option<ActorId>) {
        let Some(record) = self.items.get(item) else {
            return;
        };
        let name = record.item.name();
        match record.item.clone() {
            WorldItem::Collectible(collectible) => {
                self.inventory.collect(collectible);
                self.items.remove(item);
            }
            WorldItem::Equip(_) => self.items.set_location(item, ItemLocation::Shared),
        }
        self.emit(GameEvent::ItemCollected { item: name, from });
    }

    /// Move everything an actor carries into the party's possession
    pub(crate) fn transfer_inventory(&mut self, owner: ActorId) -> usize {
        let items = match self.actor_mut(owner) {
            Some(actor) => std::mem::take(actor.inventory_mut()),
            None => return 0,
        };
        for item in &items {
            self.collect(*item, Some(owner));
        }
        items.len()
    }

    /// Loot a defeated enemy or a broken entity
    pub fn loot(&mut self, target: ActorId) -> Result<usize, ActionError> {
        let actor = self
            .actor(target)
            .ok_or_else(|| ActionError::UnknownTarget(self.name_of(target).to_string()))?;
        if !actor.is_lootable() || actor.is_alive() {
            return Err(ActionError::NotLootable(actor.name().to_string()));
        }

        let count = self.transfer_inventory(target);
        debug!(target = %self.name_of(target), count, "looted");
        Ok(count)
    }

    /// Pick up an item lying on the ground
    pub fn pick_up(&mut self, item: ItemId) -> Result<(), ActionError> {
        let name = self.item_name(item);
        if self.items.location(item) != Some(ItemLocation::Ground) {
            return Err(ActionError::NotPickable(name));
        }
        self.collect(item, None);
        debug!(item = %name, "picked up");
        Ok(())
    }
}
