//! Equipment - What each player wears, and moving gear in and out of slots
//!
//! An item is either in the shared inventory or in exactly one slot of one
//! player. Equipping applies the item's upgrades to the wearer's stats;
//! unequipping reverts them.

use crate::error::ActionError;
use crate::event::GameEvent;
use crate::item::{EquipItem, ItemLocation, WorldItem};
use crate::state::GameState;
use crate::types::{ActorId, EquipSlot, ItemId};
use std::collections::BTreeMap;
use tracing::debug;

/// Slot -> item worn by one player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Equipment {
    slots: BTreeMap<EquipSlot, ItemId>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<ItemId> {
        self.slots.get(&slot).copied()
    }

    /// Put an item in a slot, returning the previous occupant
    pub(crate) fn insert(&mut self, slot: EquipSlot, item: ItemId) -> Option<ItemId> {
        self.slots.insert(slot, item)
    }

    pub(crate) fn take(&mut self, slot: EquipSlot) -> Option<ItemId> {
        self.slots.remove(&slot)
    }

    /// Every slot with its occupant, in slot order
    pub fn iter(&self) -> impl Iterator<Item = (EquipSlot, Option<ItemId>)> + '_ {
        EquipSlot::all().iter().map(|slot| (*slot, self.get(*slot)))
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.slots.values().any(|worn| *worn == item)
    }
}

impl GameState {
    /// Equip an item from the shared inventory onto a player
    pub fn equip(&mut self, actor: ActorId, item: ItemId) -> Result<(), ActionError> {
        let item_name = self.item_name(item);
        let player = self
            .player(actor)
            .ok_or_else(|| ActionError::UnknownTarget(self.name_of(actor).to_string()))?;
        let equip = self
            .items
            .equip_item(item)
            .cloned()
            .ok_or_else(|| ActionError::NotAvailable(item_name.clone()))?;

        if !equip.allowed.allows(player.class) {
            return Err(ActionError::WrongClass {
                item: equip.name,
                class: equip.allowed.to_string(),
            });
        }
        if self.items.location(item) != Some(ItemLocation::Shared) {
            return Err(ActionError::NotAvailable(item_name));
        }

        if self
            .player(actor)
            .and_then(|p| p.equipment.get(equip.slot))
            .is_some()
        {
            self.unequip(actor, equip.slot)?;
        }

        self.wear(actor, item, &equip);
        self.emit(GameEvent::Equipped {
            actor,
            item,
            slot: equip.slot,
        });
        debug!(actor = %self.name_of(actor), item = %equip.name, "equipped");
        Ok(())
    }

    /// Take off whatever is in a slot and return it to the shared inventory
    pub fn unequip(&mut self, actor: ActorId, slot: EquipSlot) -> Result<ItemId, ActionError> {
        let name = self.name_of(actor).to_string();
        let player = self
            .player_mut(actor)
            .ok_or_else(|| ActionError::UnknownTarget(name))?;
        let item = player
            .equipment
            .take(slot)
            .ok_or_else(|| ActionError::EmptySlot(slot.to_string()))?;

        if let Some(equip) = self.items.equip_item(item).cloned() {
            if let Some(player) = self.player_mut(actor) {
                player.stats.revert_modifier(&equip.upgrades);
                player.clamp_health();
            }
        }
        self.items.set_location(item, ItemLocation::Shared);
        self.emit(GameEvent::Unequipped { actor, item, slot });
        debug!(actor = %self.name_of(actor), item = %self.item_name(item), "unequipped");
        Ok(item)
    }

    /// Register a piece of starting gear as already worn
    ///
    /// Never passes through the shared inventory. The class check is the
    /// caller's concern (world validation covers it).
    pub fn equip_starting(&mut self, actor: ActorId, equip: EquipItem) -> Option<ItemId> {
        let slot = equip.slot;
        self.player(actor)?;
        let item = self
            .items
            .register(WorldItem::Equip(equip.clone()), ItemLocation::Equipped(actor, slot));
        if self.player(actor).and_then(|p| p.equipment.get(slot)).is_some() {
            self.unequip(actor, slot).ok()?;
        }
        self.wear(actor, item, &equip);
        Some(item)
    }

    fn wear(&mut self, actor: ActorId, item: ItemId, equip: &EquipItem) {
        if let Some(player) = self.player_mut(actor) {
            player.equipment.insert(equip.slot, item);
            player.stats.apply_modifier(&equip.upgrades);
            player.clamp_health();
        }
        self.items
            .set_location(item, ItemLocation::Equipped(actor, equip.slot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Modifier, StatField};
    use crate::types::{ClassRestriction, PlayerClass};
    use proptest::prelude::*;

    fn long_bow() -> EquipItem {
        EquipItem::new(
            "Long Bow",
            EquipSlot::Weapon,
            ClassRestriction::Archer,
            Modifier::new()
                .with(StatField::AttackPower, 2.0)
                .with(StatField::Speed, 0.8),
        )
    }

    fn simple_bow() -> EquipItem {
        EquipItem::new(
            "Simple Bow",
            EquipSlot::Weapon,
            ClassRestriction::Archer,
            Modifier::new().with(StatField::Speed, 1.3),
        )
    }

    fn curiass() -> EquipItem {
        EquipItem::new(
            "Curiass",
            EquipSlot::Armor,
            ClassRestriction::Any,
            Modifier::new()
                .with(StatField::MaxHealth, 1.2)
                .with(StatField::Speed, 0.65),
        )
    }

    fn archer_state() -> (GameState, ActorId) {
        let mut state = GameState::default();
        let archer = state.spawn_player("Crystia", PlayerClass::Archer, PlayerClass::Archer.base_stats());
        (state, archer)
    }

    #[test]
    fn test_equip_from_shared_applies_upgrades() {
        let (mut state, archer) = archer_state();
        let bow = state.add_to_shared(WorldItem::Equip(long_bow()));

        state.equip(archer, bow).unwrap();

        let player = state.player(archer).unwrap();
        assert_eq!(player.equipment.get(EquipSlot::Weapon), Some(bow));
        assert!((player.attack_power() - 24.0).abs() < 1e-9);
        assert!((player.stats.speed.unwrap() - 4.0).abs() < 1e-9);
        assert_eq!(
            state.items().location(bow),
            Some(ItemLocation::Equipped(archer, EquipSlot::Weapon))
        );
        assert!(state.shared_items().is_empty());
    }

    #[test]
    fn test_equip_swaps_out_current_occupant() {
        let (mut state, archer) = archer_state();
        let simple = state.equip_starting(archer, simple_bow()).unwrap();
        let long = state.add_to_shared(WorldItem::Equip(long_bow()));

        state.equip(archer, long).unwrap();

        assert_eq!(state.shared_items(), vec![simple]);
        let player = state.player(archer).unwrap();
        assert_eq!(player.equipment.get(EquipSlot::Weapon), Some(long));
        // 5 * 1.3 = 6.5, / 1.3 = 5.0, * 0.8 = 4.0
        assert!((player.stats.speed.unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_equip_wrong_class() {
        let mut state = GameState::default();
        let knight = state.spawn_player("Ayame", PlayerClass::Knight, PlayerClass::Knight.base_stats());
        let bow = state.add_to_shared(WorldItem::Equip(long_bow()));

        let err = state.equip(knight, bow).unwrap_err();
        assert!(matches!(err, ActionError::WrongClass { .. }));
        assert_eq!(state.shared_items(), vec![bow]);
    }

    #[test]
    fn test_equip_not_in_shared_inventory() {
        let (mut state, archer) = archer_state();
        let bow = state.place_on_ground(WorldItem::Equip(long_bow()));
        assert!(matches!(
            state.equip(archer, bow),
            Err(ActionError::NotAvailable(_))
        ));
    }

    #[test]
    fn test_unequip_empty_slot() {
        let (mut state, archer) = archer_state();
        assert!(matches!(
            state.unequip(archer, EquipSlot::Amulet),
            Err(ActionError::EmptySlot(_))
        ));
    }

    #[test]
    fn test_equip_lowering_max_health_clamps_health() {
        let mut state = GameState::default();
        let knight = state.spawn_player("Ayame", PlayerClass::Knight, PlayerClass::Knight.base_stats());
        let cursed = state.add_to_shared(WorldItem::Equip(EquipItem::new(
            "Cursed Amulet",
            EquipSlot::Amulet,
            ClassRestriction::Any,
            Modifier::new().with(StatField::MaxHealth, 0.8),
        )));
        assert!(state.player(knight).unwrap().is_full_health());

        state.equip(knight, cursed).unwrap();

        let player = state.player(knight).unwrap();
        assert!((player.max_health() - 80.0).abs() < 1e-9);
        assert!((player.health - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_unequip_clamps_health() {
        let (mut state, archer) = archer_state();
        let armor = state.equip_starting(archer, curiass()).unwrap();
        assert!((state.player(archer).unwrap().max_health() - 96.0).abs() < 1e-9);
        state.player_mut(archer).unwrap().health = 96.0;

        assert_eq!(state.unequip(archer, EquipSlot::Armor).unwrap(), armor);

        let player = state.player(archer).unwrap();
        assert!((player.max_health() - 80.0).abs() < 1e-9);
        assert!((player.health - 80.0).abs() < 1e-9);
        assert_eq!(state.shared_items(), vec![armor]);
    }

    proptest! {
        #[test]
        fn prop_items_are_shared_xor_equipped(ops in proptest::collection::vec((0usize..2, 0usize..3), 1..40)) {
            let mut state = GameState::default();
            let players = [
                state.spawn_player("Crystia", PlayerClass::Archer, PlayerClass::Archer.base_stats()),
                state.spawn_player("Ayame", PlayerClass::Knight, PlayerClass::Knight.base_stats()),
            ];
            let items = [
                state.add_to_shared(WorldItem::Equip(long_bow())),
                state.add_to_shared(WorldItem::Equip(simple_bow())),
                state.add_to_shared(WorldItem::Equip(curiass())),
            ];

            for (who, what) in ops {
                let actor = players[who];
                let item = items[what];
                if state.items().location(item) == Some(ItemLocation::Shared) {
                    let _ = state.equip(actor, item);
                } else if let Some(ItemLocation::Equipped(owner, slot)) = state.items().location(item) {
                    let _ = state.unequip(owner, slot);
                }

                for item in items {
                    let shared = state.shared_items().contains(&item);
                    let wearers = players
                        .iter()
                        .filter(|p| state.player(**p).unwrap().equipment.contains(item))
                        .count();
                    prop_assert!(wearers <= 1);
                    prop_assert!(shared != (wearers == 1));
                }
            }
        }
    }
}
