//! World items - equipment and collectibles, and where each one currently is

use crate::stats::Modifier;
use crate::types::{ActorId, ClassRestriction, EquipSlot, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An equippable item. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipItem {
    pub name: String,
    pub slot: EquipSlot,
    /// Which class may wear it
    #[serde(default, rename = "class")]
    pub allowed: ClassRestriction,
    /// Multiplicative factors applied while worn
    #[serde(default)]
    pub upgrades: Modifier,
}

impl EquipItem {
    pub fn new(
        name: impl Into<String>,
        slot: EquipSlot,
        allowed: ClassRestriction,
        upgrades: Modifier,
    ) -> Self {
        EquipItem {
            name: name.into(),
            slot,
            allowed,
            upgrades,
        }
    }
}

/// Kind of currency-like pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleKind {
    Coins,
    Potions,
}

/// A stack of coins or potions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub amount: u32,
}

impl Collectible {
    pub fn coins(amount: u32) -> Self {
        Collectible {
            kind: CollectibleKind::Coins,
            amount,
        }
    }

    pub fn potions(amount: u32) -> Self {
        Collectible {
            kind: CollectibleKind::Potions,
            amount,
        }
    }
}

impl fmt::Display for Collectible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CollectibleKind::Coins => write!(f, "{} Coins", self.amount),
            CollectibleKind::Potions => write!(f, "{} Potions", self.amount),
        }
    }
}

/// Anything that can lie on the ground or sit in an inventory
#[derive(Debug, Clone, PartialEq)]
pub enum WorldItem {
    Equip(EquipItem),
    Collectible(Collectible),
}

impl WorldItem {
    pub fn name(&self) -> String {
        match self {
            WorldItem::Equip(item) => item.name.clone(),
            WorldItem::Collectible(collectible) => collectible.to_string(),
        }
    }

    pub fn as_equip(&self) -> Option<&EquipItem> {
        match self {
            WorldItem::Equip(item) => Some(item),
            WorldItem::Collectible(_) => None,
        }
    }
}

/// Where a registered item currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLocation {
    /// Lying around, can be picked up
    Ground,
    /// In an actor's lootable inventory
    Carried(ActorId),
    /// In the party's shared inventory
    Shared,
    /// Worn by a player
    Equipped(ActorId, EquipSlot),
}

/// A registered item and its location
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub item: WorldItem,
    pub location: ItemLocation,
}

/// Registry of every item still present in the world
///
/// Collected coins and potions are removed; everything else stays registered
/// for the whole session.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    records: BTreeMap<ItemId, ItemRecord>,
    next_id: u32,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item at a location, returning its id
    pub fn register(&mut self, item: WorldItem, location: ItemLocation) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.records.insert(id, ItemRecord { item, location });
        id
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemRecord> {
        self.records.get(&id)
    }

    pub fn location(&self, id: ItemId) -> Option<ItemLocation> {
        self.records.get(&id).map(|record| record.location)
    }

    pub fn set_location(&mut self, id: ItemId, location: ItemLocation) {
        if let Some(record) = self.records.get_mut(&id) {
            record.location = location;
        }
    }

    pub fn equip_item(&self, id: ItemId) -> Option<&EquipItem> {
        self.records.get(&id).and_then(|record| record.item.as_equip())
    }

    pub fn name(&self, id: ItemId) -> Option<String> {
        self.records.get(&id).map(|record| record.item.name())
    }

    pub fn remove(&mut self, id: ItemId) -> Option<ItemRecord> {
        self.records.remove(&id)
    }

    /// Case-insensitive lookup by display name
    pub fn find_by_name(&self, name: &str) -> Option<ItemId> {
        let name = name.trim();
        self.records
            .iter()
            .find(|(_, record)| record.item.name().eq_ignore_ascii_case(name))
            .map(|(id, _)| *id)
    }

    /// Ids of items at a location, in registration order
    pub fn at(&self, location: ItemLocation) -> Vec<ItemId> {
        self.records
            .iter()
            .filter(|(_, record)| record.location == location)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &ItemRecord)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Party-wide currency counters
///
/// The shared item pool itself is every registry item at
/// [`ItemLocation::Shared`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedInventory {
    pub potions: u32,
    pub coins: u32,
}

impl SharedInventory {
    /// Add a collectible stack to the counters
    pub fn collect(&mut self, collectible: Collectible) {
        match collectible.kind {
            CollectibleKind::Coins => self.coins += collectible.amount,
            CollectibleKind::Potions => self.potions += collectible.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatField;

    fn bow() -> WorldItem {
        WorldItem::Equip(EquipItem::new(
            "Simple Bow",
            EquipSlot::Weapon,
            ClassRestriction::Archer,
            Modifier::new().with(StatField::Speed, 1.3),
        ))
    }

    #[test]
    fn test_collectible_names() {
        assert_eq!(Collectible::coins(10).to_string(), "10 Coins");
        assert_eq!(Collectible::potions(2).to_string(), "2 Potions");
    }

    #[test]
    fn test_registry_lookup_and_location() {
        let mut registry = ItemRegistry::new();
        let id = registry.register(bow(), ItemLocation::Ground);
        assert_eq!(registry.find_by_name("simple bow"), Some(id));
        assert_eq!(registry.at(ItemLocation::Ground), vec![id]);

        registry.set_location(id, ItemLocation::Shared);
        assert!(registry.at(ItemLocation::Ground).is_empty());
        assert_eq!(registry.location(id), Some(ItemLocation::Shared));
    }

    #[test]
    fn test_shared_inventory_collect() {
        let mut inventory = SharedInventory::default();
        inventory.collect(Collectible::coins(10));
        inventory.collect(Collectible::potions(2));
        inventory.collect(Collectible::coins(5));
        assert_eq!(inventory.coins, 15);
        assert_eq!(inventory.potions, 2);
    }
}
