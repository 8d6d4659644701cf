//! Core identifiers and tags shared across the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an actor (player, enemy or entity) inside a `GameState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Identifier of a registered world item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Equipment slot for gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    Weapon,
    Armor,
    Amulet,
}

impl EquipSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipSlot] {
        &[EquipSlot::Weapon, EquipSlot::Armor, EquipSlot::Amulet]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Weapon => "weapon",
            EquipSlot::Armor => "armor",
            EquipSlot::Amulet => "amulet",
        }
    }

    /// Parse a slot from user text ("weapon", "Armor", ...)
    pub fn from_name(name: &str) -> Option<EquipSlot> {
        EquipSlot::all()
            .iter()
            .copied()
            .find(|slot| slot.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Player class tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerClass {
    Archer,
    Knight,
    Cleric,
}

impl PlayerClass {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerClass::Archer => "Archer",
            PlayerClass::Knight => "Knight",
            PlayerClass::Cleric => "Cleric",
        }
    }
}

impl fmt::Display for PlayerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which classes may wear an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassRestriction {
    Archer,
    Knight,
    Cleric,
    #[default]
    Any,
}

impl ClassRestriction {
    /// Check whether a player of `class` may wear the item
    pub fn allows(&self, class: PlayerClass) -> bool {
        match self {
            ClassRestriction::Any => true,
            ClassRestriction::Archer => class == PlayerClass::Archer,
            ClassRestriction::Knight => class == PlayerClass::Knight,
            ClassRestriction::Cleric => class == PlayerClass::Cleric,
        }
    }
}

impl fmt::Display for ClassRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassRestriction::Archer => f.write_str("Archer"),
            ClassRestriction::Knight => f.write_str("Knight"),
            ClassRestriction::Cleric => f.write_str("Cleric"),
            ClassRestriction::Any => f.write_str("Player"),
        }
    }
}

/// Enemy behavior variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    #[default]
    Plain,
    /// Spews cobwebs that paralyze a player instead of attacking
    QueenSpider,
}

/// Role of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Player,
    Enemy,
    Entity,
}
