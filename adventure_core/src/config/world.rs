//! World configuration - party, item catalog and encounters

use super::{ConfigError, GameConstants};
use crate::item::EquipItem;
use crate::stats::{StatField, Stats};
use crate::types::{EnemyKind, PlayerClass};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Complete description of an adventure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub constants: GameConstants,
    pub party: Vec<PartyMemberConfig>,
    /// Every equippable item in the world, referenced by name elsewhere
    #[serde(default)]
    pub items: Vec<EquipItem>,
    #[serde(default)]
    pub encounters: Vec<EncounterConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyMemberConfig {
    pub name: String,
    pub class: PlayerClass,
    /// Items worn from the start
    #[serde(default)]
    pub kit: Vec<String>,
    /// Overrides the class base stats
    #[serde(default)]
    pub stats: Option<Stats>,
}

impl PartyMemberConfig {
    pub fn base_stats(&self) -> Stats {
        self.stats.unwrap_or_else(|| self.class.base_stats())
    }
}

/// Items and currency an enemy or obstacle carries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LootConfig {
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub coins: u32,
    #[serde(default)]
    pub potions: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub name: String,
    #[serde(default)]
    pub kind: EnemyKind,
    #[serde(default = "default_enemy_stats")]
    pub stats: Stats,
    #[serde(default)]
    pub loot: LootConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleConfig {
    pub name: String,
    pub durability: f64,
    #[serde(default)]
    pub loot: LootConfig,
}

/// One battle and what surrounds it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterConfig {
    pub name: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub enemies: Vec<EnemyConfig>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleConfig>,
    /// Items lying around, free to pick up
    #[serde(default)]
    pub ground: Vec<String>,
    /// Obstacles that must be broken before the party can move on
    #[serde(default)]
    pub blocking: Vec<String>,
}

fn default_enemy_stats() -> Stats {
    Stats::new()
        .with(StatField::MaxHealth, 1.0)
        .with(StatField::AttackPower, 1.0)
        .with(StatField::Speed, 1.0)
}

impl WorldConfig {
    /// Look up a catalog item by name
    pub fn item(&self, name: &str) -> Option<&EquipItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Check cross references and uniqueness rules
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.constants.validate()?;

        if self.party.is_empty() {
            return Err(invalid("the party needs at least one member"));
        }

        let mut catalog = HashSet::new();
        for item in &self.items {
            if !catalog.insert(item.name.to_lowercase()) {
                return Err(invalid(format!("duplicate item '{}'", item.name)));
            }
        }

        let check_item = |item: &str, owner: &str| -> Result<(), ConfigError> {
            if self.item(item).is_none() {
                return Err(invalid(format!("'{}' references unknown item '{}'", owner, item)));
            }
            Ok(())
        };

        // Party names are in play for the whole campaign
        let mut party_names = HashSet::new();
        for member in &self.party {
            claim_name(&mut party_names, &member.name)?;
            if member.base_stats().max_health.unwrap_or(0.0) <= 0.0 {
                return Err(invalid(format!("'{}' needs a positive max_health", member.name)));
            }
            let mut slots = HashSet::new();
            for name in &member.kit {
                check_item(name, &member.name)?;
                if let Some(item) = self.item(name) {
                    if !item.allowed.allows(member.class) {
                        return Err(invalid(format!(
                            "'{}' cannot wear '{}' (only {})",
                            member.name, item.name, item.allowed
                        )));
                    }
                    if !slots.insert(item.slot) {
                        return Err(invalid(format!(
                            "'{}' has two items for the {} slot",
                            member.name, item.slot
                        )));
                    }
                }
            }
        }

        // An encounter's actors are gone before the next one spawns
        for encounter in &self.encounters {
            let mut names = party_names.clone();
            for enemy in &encounter.enemies {
                claim_name(&mut names, &enemy.name)?;
                if enemy.stats.max_health.unwrap_or(0.0) <= 0.0 {
                    return Err(invalid(format!("'{}' needs a positive max_health", enemy.name)));
                }
                for name in &enemy.loot.items {
                    check_item(name, &enemy.name)?;
                }
            }
            for obstacle in &encounter.obstacles {
                claim_name(&mut names, &obstacle.name)?;
                if obstacle.durability <= 0.0 {
                    return Err(invalid(format!("'{}' needs a positive durability", obstacle.name)));
                }
                for name in &obstacle.loot.items {
                    check_item(name, &obstacle.name)?;
                }
            }
            for name in &encounter.ground {
                check_item(name, &encounter.name)?;
            }
            for name in &encounter.blocking {
                if !encounter.obstacles.iter().any(|o| &o.name == name) {
                    return Err(invalid(format!(
                        "encounter '{}' is blocked by undeclared obstacle '{}'",
                        encounter.name, name
                    )));
                }
            }
        }

        // Each catalog item exists exactly once, so it may only be placed once
        let mut placed: HashMap<&str, &str> = HashMap::new();
        for (item, owner) in self.placements() {
            if let Some(previous) = placed.insert(item, owner) {
                return Err(invalid(format!(
                    "item '{}' is placed twice ('{}' and '{}')",
                    item, previous, owner
                )));
            }
        }

        Ok(())
    }

    /// Every (item, owner) placement in the world
    fn placements(&self) -> Vec<(&str, &str)> {
        let mut placements = Vec::new();
        for member in &self.party {
            for item in &member.kit {
                placements.push((item.as_str(), member.name.as_str()));
            }
        }
        for encounter in &self.encounters {
            for enemy in &encounter.enemies {
                for item in &enemy.loot.items {
                    placements.push((item.as_str(), enemy.name.as_str()));
                }
            }
            for obstacle in &encounter.obstacles {
                for item in &obstacle.loot.items {
                    placements.push((item.as_str(), obstacle.name.as_str()));
                }
            }
            for item in &encounter.ground {
                placements.push((item.as_str(), encounter.name.as_str()));
            }
        }
        placements
    }
}

/// Actor names are looked up case-insensitively, so they must differ that way
fn claim_name(names: &mut HashSet<String>, name: &str) -> Result<(), ConfigError> {
    if names.insert(name.to_lowercase()) {
        Ok(())
    } else {
        Err(invalid(format!("duplicate actor name '{}'", name)))
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

/// Load and validate a world from a TOML file
pub fn load_world(path: &Path) -> Result<WorldConfig, ConfigError> {
    let world: WorldConfig = super::load_toml(path)?;
    world.validate()?;
    Ok(world)
}

/// Parse and validate a world from a TOML string
pub fn parse_world(content: &str) -> Result<WorldConfig, ConfigError> {
    let world: WorldConfig = super::parse_toml(content)?;
    world.validate()?;
    Ok(world)
}

/// The bundled adventure
pub fn default_world() -> Result<WorldConfig, ConfigError> {
    parse_world(include_str!("../../config/world.toml"))
}
