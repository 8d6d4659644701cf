//! Campaign - A world's encounters played in order
//!
//! Each encounter spawns its enemies, obstacles and loose items, runs a
//! battle and then interaction phases until every blocking obstacle is broken.

use crate::battle::{run_battle, BattleOutcome};
use crate::config::{ConfigError, EncounterConfig, LootConfig, WorldConfig};
use crate::controller::{flush, Controller};
use crate::event::GameEvent;
use crate::interaction::run_interaction;
use crate::item::{Collectible, EquipItem, WorldItem};
use crate::state::GameState;
use crate::types::ActorId;
use rand::Rng;
use tracing::info;

/// How a campaign ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignOutcome {
    /// Every encounter was won and its path cleared
    Completed,
    Defeated { encounter: String },
}

impl GameState {
    /// Build the starting state for a world: the party, already wearing
    /// their kits, and the constants
    pub fn from_world(world: &WorldConfig) -> Result<Self, ConfigError> {
        world.validate()?;
        let mut state = GameState::new(world.constants.clone());

        for member in &world.party {
            let id = state.spawn_player(&member.name, member.class, member.base_stats());
            for name in &member.kit {
                let item = catalog_item(world, name)?;
                state.equip_starting(id, item);
            }
            if let Some(player) = state.player_mut(id) {
                player.health = player.max_health();
            }
        }
        Ok(state)
    }

    /// Put an encounter's enemies, obstacles and ground items into the world
    ///
    /// Returns the obstacles that block the way onward.
    pub fn spawn_encounter(
        &mut self,
        world: &WorldConfig,
        encounter: &EncounterConfig,
    ) -> Result<Vec<ActorId>, ConfigError> {
        for enemy in &encounter.enemies {
            let id = self.spawn_enemy(&enemy.name, enemy.kind, enemy.stats);
            self.stock(id, world, &enemy.loot)?;
        }

        let mut blockers = Vec::new();
        for obstacle in &encounter.obstacles {
            let id = self.spawn_entity(&obstacle.name, obstacle.durability);
            self.stock(id, world, &obstacle.loot)?;
            if encounter.blocking.contains(&obstacle.name) {
                blockers.push(id);
            }
        }

        for name in &encounter.ground {
            let item = catalog_item(world, name)?;
            self.place_on_ground(WorldItem::Equip(item));
        }

        self.emit(GameEvent::EncounterStarted {
            name: encounter.name.clone(),
            intro: encounter.intro.clone(),
        });
        Ok(blockers)
    }

    fn stock(&mut self, owner: ActorId, world: &WorldConfig, loot: &LootConfig) -> Result<(), ConfigError> {
        for name in &loot.items {
            let item = catalog_item(world, name)?;
            self.give_item(owner, WorldItem::Equip(item));
        }
        if loot.coins > 0 {
            self.give_item(owner, WorldItem::Collectible(Collectible::coins(loot.coins)));
        }
        if loot.potions > 0 {
            self.give_item(owner, WorldItem::Collectible(Collectible::potions(loot.potions)));
        }
        Ok(())
    }
}

fn catalog_item(world: &WorldConfig, name: &str) -> Result<EquipItem, ConfigError> {
    world
        .item(name)
        .cloned()
        .ok_or_else(|| ConfigError::ValidationError(format!("unknown item '{}'", name)))
}

/// Play every encounter of the world in order
pub fn run_campaign(
    state: &mut GameState,
    world: &WorldConfig,
    controller: &mut impl Controller,
    rng: &mut impl Rng,
) -> Result<CampaignOutcome, ConfigError> {
    for encounter in &world.encounters {
        info!(encounter = %encounter.name, "encounter started");
        let blockers = state.spawn_encounter(world, encounter)?;
        flush(state, controller);

        if run_battle(state, controller, rng) == BattleOutcome::Defeat {
            info!(encounter = %encounter.name, "party defeated");
            return Ok(CampaignOutcome::Defeated {
                encounter: encounter.name.clone(),
            });
        }

        loop {
            run_interaction(state, controller, rng);
            if state.living_players().is_empty() {
                return Ok(CampaignOutcome::Defeated {
                    encounter: encounter.name.clone(),
                });
            }

            let standing: Vec<ActorId> = blockers
                .iter()
                .copied()
                .filter(|id| state.actor(*id).is_some_and(|actor| actor.is_alive()))
                .collect();
            if standing.is_empty() {
                break;
            }
            state.emit(GameEvent::PathBlocked { obstacles: standing });
            flush(state, controller);
        }

        // Leaving the area: its obstacles stay behind
        for entity in state.entities() {
            state.despawn(entity);
        }
    }

    info!("campaign completed");
    Ok(CampaignOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_world, parse_world};
    use crate::item::ItemLocation;
    use crate::types::EquipSlot;

    #[test]
    fn test_from_default_world_wears_kits() {
        let world = default_world().unwrap();
        let state = GameState::from_world(&world).unwrap();

        let knight = state.find_actor("Ayame").unwrap();
        let player = state.player(knight).unwrap();
        assert!(player.equipment.get(EquipSlot::Weapon).is_some());
        assert!(player.equipment.get(EquipSlot::Armor).is_some());
        assert!(player.is_full_health());
        assert_eq!(state.alive_players(), 3);
        assert_eq!(state.inventory.potions, 8);
        assert!(state.shared_items().is_empty());
    }

    #[test]
    fn test_spawn_encounter_stocks_loot() {
        let world = parse_world(
            r#"
[[party]]
name = "Ayame"
class = "knight"

[[items]]
name = "Pendant of Valor"
slot = "amulet"

[[items]]
name = "Crown of Life"
slot = "amulet"
class = "cleric"

[[encounters]]
name = "Lair"
blocking = ["Ornamented Vase"]
ground = ["Crown of Life"]

[[encounters.enemies]]
name = "Queen Spider"
kind = "queen_spider"
stats = { max_health = 100, attack_power = 50, speed = 5 }
loot = { items = ["Pendant of Valor"] }

[[encounters.obstacles]]
name = "Ornamented Vase"
durability = 20
loot = { coins = 10, potions = 2 }
"#,
        )
        .unwrap();
        let mut state = GameState::from_world(&world).unwrap();

        let blockers = state.spawn_encounter(&world, &world.encounters[0]).unwrap();
        let vase = state.find_actor("Ornamented Vase").unwrap();
        let queen = state.find_actor("Queen Spider").unwrap();

        assert_eq!(blockers, vec![vase]);
        assert_eq!(state.actor(vase).unwrap().inventory().len(), 2);
        assert_eq!(state.actor(queen).unwrap().inventory().len(), 1);
        let crown = state.find_item("crown of life").unwrap();
        assert_eq!(state.items().location(crown), Some(ItemLocation::Ground));
        assert_eq!(state.alive_enemies(), 1);
    }
}
