//! Integration test: world config -> encounters -> battle -> interaction
//!
//! Actor ids are handed out in spawn order (party first, then each
//! encounter's enemies and obstacles), which lets a script name targets
//! before the world exists.

use adventure_core::config::parse_world;
use adventure_core::item::ItemLocation;
use adventure_core::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const VASE_WORLD: &str = r#"
[[party]]
name = "Ayame"
class = "knight"

[[items]]
name = "Pendant of Valor"
slot = "amulet"
class = "knight"
upgrades = { attack_power = 1.5 }

[[encounters]]
name = "Cellar"
intro = "A rat and a vase block the way!"
blocking = ["Ornamented Vase"]

[[encounters.enemies]]
name = "Rat"
stats = { max_health = 10, attack_power = 1, speed = 0 }
loot = { items = ["Pendant of Valor"] }

[[encounters.obstacles]]
name = "Ornamented Vase"
durability = 10
loot = { coins = 10, potions = 2 }
"#;

#[test]
fn test_campaign_waits_for_blocking_obstacle() {
    let world = parse_world(VASE_WORLD).unwrap();
    let mut state = GameState::from_world(&world).unwrap();
    let knight = ActorId(0);
    let rat = ActorId(1);
    let vase = ActorId(2);

    let mut controller = ScriptedController::with_commands([
        // Battle
        Command::Attack(rat),
        // First interaction: leave too early
        Command::Continue,
        // Second interaction: break the vase, loot it, move on
        Command::Attack(vase),
        Command::Loot(vase),
        Command::Continue,
    ]);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let outcome = run_campaign(&mut state, &world, &mut controller, &mut rng).unwrap();

    assert_eq!(outcome, CampaignOutcome::Completed);
    assert_eq!(controller.count(|e| matches!(e, GameEvent::PathBlocked { .. })), 1);
    assert_eq!(controller.count(|e| *e == GameEvent::InteractionStarted), 2);
    assert_eq!(state.inventory.coins, 10);
    assert_eq!(state.inventory.potions, 1 + 2);
    assert_eq!(state.player(knight).unwrap().kills, 1);
    // The pendant came off the rat when the enemy side was cleared
    let pendant = state.find_item("Pendant of Valor").unwrap();
    assert_eq!(state.shared_items(), vec![pendant]);
    // Obstacles are left behind with the area
    assert!(state.entities().is_empty());
}

#[test]
fn test_unlooted_equipment_outlives_its_obstacle() {
    let world = parse_world(
        r#"
[[party]]
name = "Ayame"
class = "knight"

[[items]]
name = "Pendant of Valor"
slot = "amulet"

[[encounters]]
name = "Storeroom"

[[encounters.enemies]]
name = "Rat"
stats = { max_health = 10, attack_power = 1, speed = 0 }

[[encounters.obstacles]]
name = "Crate"
durability = 10
loot = { items = ["Pendant of Valor"], coins = 5 }
"#,
    )
    .unwrap();
    let mut state = GameState::from_world(&world).unwrap();
    let rat = ActorId(1);
    let mut controller = ScriptedController::with_commands([Command::Attack(rat), Command::Continue]);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let outcome = run_campaign(&mut state, &world, &mut controller, &mut rng).unwrap();

    assert_eq!(outcome, CampaignOutcome::Completed);
    assert!(state.entities().is_empty());
    // The crate was never opened: its coins are gone, the pendant is left lying there
    assert_eq!(state.inventory.coins, 0);
    let pendant = state.find_item("Pendant of Valor").unwrap();
    assert_eq!(state.items().location(pendant), Some(ItemLocation::Ground));
}

#[test]
fn test_campaign_reports_defeat() {
    let world = parse_world(
        r#"
[[party]]
name = "Yana"
class = "cleric"

[[encounters]]
name = "Nest"

[[encounters.enemies]]
name = "Queen Spider"
kind = "queen_spider"
stats = { max_health = 1000, attack_power = 500, speed = 1 }
"#,
    )
    .unwrap();
    let mut state = GameState::from_world(&world).unwrap();
    let mut controller = ScriptedController::new();
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    let outcome = run_campaign(&mut state, &world, &mut controller, &mut rng).unwrap();

    assert_eq!(
        outcome,
        CampaignOutcome::Defeated {
            encounter: "Nest".to_string()
        }
    );
    assert!(state.is_party_defeated());
    assert_eq!(controller.count(|e| *e == GameEvent::PartyWiped), 1);
}

#[test]
fn test_default_world_builds_a_full_party() {
    let world = default_world().unwrap();
    let state = GameState::from_world(&world).unwrap();

    let yana = state.find_actor("yana").unwrap();
    let cleric = state.player(yana).unwrap();
    assert_eq!(cleric.class, PlayerClass::Cleric);
    // Crown of Life doubles healing power
    assert!((cleric.healing_power() - 10.0).abs() < 1e-9);
    for id in state.players() {
        let player = state.player(id).unwrap();
        assert!(player.is_full_health());
    }
}
