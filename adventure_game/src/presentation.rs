//! Turning engine events into log lines

use adventure_core::prelude::*;
use adventure_core::Actor;

/// Text for one event. Most events are a single line; the views are several.
pub fn describe(state: &GameState, event: &GameEvent) -> Vec<String> {
    let name = |id: &ActorId| state.name_of(*id).to_string();

    match event {
        GameEvent::EncounterStarted { name, intro } => {
            let mut lines = vec![format!("== {} ==", name)];
            if !intro.is_empty() {
                lines.push(intro.clone());
            }
            lines
        }
        GameEvent::PathBlocked { obstacles } => {
            let names: Vec<String> = obstacles.iter().map(name).collect();
            vec![format!("{} still blocks the way!", names.join(" and "))]
        }
        GameEvent::BattleStarted { roster } => {
            let names: Vec<String> = roster.iter().map(name).collect();
            vec![
                "Battle start!".to_string(),
                format!("Turn order: {}", names.join(", ")),
            ]
        }
        GameEvent::RoundStarted { round } => vec![format!("-- Round {} --", round)],
        GameEvent::TurnStarted { actor } => match state.actor(*actor) {
            Some(Actor::Player(_)) => vec![format!("{}'s turn.", name(actor))],
            _ => Vec::new(),
        },
        GameEvent::TurnSkipped { actor } => vec![format!("{} is incapacitated.", name(actor))],
        GameEvent::Immobilized { actor, .. } => vec![format!("{} is immobilized!", name(actor))],
        GameEvent::BattleConcluded { outcome, rounds } => match outcome {
            BattleOutcome::Victory => vec![format!("Victory after {} rounds!", rounds)],
            BattleOutcome::Defeat => vec!["The party has fallen...".to_string()],
        },
        GameEvent::InteractionStarted => vec![
            "You may now act freely.".to_string(),
            "Select a player, then an action. 'continue' moves on.".to_string(),
        ],
        GameEvent::PlayerSelected { actor } => vec![format!("{} steps forward.", name(actor))],
        GameEvent::InteractionEnded => vec!["Moving on...".to_string()],

        GameEvent::DamageDealt {
            source,
            target,
            amount,
            remaining,
        } => {
            let from = source
                .as_ref()
                .map(name)
                .unwrap_or_else(|| "the environment".to_string());
            vec![format!(
                "{} has taken {} points of damage from {}. Remaining health: {}",
                name(target),
                amount,
                from,
                remaining
            )]
        }
        GameEvent::Dodged { target, .. } => vec![format!("{} has dodged the attack!", name(target))],
        GameEvent::FriendlyFire { source, target } => {
            vec![format!("{} says: What the hell, {}!", name(target), name(source))]
        }
        GameEvent::ActorDefeated {
            actor,
            kind,
            remaining,
        } => match kind {
            ActorKind::Player => vec![format!(
                "{} has been incapacitated! {} party members remaining",
                name(actor),
                remaining
            )],
            ActorKind::Enemy => vec![format!(
                "{} has been defeated! {} enemies remaining",
                name(actor),
                remaining
            )],
            ActorKind::Entity => vec![format!("{} has been broken!", name(actor))],
        },
        GameEvent::PartyWiped => vec!["All party members incapacitated!".to_string()],
        GameEvent::Victory => vec!["All enemies defeated!".to_string()],
        GameEvent::Healed {
            target,
            amount,
            health,
        } => vec![format!(
            "Healed {} HP to {}. Current health: {}",
            amount,
            name(target),
            health
        )],
        GameEvent::Revived { actor, health } => {
            vec![format!("{} gets back up with {} HP.", name(actor), health)]
        }
        GameEvent::Defending { knight } => vec![format!("{} is defending the party!", name(knight))],
        GameEvent::DefendEnded { knight } => vec![format!("{} is no longer defending.", name(knight))],
        GameEvent::Paralyzed {
            source,
            target,
            turns,
        } => vec![format!(
            "{} spews cobwebs! {} can't move for {} turns.",
            name(source),
            name(target),
            turns
        )],
        GameEvent::Purified { cleric } => vec![format!("{} purifies the party!", name(cleric))],

        GameEvent::ItemCollected { item, from } => match from {
            Some(owner) => vec![format!("Picked up {} from {}!", item, name(owner))],
            None => vec![format!("Picked up {}!", item)],
        },
        GameEvent::Equipped { actor, item, .. } => vec![format!(
            "{} equipped to {}!",
            state.item_name(*item),
            name(actor)
        )],
        GameEvent::Unequipped { actor, item, .. } => vec![format!(
            "{} unequipped from {}.",
            state.item_name(*item),
            name(actor)
        )],

        GameEvent::InventoryShown {
            items,
            potions,
            coins,
        } => vec![
            "Shared Inventory:".to_string(),
            format!("  Bag of holding: {}", list_or_empty(items)),
            format!("  Potions: {}", potions),
            format!("  Coins: {}", coins),
        ],
        GameEvent::EquipmentShown { actor, slots } => {
            let mut lines = vec![format!("{}'s Equipment:", name(actor))];
            for (slot, item) in slots {
                let item = item.as_deref().unwrap_or("-");
                lines.push(format!("  {}: {}", capitalize(slot.name()), item));
            }
            lines
        }
        GameEvent::StatsShown { actor, stats } => {
            let mut lines = vec![format!("{}'s Stats:", name(actor))];
            lines.extend(stats.to_string().lines().map(|line| format!("  {}", line)));
            lines
        }

        GameEvent::ActionFailed { error, .. } => vec![error.to_string()],
    }
}

fn list_or_empty(items: &[String]) -> String {
    if items.is_empty() {
        "empty".to_string()
    } else {
        items.join(", ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
