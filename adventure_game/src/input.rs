//! Typed command parsing
//!
//! Resolves names to ids against the current state. Unknown names are
//! reported right here and never reach the engine; unknown verbs become
//! `Command::Unknown` so the engine reports them.

use adventure_core::prelude::*;

/// One line of player input
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(Command),
    Help,
}

pub const HELP: &[&str] = &[
    "attack <name>              hit an enemy, obstacle or (ouch) a friend",
    "heal <name>                use a potion on a player",
    "inventory                  show the shared inventory",
    "equipment <name>           show what a player is wearing",
    "stats <name>               show a player's or enemy's stats",
    "pick up <item>             take an item lying on the ground",
    "loot <name>                search a defeated enemy or broken obstacle",
    "equip <item> [to <name>]   wear an item from the shared inventory",
    "unequip <slot> [from <name>]",
    "defend                     (Knight) draw the next enemy attack",
    "triple <a>, <b>, <c>       (Archer) three weaker shots",
    "purify                     (Cleric) heal the whole party",
    "change                     pick another player",
    "continue                   end the turn, or move on",
];

/// Parse one typed line
pub fn parse_command(line: &str, state: &GameState) -> Result<Input, ActionError> {
    let line = line.trim();

    let command = match line.to_ascii_lowercase().as_str() {
        "help" | "?" => return Ok(Input::Help),
        "inventory" => Command::ShowInventory,
        "defend" => Command::Defend,
        "purify" => Command::Purify,
        "change" => Command::ChangePlayer,
        "continue" => Command::Continue,
        _ => parse_targeted(line, state)?,
    };
    Ok(Input::Command(command))
}

fn parse_targeted(line: &str, state: &GameState) -> Result<Command, ActionError> {
    if let Some(rest) = strip_verb(line, "pick up") {
        let item = state
            .find_item(rest)
            .ok_or_else(|| ActionError::NotPickable(rest.to_string()))?;
        return Ok(Command::PickUp(item));
    }
    if let Some(rest) = strip_verb(line, "attack") {
        return Ok(Command::Attack(actor(state, rest)?));
    }
    if let Some(rest) = strip_verb(line, "heal") {
        return Ok(Command::Heal(actor(state, rest)?));
    }
    if let Some(rest) = strip_verb(line, "equipment") {
        return Ok(Command::ShowEquipment(actor(state, rest)?));
    }
    if let Some(rest) = strip_verb(line, "stats") {
        return Ok(Command::ShowStats(actor(state, rest)?));
    }
    if let Some(rest) = strip_verb(line, "loot") {
        return Ok(Command::Loot(actor(state, rest)?));
    }
    if let Some(rest) = strip_verb(line, "equip") {
        let (item_name, target) = split_target(rest, " to ");
        let item = state
            .find_item(item_name)
            .ok_or_else(|| ActionError::NotAvailable(item_name.to_string()))?;
        let target = target.map(|name| actor(state, name)).transpose()?;
        return Ok(Command::Equip { item, target });
    }
    if let Some(rest) = strip_verb(line, "unequip") {
        let (slot_name, target) = split_target(rest, " from ");
        let slot = EquipSlot::from_name(slot_name)
            .ok_or_else(|| ActionError::EmptySlot(slot_name.to_string()))?;
        let target = target.map(|name| actor(state, name)).transpose()?;
        return Ok(Command::Unequip { slot, target });
    }
    if let Some(rest) = strip_verb(line, "triple") {
        let names: Vec<&str> = rest.split(',').map(str::trim).collect();
        if let [a, b, c] = names.as_slice() {
            return Ok(Command::TripleAttack([
                actor(state, a)?,
                actor(state, b)?,
                actor(state, c)?,
            ]));
        }
    }
    Ok(Command::Unknown(line.to_string()))
}

fn actor(state: &GameState, name: &str) -> Result<ActorId, ActionError> {
    state
        .find_actor(name)
        .ok_or_else(|| ActionError::UnknownTarget(name.to_string()))
}

/// `rest` after a case-insensitive verb followed by a space
fn strip_verb<'a>(line: &'a str, verb: &str) -> Option<&'a str> {
    let head = line.get(..verb.len())?;
    let rest = line.get(verb.len()..)?;
    if head.eq_ignore_ascii_case(verb) && rest.starts_with(' ') {
        Some(rest.trim())
    } else {
        None
    }
}

/// Split "<thing> to <name>" style arguments
fn split_target<'a>(rest: &'a str, separator: &str) -> (&'a str, Option<&'a str>) {
    match rest.to_ascii_lowercase().rfind(separator) {
        Some(at) => (
            rest[..at].trim(),
            Some(rest[at + separator.len()..].trim()),
        ),
        None => (rest.trim(), None),
    }
}
