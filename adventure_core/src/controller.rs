//! Controller - Where player decisions come from
//!
//! The battle and interaction loops block on a controller whenever a player
//! has to decide something. The terminal front end implements it with a
//! prompt; tests use [`ScriptedController`].

use crate::command::Command;
use crate::event::GameEvent;
use crate::state::GameState;
use crate::types::ActorId;
use std::collections::VecDeque;

pub trait Controller {
    /// Next command for a player who still has budget
    fn next_command(&mut self, state: &GameState, actor: ActorId) -> Command;

    /// Which player acts next in the interaction phase
    ///
    /// `Err` carries whatever could not be resolved to an actor; it is
    /// reported as an unknown target and the question is asked again.
    fn select_player(&mut self, state: &GameState) -> Result<ActorId, String>;

    /// Events produced since the last call, in order
    fn on_events(&mut self, _state: &GameState, _events: &[GameEvent]) {}
}

/// Replays queued decisions
///
/// Out of commands it answers `Continue`; out of selections it picks the
/// first living player, so a script always runs to completion.
#[derive(Debug, Default)]
pub struct ScriptedController {
    commands: VecDeque<Command>,
    selections: VecDeque<Result<ActorId, String>>,
    /// Every event seen, in order
    pub log: Vec<GameEvent>,
}

impl ScriptedController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commands(commands: impl IntoIterator<Item = Command>) -> Self {
        ScriptedController {
            commands: commands.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn push_command(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    pub fn push_selection(&mut self, actor: ActorId) {
        self.selections.push_back(Ok(actor));
    }

    /// Queue a selection that names nobody
    pub fn push_unknown_selection(&mut self, text: impl Into<String>) {
        self.selections.push_back(Err(text.into()));
    }

    pub fn remaining_commands(&self) -> usize {
        self.commands.len()
    }

    pub fn count(&self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        self.log.iter().filter(|event| predicate(event)).count()
    }
}

impl Controller for ScriptedController {
    fn next_command(&mut self, _state: &GameState, _actor: ActorId) -> Command {
        self.commands.pop_front().unwrap_or(Command::Continue)
    }

    fn select_player(&mut self, state: &GameState) -> Result<ActorId, String> {
        match self.selections.pop_front() {
            Some(selection) => selection,
            None => state
                .living_players()
                .first()
                .copied()
                .ok_or_else(String::new),
        }
    }

    fn on_events(&mut self, _state: &GameState, events: &[GameEvent]) {
        self.log.extend_from_slice(events);
    }
}

/// Hand every pending event to the controller
pub(crate) fn flush(state: &mut GameState, controller: &mut impl Controller) {
    let events = state.drain_events();
    if !events.is_empty() {
        controller.on_events(state, &events);
    }
}
