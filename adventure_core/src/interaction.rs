//! Interaction phase - free actions between battles
//!
//! Players take turns in whatever order the controller picks. Each pick gets
//! exactly one action; passive commands chain until something active, a
//! `change` or a `continue`.

use crate::command::ActionCost;
use crate::controller::{flush, Controller};
use crate::error::ActionError;
use crate::event::GameEvent;
use crate::state::GameState;
use rand::Rng;
use tracing::{debug, info};

/// Run one interaction phase until a player continues or nobody is left
pub fn run_interaction(
    state: &mut GameState,
    controller: &mut impl Controller,
    rng: &mut impl Rng,
) {
    state.emit(GameEvent::InteractionStarted);
    info!("interaction phase started");

    'phase: while !state.living_players().is_empty() {
        flush(state, controller);
        let actor = match controller.select_player(state) {
            Ok(actor) if state.player(actor).is_some() => actor,
            Ok(other) => {
                let error = ActionError::UnknownTarget(state.name_of(other).to_string());
                state.emit(GameEvent::ActionFailed { actor: None, error });
                continue;
            }
            Err(text) => {
                let error = ActionError::UnknownTarget(text);
                state.emit(GameEvent::ActionFailed { actor: None, error });
                continue;
            }
        };

        let Some(player) = state.player_mut(actor) else {
            continue;
        };
        if !player.is_alive() {
            let error = ActionError::Incapacitated(player.name.clone());
            state.emit(GameEvent::ActionFailed {
                actor: Some(actor),
                error,
            });
            continue;
        }
        // Exactly one action, whatever was left over (paralysis included)
        player.budget = 1;
        state.emit(GameEvent::PlayerSelected { actor });
        debug!(player = %state.name_of(actor), "player selected");

        while state.player(actor).is_some_and(|p| p.can_act()) {
            flush(state, controller);
            let command = controller.next_command(state, actor);
            if state.execute(actor, command, rng) == ActionCost::EndPhase {
                break 'phase;
            }
        }
    }

    state.emit(GameEvent::InteractionEnded);
    info!("interaction phase ended");
    flush(state, controller);
}
