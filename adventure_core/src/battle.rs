//! Battle - Speed-ordered rounds until one side is wiped out
//!
//! The roster is fixed when the battle starts: living players and every
//! enemy, fastest first. Each round walks it once. Players pull commands from
//! the [`Controller`] while they have budget; enemies pick a random target.

use crate::controller::{flush, Controller};
use crate::event::GameEvent;
use crate::state::GameState;
use crate::types::{ActorId, ActorKind, EnemyKind};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    NotStarted,
    InProgress,
    Victory,
    Defeat,
}

/// How a finished battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleOutcome::Victory => write!(f, "victory"),
            BattleOutcome::Defeat => write!(f, "defeat"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Battle {
    roster: Vec<ActorId>,
    round: u32,
    phase: BattlePhase,
}

impl Default for Battle {
    fn default() -> Self {
        Self::new()
    }
}

impl Battle {
    pub fn new() -> Self {
        Battle {
            roster: Vec::new(),
            round: 0,
            phase: BattlePhase::NotStarted,
        }
    }

    pub fn roster(&self) -> &[ActorId] {
        &self.roster
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Victory => Some(BattleOutcome::Victory),
            BattlePhase::Defeat => Some(BattleOutcome::Defeat),
            BattlePhase::NotStarted | BattlePhase::InProgress => None,
        }
    }

    /// Reset the terminal flags, enter battle and fix the turn order
    pub fn start(&mut self, state: &mut GameState) {
        state.party_defeated = state.alive_players == 0;
        state.enemies_cleared = state.alive_enemies == 0;
        state.in_battle = true;
        state.targeting_override = None;

        let mut roster = state.living_players();
        roster.extend(state.enemies());
        let speed = |id: &ActorId| {
            state
                .actor(*id)
                .and_then(|actor| actor.speed())
                .unwrap_or(0.0)
        };
        // Stable: equal speeds keep players ahead of enemies
        roster.sort_by(|a, b| speed(b).partial_cmp(&speed(a)).unwrap_or(Ordering::Equal));

        self.roster = roster;
        self.round = 1;
        self.phase = BattlePhase::InProgress;
        state.emit(GameEvent::BattleStarted {
            roster: self.roster.clone(),
        });
        info!(combatants = self.roster.len(), "battle started");
        self.check_end(state);
    }

    /// Move to a terminal phase if either side is gone
    fn check_end(&mut self, state: &GameState) -> bool {
        if state.is_party_defeated() {
            self.phase = BattlePhase::Defeat;
        } else if state.are_enemies_cleared() {
            self.phase = BattlePhase::Victory;
        }
        self.phase != BattlePhase::InProgress
    }

    /// Give every combatant one turn, stopping as soon as a side is wiped out
    pub fn run_round(
        &mut self,
        state: &mut GameState,
        controller: &mut impl Controller,
        rng: &mut impl Rng,
    ) -> BattlePhase {
        if self.phase != BattlePhase::InProgress {
            return self.phase;
        }
        state.emit(GameEvent::RoundStarted { round: self.round });
        debug!(round = self.round, "round started");

        for index in 0..self.roster.len() {
            if self.check_end(state) {
                break;
            }
            let actor = self.roster[index];
            // Purged enemies drop out of the roster silently
            let Some(kind) = state.actor(actor).map(|a| a.kind()) else {
                continue;
            };
            if !state.actor(actor).is_some_and(|a| a.is_alive()) {
                state.emit(GameEvent::TurnSkipped { actor });
                continue;
            }

            match kind {
                ActorKind::Player => player_turn(state, controller, actor, rng),
                ActorKind::Enemy => enemy_turn(state, actor, rng),
                ActorKind::Entity => {}
            }
            flush(state, controller);
        }

        if !self.check_end(state) {
            self.round += 1;
        }
        flush(state, controller);
        self.phase
    }
}

fn player_turn(
    state: &mut GameState,
    controller: &mut impl Controller,
    actor: ActorId,
    rng: &mut impl Rng,
) {
    state.emit(GameEvent::TurnStarted { actor });
    let Some(player) = state.player_mut(actor) else {
        return;
    };
    let budget = player.grant_turn();
    if budget <= 0 {
        let turns_left = budget.unsigned_abs();
        state.emit(GameEvent::Immobilized { actor, turns_left });
        debug!(player = %state.name_of(actor), turns_left, "immobilized");
        return;
    }

    while !state.is_concluded() && state.player(actor).is_some_and(|p| p.can_act()) {
        flush(state, controller);
        let command = controller.next_command(state, actor);
        state.execute(actor, command, rng);
    }

    // Unspent actions do not carry into the next turn
    if let Some(player) = state.player_mut(actor) {
        if player.budget > 0 {
            player.end_turn();
        }
    }
}

fn enemy_turn(state: &mut GameState, actor: ActorId, rng: &mut impl Rng) {
    let Some(enemy) = state.actor(actor).and_then(|a| a.as_enemy()) else {
        return;
    };
    let kind = enemy.kind;
    let attack_power = enemy.attack_power();
    state.emit(GameEvent::TurnStarted { actor });

    let targets = state.targetable_players();
    let Some(&target) = targets.choose(rng) else {
        return;
    };

    let paralyze_chance = state.constants().paralyze_chance;
    let result = if kind == EnemyKind::QueenSpider && rng.gen_bool(paralyze_chance) {
        let turns = state.constants().paralyze_turns;
        state.paralyze(actor, target, turns)
    } else {
        state.take_damage(target, attack_power, Some(actor), rng).map(|_| ())
    };
    if let Err(error) = result {
        warn!(enemy = %state.name_of(actor), %error, "enemy action failed");
    }
}

/// Run a battle from start to finish
///
/// On victory every fallen player is revived with a fraction of their max
/// health. Leaves `in_battle` cleared.
pub fn run_battle(
    state: &mut GameState,
    controller: &mut impl Controller,
    rng: &mut impl Rng,
) -> BattleOutcome {
    let mut battle = Battle::new();
    battle.start(state);
    flush(state, controller);

    let outcome = loop {
        if let Some(outcome) = battle.outcome() {
            break outcome;
        }
        battle.run_round(state, controller, rng);
    };

    state.in_battle = false;
    state.targeting_override = None;
    state.emit(GameEvent::BattleConcluded {
        outcome,
        rounds: battle.round(),
    });
    info!(%outcome, rounds = battle.round(), "battle concluded");
    if outcome == BattleOutcome::Victory {
        state.revive_fallen();
    }
    flush(state, controller);
    outcome
}
