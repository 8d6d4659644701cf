//! Damage intake, healing, revival and paralysis

use super::dodge::dodged;
use super::result::DamageOutcome;
use crate::actor::Actor;
use crate::error::ActionError;
use crate::event::GameEvent;
use crate::state::GameState;
use crate::stats::round1;
use crate::types::{ActorId, ActorKind};
use rand::Rng;
use tracing::{debug, info};

impl GameState {
    /// Deliver `amount` damage from `source` (None for the environment)
    ///
    /// Players dodge any source with a speed. Enemies dodge only players.
    /// Entities never dodge. Counters, terminal flags, kill credit and the
    /// victory transfer all happen inside this call.
    pub fn take_damage(
        &mut self,
        target: ActorId,
        amount: f64,
        source: Option<ActorId>,
        rng: &mut impl Rng,
    ) -> Result<DamageOutcome, ActionError> {
        let actor = self
            .actor(target)
            .ok_or_else(|| ActionError::UnknownTarget(self.name_of(target).to_string()))?;
        if !actor.is_alive() {
            return Err(ActionError::AlreadyDefeated(actor.name().to_string()));
        }
        let kind = actor.kind();
        let own_speed = actor.speed();

        let source_actor = source.and_then(|id| self.actor(id));
        let source_kind = source_actor.map(Actor::kind);
        let source_speed = source_actor.and_then(Actor::speed);

        // Any attack on the defender ends the defense, hit or miss
        if self.targeting_override == Some(target) {
            self.targeting_override = None;
            self.emit(GameEvent::DefendEnded { knight: target });
        }

        let floor = self.constants().dodge_floor;
        let was_dodged = match kind {
            ActorKind::Player => dodged(own_speed, source_speed, floor, rng),
            ActorKind::Enemy if source_kind == Some(ActorKind::Player) => {
                dodged(own_speed, source_speed, floor, rng)
            }
            ActorKind::Enemy | ActorKind::Entity => false,
        };
        if was_dodged {
            self.emit(GameEvent::Dodged { source, target });
            debug!(target = %self.name_of(target), "attack dodged");
            return Ok(DamageOutcome::dodge());
        }

        if let (Some(attacker), ActorKind::Player, Some(ActorKind::Player)) =
            (source, kind, source_kind)
        {
            self.emit(GameEvent::FriendlyFire {
                source: attacker,
                target,
            });
        }

        let Some(actor) = self.actor_mut(target) else {
            return Err(ActionError::UnknownTarget(target.to_string()));
        };
        let defeated = actor.apply_hit(amount);
        let remaining = actor.health();
        self.emit(GameEvent::DamageDealt {
            source,
            target,
            amount,
            remaining,
        });

        let outcome = DamageOutcome::hit(amount, defeated);
        debug!(
            target = %self.name_of(target),
            outcome = %outcome.summary(),
            remaining,
            "damage resolved"
        );

        if defeated {
            self.on_defeat(target, kind, source);
        }
        Ok(outcome)
    }

    fn on_defeat(&mut self, target: ActorId, kind: ActorKind, source: Option<ActorId>) {
        match kind {
            ActorKind::Player => {
                self.alive_players = self.alive_players.saturating_sub(1);
                self.emit(GameEvent::ActorDefeated {
                    actor: target,
                    kind,
                    remaining: self.alive_players,
                });
                info!(player = %self.name_of(target), remaining = self.alive_players, "player down");
                if self.alive_players == 0 && !self.party_defeated {
                    self.party_defeated = true;
                    self.emit(GameEvent::PartyWiped);
                    info!("party wiped");
                }
            }
            ActorKind::Enemy => {
                self.alive_enemies = self.alive_enemies.saturating_sub(1);
                if let Some(player) = source.and_then(|id| self.player_mut(id)) {
                    player.kills += 1;
                }
                self.emit(GameEvent::ActorDefeated {
                    actor: target,
                    kind,
                    remaining: self.alive_enemies,
                });
                info!(enemy = %self.name_of(target), remaining = self.alive_enemies, "enemy defeated");
                if self.alive_enemies == 0 && !self.enemies_cleared {
                    self.conclude_victory();
                }
            }
            ActorKind::Entity => {
                let remaining = self.count_living(ActorKind::Entity);
                self.emit(GameEvent::ActorDefeated {
                    actor: target,
                    kind,
                    remaining,
                });
                debug!(entity = %self.name_of(target), "entity broken");
            }
        }
    }

    /// Collect every enemy's remaining loot, purge the enemies and mark the
    /// enemy side cleared
    fn conclude_victory(&mut self) {
        for enemy in self.enemies() {
            self.transfer_inventory(enemy);
            self.despawn(enemy);
        }
        self.enemies_cleared = true;
        self.emit(GameEvent::Victory);
        info!("enemy side cleared");
    }

    /// Restore health to a player, reviving them if they were down
    ///
    /// Returns the health actually gained.
    pub fn restore_health(&mut self, target: ActorId, amount: f64) -> Result<f64, ActionError> {
        let name = self.name_of(target).to_string();
        let player = self
            .player_mut(target)
            .ok_or_else(|| ActionError::UnknownTarget(name.clone()))?;
        if player.is_full_health() {
            return Err(ActionError::AlreadyFull(name));
        }

        let before = player.health;
        let revived = player.heal(amount);
        let health = player.health;
        let gained = round1(health - before);

        self.emit(GameEvent::Healed {
            target,
            amount: gained,
            health,
        });
        if revived {
            self.alive_players += 1;
            self.party_defeated = false;
            self.emit(GameEvent::Revived {
                actor: target,
                health,
            });
        }
        debug!(player = %name, gained, health, "healed");
        Ok(gained)
    }

    /// Spend one potion from the shared stash on a player
    pub fn use_potion(&mut self, target: ActorId) -> Result<f64, ActionError> {
        if self.inventory.potions == 0 {
            return Err(ActionError::NoPotionsLeft);
        }
        let power = self.constants().potion_power;
        let gained = self.restore_health(target, power)?;
        self.inventory.potions -= 1;
        Ok(gained)
    }

    /// Bring every fallen player back with a fraction of their max health
    pub fn revive_fallen(&mut self) -> Vec<ActorId> {
        let fraction = self.constants().revive_fraction;
        let mut revived = Vec::new();

        for id in self.players() {
            let Some(player) = self.player_mut(id) else {
                continue;
            };
            if player.is_alive() {
                continue;
            }
            player.health = round1(player.max_health() * fraction);
            player.budget = 0;
            if !player.is_alive() {
                continue;
            }
            let health = player.health;
            self.alive_players += 1;
            self.emit(GameEvent::Revived { actor: id, health });
            revived.push(id);
        }

        if !revived.is_empty() {
            self.party_defeated = false;
            info!(count = revived.len(), "fallen players revived");
        }
        revived
    }

    /// Lock a player out of their next `turns` turns
    pub fn paralyze(&mut self, source: ActorId, target: ActorId, turns: u32) -> Result<(), ActionError> {
        let name = self.name_of(target).to_string();
        let player = self
            .player_mut(target)
            .ok_or_else(|| ActionError::UnknownTarget(name.clone()))?;
        if !player.is_alive() {
            return Err(ActionError::AlreadyDefeated(name));
        }
        player.paralyze(turns);
        self.emit(GameEvent::Paralyzed {
            source,
            target,
            turns,
        });
        debug!(player = %name, turns, "paralyzed");
        Ok(())
    }
}
