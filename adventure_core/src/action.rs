//! Action resolution - run one command for one player and charge its cost

use crate::command::{ActionCost, Command};
use crate::error::ActionError;
use crate::event::GameEvent;
use crate::state::GameState;
use crate::types::{ActorId, PlayerClass};
use rand::Rng;
use tracing::{debug, warn};

impl GameState {
    /// Resolve a command and apply its cost to the actor's action budget
    ///
    /// Failures are reported as [`GameEvent::ActionFailed`] and cost nothing,
    /// except the ones [`ActionError::consumes_budget`] names.
    pub fn execute(&mut self, actor: ActorId, command: Command, rng: &mut impl Rng) -> ActionCost {
        debug!(actor = %self.name_of(actor), verb = command.verb(), "executing");
        let cost = match self.resolve(actor, &command, rng) {
            Ok(cost) => cost,
            Err(error) => {
                warn!(actor = %self.name_of(actor), %error, "command refused");
                let cost = if error.consumes_budget() {
                    ActionCost::Active
                } else {
                    ActionCost::Passive
                };
                self.emit(GameEvent::ActionFailed {
                    actor: Some(actor),
                    error,
                });
                cost
            }
        };

        if let Some(player) = self.player_mut(actor) {
            match cost {
                ActionCost::Active => player.spend_action(),
                ActionCost::Passive => {}
                ActionCost::Drain | ActionCost::EndTurn | ActionCost::EndPhase => player.end_turn(),
            }
        }
        cost
    }

    fn resolve(
        &mut self,
        actor: ActorId,
        command: &Command,
        rng: &mut impl Rng,
    ) -> Result<ActionCost, ActionError> {
        let name = self.name_of(actor).to_string();
        let player = self
            .player(actor)
            .ok_or_else(|| ActionError::UnknownTarget(name.clone()))?;
        if !player.is_alive() {
            return Err(ActionError::Incapacitated(name));
        }
        let class = player.class;
        let attack_power = player.attack_power();

        match command {
            Command::Attack(target) => {
                self.take_damage(*target, attack_power, Some(actor), rng)?;
                Ok(ActionCost::Active)
            }
            Command::Heal(target) => {
                self.use_potion(*target)?;
                Ok(ActionCost::Active)
            }
            Command::ShowInventory => {
                self.show_inventory();
                Ok(ActionCost::Passive)
            }
            Command::ShowEquipment(target) => {
                self.show_equipment(*target)?;
                Ok(ActionCost::Passive)
            }
            Command::ShowStats(target) => {
                self.show_stats(*target)?;
                Ok(ActionCost::Passive)
            }
            Command::PickUp(item) => {
                self.pick_up(*item)?;
                Ok(ActionCost::Active)
            }
            Command::Loot(target) => {
                self.loot(*target)?;
                Ok(ActionCost::Active)
            }
            Command::Equip { item, target } => {
                let wearer = self.gear_target(actor, *target)?;
                self.equip(wearer, *item)?;
                Ok(ActionCost::Passive)
            }
            Command::Unequip { slot, target } => {
                let wearer = self.gear_target(actor, *target)?;
                self.unequip(wearer, *slot)?;
                Ok(ActionCost::Passive)
            }
            Command::Defend => {
                require_class(class, PlayerClass::Knight, command)?;
                self.defend(actor)?;
                Ok(ActionCost::Active)
            }
            Command::TripleAttack(targets) => {
                require_class(class, PlayerClass::Archer, command)?;
                self.triple_attack(actor, *targets, rng)?;
                Ok(ActionCost::Active)
            }
            Command::Purify => {
                require_class(class, PlayerClass::Cleric, command)?;
                self.purify(actor)?;
                Ok(ActionCost::Drain)
            }
            Command::ChangePlayer => {
                if self.in_battle {
                    return Err(ActionError::CannotChangeInBattle);
                }
                Ok(ActionCost::EndTurn)
            }
            Command::Continue => {
                if self.in_battle {
                    Ok(ActionCost::EndTurn)
                } else {
                    Ok(ActionCost::EndPhase)
                }
            }
            Command::Unknown(text) => Err(ActionError::UnknownAction(text.clone())),
        }
    }

    /// Whose gear an equip command touches. In battle only the actor's own.
    fn gear_target(&self, actor: ActorId, target: Option<ActorId>) -> Result<ActorId, ActionError> {
        let wearer = target.unwrap_or(actor);
        if self.in_battle && wearer != actor {
            return Err(ActionError::OnlySelfInBattle(self.name_of(actor).to_string()));
        }
        Ok(wearer)
    }

    fn show_inventory(&mut self) {
        let items = self
            .shared_items()
            .into_iter()
            .map(|id| self.item_name(id))
            .collect();
        self.emit(GameEvent::InventoryShown {
            items,
            potions: self.inventory.potions,
            coins: self.inventory.coins,
        });
    }

    fn show_equipment(&mut self, target: ActorId) -> Result<(), ActionError> {
        let player = self
            .player(target)
            .ok_or_else(|| ActionError::UnknownTarget(self.name_of(target).to_string()))?;
        let slots = player
            .equipment
            .iter()
            .map(|(slot, item)| (slot, item.map(|id| self.item_name(id))))
            .collect();
        self.emit(GameEvent::EquipmentShown {
            actor: target,
            slots,
        });
        Ok(())
    }

    fn show_stats(&mut self, target: ActorId) -> Result<(), ActionError> {
        let stats = self
            .actor(target)
            .and_then(|actor| actor.stats().copied())
            .ok_or_else(|| ActionError::UnknownTarget(self.name_of(target).to_string()))?;
        self.emit(GameEvent::StatsShown {
            actor: target,
            stats,
        });
        Ok(())
    }

    /// Knight: draw every enemy attack until next attacked
    fn defend(&mut self, knight: ActorId) -> Result<(), ActionError> {
        if !self.in_battle {
            return Err(ActionError::NotInBattle("Defend".to_string()));
        }
        if self.targeting_override == Some(knight) {
            return Err(ActionError::AlreadyDefending(self.name_of(knight).to_string()));
        }
        self.targeting_override = Some(knight);
        self.emit(GameEvent::Defending { knight });
        Ok(())
    }

    /// Archer: three weakened strikes at three chosen targets
    ///
    /// Targets already down are skipped, including ones felled by an earlier
    /// strike of the same volley.
    fn triple_attack(
        &mut self,
        archer: ActorId,
        targets: [ActorId; 3],
        rng: &mut impl Rng,
    ) -> Result<(), ActionError> {
        for target in targets {
            if self.actor(target).is_none() {
                return Err(ActionError::UnknownTarget(self.name_of(target).to_string()));
            }
        }
        let any_standing = targets
            .iter()
            .any(|target| self.actor(*target).is_some_and(|actor| actor.is_alive()));
        if !any_standing {
            return Err(ActionError::AllTargetsDefeated);
        }

        let attack_power = self.player(archer).map(|p| p.attack_power()).unwrap_or(0.0);
        let damage = (attack_power / self.constants().triple_attack_divisor).trunc();

        for target in targets {
            // Purged by a victory earlier in the volley, or already down
            if !self.actor(target).is_some_and(|actor| actor.is_alive()) {
                continue;
            }
            self.take_damage(target, damage, Some(archer), rng)?;
        }
        Ok(())
    }

    /// Cleric: heal every living, hurt party member by healing power
    fn purify(&mut self, cleric: ActorId) -> Result<(), ActionError> {
        if !self.in_battle {
            return Err(ActionError::NotInBattle("Purify".to_string()));
        }
        let power = self.player(cleric).map(|p| p.healing_power()).unwrap_or(0.0);
        self.emit(GameEvent::Purified { cleric });

        for id in self.living_players() {
            if self.player(id).is_some_and(|p| p.is_full_health()) {
                continue;
            }
            self.restore_health(id, power)?;
        }
        Ok(())
    }
}

fn require_class(class: PlayerClass, needed: PlayerClass, command: &Command) -> Result<(), ActionError> {
    if class == needed {
        Ok(())
    } else {
        Err(ActionError::UnknownAction(command.verb().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{EquipItem, WorldItem};
    use crate::stats::{Modifier, StatField, Stats};
    use crate::types::{ClassRestriction, EnemyKind, EquipSlot};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn party() -> (GameState, ActorId, ActorId, ActorId) {
        let mut state = GameState::default();
        let archer = state.spawn_player("Crystia", PlayerClass::Archer, PlayerClass::Archer.base_stats());
        let knight = state.spawn_player("Ayame", PlayerClass::Knight, PlayerClass::Knight.base_stats());
        let cleric = state.spawn_player("Yana", PlayerClass::Cleric, PlayerClass::Cleric.base_stats());
        (state, archer, knight, cleric)
    }

    fn still_enemy(state: &mut GameState, name: &str, max_health: f64) -> ActorId {
        // Speed 0: never dodges
        let stats = Stats::new()
            .with(StatField::MaxHealth, max_health)
            .with(StatField::AttackPower, 10.0)
            .with(StatField::Speed, 0.0);
        state.spawn_enemy(name, EnemyKind::Plain, stats)
    }

    #[test]
    fn test_attack_is_active() {
        let (mut state, _, knight, _) = party();
        let spider = still_enemy(&mut state, "Swamp Spider", 40.0);
        let mut rng = StdRng::seed_from_u64(1);
        state.player_mut(knight).unwrap().budget = 1;

        assert_eq!(state.execute(knight, Command::Attack(spider), &mut rng), ActionCost::Active);
        assert_eq!(state.player(knight).unwrap().budget, 0);
        assert!((state.actor(spider).unwrap().health() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_failed_attack_costs_nothing() {
        let (mut state, archer, _, _) = party();
        let vase = state.spawn_entity("Ornamented Vase", 1.0);
        let mut rng = StdRng::seed_from_u64(2);
        state.take_damage(vase, 5.0, None, &mut rng).unwrap();
        state.player_mut(archer).unwrap().budget = 1;

        assert_eq!(state.execute(archer, Command::Attack(vase), &mut rng), ActionCost::Passive);
        assert_eq!(state.player(archer).unwrap().budget, 1);
        assert!(state.pending_events().iter().any(|e| matches!(
            e,
            GameEvent::ActionFailed {
                error: ActionError::AlreadyDefeated(_),
                ..
            }
        )));
    }

    #[test]
    fn test_heal_full_target_consumes_budget() {
        let (mut state, archer, knight, _) = party();
        let mut rng = StdRng::seed_from_u64(3);
        state.player_mut(archer).unwrap().budget = 1;

        assert_eq!(state.execute(archer, Command::Heal(knight), &mut rng), ActionCost::Active);
        assert_eq!(state.player(archer).unwrap().budget, 0);
        assert_eq!(state.inventory.potions, 8);
    }

    #[test]
    fn test_class_command_from_wrong_class() {
        let (mut state, archer, _, _) = party();
        state.in_battle = true;
        let mut rng = StdRng::seed_from_u64(4);
        state.player_mut(archer).unwrap().budget = 1;

        state.execute(archer, Command::Defend, &mut rng);
        assert!(state.pending_events().contains(&GameEvent::ActionFailed {
            actor: Some(archer),
            error: ActionError::UnknownAction("defend".into()),
        }));
        assert_eq!(state.targeting_override(), None);
    }

    #[test]
    fn test_defend_twice_is_refused() {
        let (mut state, _, knight, _) = party();
        state.in_battle = true;
        let mut rng = StdRng::seed_from_u64(5);
        state.player_mut(knight).unwrap().budget = 2;

        assert_eq!(state.execute(knight, Command::Defend, &mut rng), ActionCost::Active);
        assert_eq!(state.targetable_players(), vec![knight]);
        assert_eq!(state.execute(knight, Command::Defend, &mut rng), ActionCost::Passive);
        assert_eq!(state.player(knight).unwrap().budget, 1);
    }

    #[test]
    fn test_triple_attack_on_dead_targets() {
        let (mut state, archer, _, _) = party();
        let a = still_enemy(&mut state, "Swamp Spider", 20.0);
        let b = still_enemy(&mut state, "Aquatic Spider", 20.0);
        let c = still_enemy(&mut state, "Cave Spider", 20.0);
        // A fourth keeps the enemy side from being cleared
        still_enemy(&mut state, "Queen Spider", 100.0);
        let mut rng = StdRng::seed_from_u64(6);
        for target in [a, b, c] {
            state.take_damage(target, 50.0, None, &mut rng).unwrap();
        }
        state.drain_events();
        state.player_mut(archer).unwrap().budget = 1;

        assert_eq!(
            state.execute(archer, Command::TripleAttack([a, b, c]), &mut rng),
            ActionCost::Passive
        );
        assert_eq!(state.player(archer).unwrap().budget, 1);
        assert!(!state.pending_events().iter().any(GameEvent::is_damage));
        assert!(state.pending_events().contains(&GameEvent::ActionFailed {
            actor: Some(archer),
            error: ActionError::AllTargetsDefeated,
        }));
    }

    #[test]
    fn test_triple_attack_skips_fallen_and_hits_the_rest() {
        let (mut state, archer, _, _) = party();
        let a = still_enemy(&mut state, "Swamp Spider", 20.0);
        let b = still_enemy(&mut state, "Aquatic Spider", 20.0);
        let mut rng = StdRng::seed_from_u64(7);
        state.take_damage(a, 50.0, None, &mut rng).unwrap();
        state.drain_events();
        state.player_mut(archer).unwrap().budget = 1;

        assert_eq!(
            state.execute(archer, Command::TripleAttack([a, b, b]), &mut rng),
            ActionCost::Active
        );
        // trunc(12 / 6) = 2, twice
        assert!((state.actor(b).unwrap().health() - 16.0).abs() < 1e-9);
        let hits = state.pending_events().iter().filter(|e| e.is_damage()).count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_purify_heals_hurt_players_and_drains() {
        let (mut state, archer, knight, cleric) = party();
        state.in_battle = true;
        let mut rng = StdRng::seed_from_u64(8);
        state.take_damage(archer, 10.0, None, &mut rng).unwrap();
        state.take_damage(knight, 200.0, None, &mut rng).unwrap();
        state.player_mut(cleric).unwrap().budget = 2;

        assert_eq!(state.execute(cleric, Command::Purify, &mut rng), ActionCost::Drain);
        assert_eq!(state.player(cleric).unwrap().budget, 0);
        assert!((state.player(archer).unwrap().health - 75.0).abs() < 1e-9);
        // Fallen players are not touched
        assert!(!state.player(knight).unwrap().is_alive());
    }

    #[test]
    fn test_purify_outside_battle() {
        let (mut state, _, _, cleric) = party();
        let mut rng = StdRng::seed_from_u64(9);
        state.player_mut(cleric).unwrap().budget = 1;

        assert_eq!(state.execute(cleric, Command::Purify, &mut rng), ActionCost::Passive);
        assert_eq!(state.player(cleric).unwrap().budget, 1);
    }

    #[test]
    fn test_equip_other_player_only_outside_battle() {
        let (mut state, archer, knight, _) = party();
        let armor = state.add_to_shared(WorldItem::Equip(EquipItem::new(
            "Curiass",
            EquipSlot::Armor,
            ClassRestriction::Any,
            Modifier::new().with(StatField::MaxHealth, 1.2),
        )));
        let mut rng = StdRng::seed_from_u64(10);
        let equip = Command::Equip {
            item: armor,
            target: Some(knight),
        };

        state.in_battle = true;
        state.execute(archer, equip.clone(), &mut rng);
        assert_eq!(state.shared_items(), vec![armor]);

        state.in_battle = false;
        assert_eq!(state.execute(archer, equip, &mut rng), ActionCost::Passive);
        assert_eq!(state.player(knight).unwrap().equipment.get(EquipSlot::Armor), Some(armor));
    }

    #[test]
    fn test_change_and_continue() {
        let (mut state, archer, _, _) = party();
        let mut rng = StdRng::seed_from_u64(11);

        state.in_battle = true;
        state.player_mut(archer).unwrap().budget = 1;
        assert_eq!(state.execute(archer, Command::ChangePlayer, &mut rng), ActionCost::Passive);
        assert_eq!(state.execute(archer, Command::Continue, &mut rng), ActionCost::EndTurn);
        assert_eq!(state.player(archer).unwrap().budget, 0);

        state.in_battle = false;
        state.player_mut(archer).unwrap().budget = 1;
        assert_eq!(state.execute(archer, Command::ChangePlayer, &mut rng), ActionCost::EndTurn);
        state.player_mut(archer).unwrap().budget = 1;
        assert_eq!(state.execute(archer, Command::Continue, &mut rng), ActionCost::EndPhase);
    }

    #[test]
    fn test_fallen_player_cannot_act() {
        let (mut state, archer, _, _) = party();
        let mut rng = StdRng::seed_from_u64(12);
        state.take_damage(archer, 100.0, None, &mut rng).unwrap();

        state.execute(archer, Command::ShowInventory, &mut rng);
        assert!(state.pending_events().contains(&GameEvent::ActionFailed {
            actor: Some(archer),
            error: ActionError::Incapacitated("Crystia".into()),
        }));
    }
}
