//! adventure_core - Turn-based party combat engine for a text adventure
//!
//! This library provides:
//! - Stats and Modifiers: optional attributes scaled by worn equipment
//! - Actors: players, enemies and breakable entities in one `GameState`
//! - Combat: dodge rolls, damage intake, healing, looting
//! - Battle: speed-ordered rounds with per-turn action budgets
//! - Interaction: free actions between battles
//! - Campaign: a TOML-defined world played encounter by encounter
//!
//! Commands come in through a [`Controller`]; everything that happens goes
//! out as [`GameEvent`]s.

mod action;
pub mod actor;
pub mod battle;
pub mod campaign;
pub mod combat;
pub mod command;
pub mod config;
pub mod controller;
pub mod equipment;
pub mod error;
pub mod event;
pub mod interaction;
pub mod item;
pub mod prelude;
pub mod state;
pub mod stats;
pub mod types;

// Re-export core types for convenience
pub use actor::{Actor, Enemy, Entity, Player};
pub use battle::{run_battle, Battle, BattleOutcome, BattlePhase};
pub use campaign::{run_campaign, CampaignOutcome};
pub use combat::DamageOutcome;
pub use command::{ActionCost, Command};
pub use config::{default_world, load_world, ConfigError, GameConstants, WorldConfig};
pub use controller::{Controller, ScriptedController};
pub use equipment::Equipment;
pub use error::ActionError;
pub use event::GameEvent;
pub use interaction::run_interaction;
pub use item::{Collectible, EquipItem, ItemLocation, SharedInventory, WorldItem};
pub use state::GameState;
pub use stats::{Modifier, StatField, Stats};
pub use types::{ActorId, ActorKind, ClassRestriction, EnemyKind, EquipSlot, ItemId, PlayerClass};
